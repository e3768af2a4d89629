use anyhow::{Context, Result};
use colored::Colorize;
use std::process::{Command, Output};
use std::time::Instant;

/// How a failing step is treated.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    Abort,
    Warn,
}

/// Run `cargo <args>`, print a timed pass/fail line and return the output.
pub fn cargo(label: &str, args: &[&str], on_failure: OnFailure) -> Result<Output> {
    println!("{}", format!("  {label}...").cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .args(args)
        .output()
        .with_context(|| format!("Failed to run cargo {}", args.join(" ")))?;

    if output.status.success() {
        println!(
            "{}",
            format!("  ✓ {label} passed in {:.2}s", start.elapsed().as_secs_f64()).green()
        );
    } else if on_failure == OnFailure::Warn {
        eprintln!("{}", format!("  ⚠ {label} reported problems").yellow().bold());
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
    } else {
        eprintln!("{}", format!("  ✗ {label} failed").red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        for line in String::from_utf8_lossy(&output.stdout).lines() {
            eprintln!("  {line}");
        }
        anyhow::bail!("{label} failed");
    }
    println!();
    Ok(output)
}

/// Sum every "test result:" line of a cargo test run.
pub fn test_summary(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let (mut passed, mut failed, mut suites) = (0u32, 0u32, 0u32);
    for line in stdout.lines().filter(|l| l.contains("test result:")) {
        suites = suites.saturating_add(1);
        passed = passed.saturating_add(count_before(line, " passed"));
        failed = failed.saturating_add(count_before(line, " failed"));
    }
    if suites == 0 {
        return "(summary not available)".to_string();
    }
    format!("{passed} passed, {failed} failed in {suites} suites")
}

fn count_before(line: &str, marker: &str) -> u32 {
    line.find(marker)
        .and_then(|end| line.get(..end))
        .and_then(|head| head.rsplit(' ').next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_read_from_result_line() {
        let line = "test result: ok. 12 passed; 1 failed; 0 ignored; 0 measured";
        assert_eq!(count_before(line, " passed"), 12);
        assert_eq!(count_before(line, " failed"), 1);
        assert_eq!(count_before(line, " skipped"), 0);
    }
}
