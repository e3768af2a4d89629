use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;

/// Run the desktop simulator in the foreground.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "🖥 Starting desktop simulator...".cyan().bold());
    println!();

    let status = Command::new("cargo")
        .args(["run", "-p", "firmware", "--example", "desktop_sim", "--features", "emulator"])
        .status()
        .context("Failed to run the desktop simulator")?;

    if !status.success() {
        anyhow::bail!("Simulator exited with {status}");
    }
    Ok(())
}
