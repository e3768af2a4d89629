// Desktop/tooling crate: unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod check;
mod doc;
mod flash;
mod sim;
mod step;
mod test;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Cross-compilation target of the STM32F103C8 (Cortex-M3).
pub const TARGET: &str = "thumbv7m-none-eabi";

/// probe-rs chip name.
pub const CHIP: &str = "STM32F103C8";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "LoadScale firmware development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flash firmware to the STM32F103C8 via probe-rs
    Flash {
        /// Build and flash release version
        #[arg(short, long)]
        release: bool,
    },
    /// Run the desktop simulator (OLED window, scripted presses)
    Sim,
    /// Check firmware builds for both hardware and emulator targets
    Check,
    /// Run all tests (unit, integration, property and doc tests)
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
    /// Build and optionally open documentation
    Doc {
        /// Open documentation in browser
        #[arg(long)]
        open: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Flash { release } => flash::run(release),
        Commands::Sim => sim::run(),
        Commands::Check => check::run(),
        Commands::Test { unit, integration } => test::run(unit, integration),
        Commands::Doc { open } => doc::run(open),
    }
}
