//! Workspace quality checks for the highway routing crates.
//!
//! # Commands
//!
//! - `cargo xtask check` - Run all quality checks
//! - `cargo xtask check --ci` - Same, exiting non-zero on any failure
//! - `cargo xtask ci` - Full CI suite, including benches compiling and the demo
//!
//! # Checks
//!
//! 1. Formatting
//! 2. Clippy - Zero warnings
//! 3. Tests, with and without the `serde` feature
//! 4. Documentation - Zero warnings
//! 5. Safety - Zero unwrap/expect in library code

mod check;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Quality checks for the routing workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Quality checks for the routing workspace", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all quality checks across the workspace
    Check {
        /// Run in CI mode (fails on any issue)
        #[arg(long)]
        ci: bool,
    },

    /// Run full CI suite
    Ci,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { ci } => check::run(ci),
        Commands::Ci => check::run_ci(),
    }
}
