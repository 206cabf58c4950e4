//! # Student Cleaner Entry Point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Initialize logging (console + log files)
//!   └─> Execute the command
//! ```
//!
//! ```bash
//! student_cleaner clean --input Students_Performance.csv
//! student_cleaner inspect --input Students_Performance.csv
//! student_cleaner config > cleaning.json
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // Allow println! in main binary

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Printing the default config should stay clean for shell redirection
    if !matches!(cli.command, cli::Commands::Config) {
        student_cleaner::logging::init(cli.log_dir.as_deref())?;
    }

    cli::run_command(cli.command)
}
