//! Seatplan command-line entry point.
//!
//! Reads a seating plan exported as JSON and prints reports about it.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "seatplan", version, about = "Inspect exported seating plans")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that a plan file is well formed and consistent
    Validate { file: PathBuf },
    /// Print guests by table, then everyone without a seat
    Guests { file: PathBuf },
    /// Print seat totals per table
    Summary { file: PathBuf },
    /// Print every seat with its position and occupant
    Seats {
        file: PathBuf,
        /// Only show the table with this number
        #[arg(long)]
        table: Option<u32>,
    },
}

fn run(cli: Cli) -> Result<String, String> {
    match cli.command {
        Command::Validate { file } => commands::validate(&file),
        Command::Guests { file } => commands::guests(&file),
        Command::Summary { file } => commands::summary(&file),
        Command::Seats { file, table } => commands::seats(&file, table),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(message) => {
            log::error!("{}", message);
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}
