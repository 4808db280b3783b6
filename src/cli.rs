//! CLI argument parsing for the tripline-worker binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tripline-worker", about = "Tripline trip planner backend worker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the worker server (default if no subcommand given)
    Serve,
    /// Run database migrations and exit
    Migrate,
    /// Suggest days for places read from a JSON file and print them
    Suggest {
        /// JSON array of places
        #[arg(long)]
        input: PathBuf,
    },
}
