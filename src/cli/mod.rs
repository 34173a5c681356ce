pub mod commands;
pub mod output;
pub mod prompt;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Console employee record manager with a persistent audit trail.
///
/// Run without a subcommand to start the interactive session.
#[derive(Parser, Debug)]
#[command(name = "roster", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the employee records file (overrides the config)
    #[arg(long, global = true, env = "ROSTER_FILE")]
    pub file: Option<PathBuf>,

    /// Path to an alternative configuration file
    #[arg(long, global = true, env = "ROSTER_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the audit history
    Log {
        /// Only show entries at or after this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,

        /// Only show the last N entries
        #[arg(long, value_name = "N")]
        last: Option<usize>,

        /// Emit entries as JSON lines instead of the readable listing
        #[arg(long)]
        json: bool,
    },
}
