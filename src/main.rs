mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    let result = match &args.command {
        // No subcommand: run the interactive session.
        None => cli::commands::run::execute(args.file.as_deref(), args.config.as_deref()),
        Some(Commands::Log { since, last, json }) => {
            cli::commands::log::execute(since.as_deref(), *last, *json, args.config.as_deref())
        }
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
