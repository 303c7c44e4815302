//! Entry point for the runconfig command-line tool.

mod cli;
mod commands;

use std::io::IsTerminal;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    // Respects RUST_LOG; capability clamps are warnings, so show those by default.
    if let Err(e) = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init()
    {
        eprintln!("Failed to initialize tracing: {}", e);
    }

    let cli = Cli::parse();
    let global = cli.global;

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args, &global),
        Commands::Args(args) => commands::args::execute(args, &global),
        Commands::Info(args) => commands::info::execute(args, &global),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
