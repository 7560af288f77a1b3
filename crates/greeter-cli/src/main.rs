//! Greeter CLI - prints styled greetings and stores data in plain or encrypted files
//!
//! This is the command-line interface for Greeter. It wires the config file
//! and flags into a `GreetingStore` and runs one command against it.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod ui;

use clap::Parser;

use crate::app::{exit_invalid_config, AppContext};
use crate::cli::{Cli, Commands};
use crate::commands::{handle_demo, handle_greet, handle_paths, handle_store};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = match AppContext::load(&cli) {
        Ok(ctx) => ctx,
        Err(err) => exit_invalid_config(&err),
    };

    let code = match &cli.command {
        None | Some(Commands::Demo) => handle_demo(&ctx)?,
        Some(Commands::Greet { message, encrypt }) => handle_greet(&ctx, message, *encrypt)?,
        Some(Commands::Store { data, target }) => handle_store(&ctx, data, *target)?,
        Some(Commands::Paths) => handle_paths(&ctx)?,
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Log to stderr; stdout is reserved for styled lines and JSON.
fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}
