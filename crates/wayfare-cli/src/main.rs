//! wayfare - CLI tool for authenticated API exploration.
//!
//! A thin wrapper over `wayfare-core` and `wayfare-http`: it stores a
//! configuration and OAuth2 tokens, refreshes them, and sends signed requests.

mod cli;
mod commands;
mod output;
mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use store::Store;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let store = Store::open(cli.data_dir)?;

    match cli.command {
        Commands::Config(cmd) => commands::config::handle(cmd, &store),
        Commands::Token(cmd) => commands::token::handle(cmd, &store).await,
        Commands::Request(args) => commands::request::run(args, &store).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so command output stays pipeable
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
