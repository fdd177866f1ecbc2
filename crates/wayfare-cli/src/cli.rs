//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::config::ConfigCommand;
use crate::commands::request::RequestArgs;
use crate::commands::token::TokenCommand;

/// Authenticated API exploration with OAuth2 or server-token sessions.
#[derive(Parser, Debug)]
#[command(name = "wayfare")]
#[command(author, version = env!("WAYFARE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Directory holding config.json and session.json
    #[arg(long, global = true, env = "WAYFARE_HOME")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the connection configuration
    Config(ConfigCommand),

    /// Manage stored OAuth2 tokens
    Token(TokenCommand),

    /// Send an authenticated request
    Request(RequestArgs),
}
