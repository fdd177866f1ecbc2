//! Configuration commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use wayfare_core::{ApiUrl, SessionConfiguration};

use crate::output;
use crate::store::Store;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Write a new configuration
    Init(InitArgs),

    /// Print the stored configuration
    Show,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// OAuth2 client identifier
    #[arg(long)]
    pub client_id: String,

    /// API base URL
    #[arg(long)]
    pub api_url: String,

    /// Token endpoint host, if different from the API host
    #[arg(long)]
    pub auth_url: Option<String>,

    /// Scope to request (repeatable)
    #[arg(long = "scope")]
    pub scopes: Vec<String>,

    /// Locale sent as Accept-Language
    #[arg(long)]
    pub locale: Option<String>,
}

pub fn handle(cmd: ConfigCommand, store: &Store) -> Result<()> {
    match cmd.command {
        ConfigSubcommand::Init(args) => init(args, store),
        ConfigSubcommand::Show => show(store),
    }
}

fn init(args: InitArgs, store: &Store) -> Result<()> {
    let api_url = ApiUrl::new(&args.api_url).context("Invalid API URL")?;
    let mut config = SessionConfiguration::new(args.client_id, api_url)
        .context("Invalid configuration")?
        .with_scopes(args.scopes);

    if let Some(auth_url) = args.auth_url {
        config = config.with_auth_url(ApiUrl::new(&auth_url).context("Invalid auth URL")?);
    }
    if let Some(locale) = args.locale {
        config = config.with_locale(locale);
        config.validate().context("Invalid configuration")?;
    }

    store.save_config(&config)?;

    output::success("Configuration saved");
    output::field("Client", config.client_id());
    output::field("API", config.api_url().as_str());

    Ok(())
}

fn show(store: &Store) -> Result<()> {
    let config = store.require_config()?;
    output::json_pretty(&config)
}
