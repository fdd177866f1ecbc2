//! Token commands.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Subcommand};
use colored::Colorize;

use wayfare_core::{AccessToken, ClientSecret, Credential, RefreshToken};
use wayfare_http::{TokenSnapshot, expiry_after};

use crate::output;
use crate::store::{Store, StoredCredential};

#[derive(Args, Debug)]
pub struct TokenCommand {
    #[command(subcommand)]
    pub command: TokenSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TokenSubcommand {
    /// Store tokens obtained elsewhere
    Set(SetArgs),

    /// Exchange the refresh token for new tokens
    Refresh,

    /// Display stored token metadata
    Show,

    /// Delete stored tokens
    Clear,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// OAuth2 access token
    #[arg(long)]
    pub access_token: String,

    /// OAuth2 refresh token
    #[arg(long)]
    pub refresh_token: Option<String>,

    /// Seconds until the access token expires
    #[arg(long)]
    pub expires_in: Option<i64>,

    /// OAuth2 client secret used for refreshing
    #[arg(long)]
    pub client_secret: Option<String>,
}

pub async fn handle(cmd: TokenCommand, store: &Store) -> Result<()> {
    match cmd.command {
        TokenSubcommand::Set(args) => set(args, store),
        TokenSubcommand::Refresh => refresh(store).await,
        TokenSubcommand::Show => show(store),
        TokenSubcommand::Clear => clear(store),
    }
}

fn set(args: SetArgs, store: &Store) -> Result<()> {
    let mut tokens = TokenSnapshot::new(AccessToken::new(args.access_token));
    tokens.refresh_token = args.refresh_token.map(RefreshToken::new);
    tokens.expires_at = match args.expires_in {
        Some(secs) => Some(
            expiry_after(Utc::now(), secs)
                .with_context(|| format!("--expires-in {} is out of range", secs))?,
        ),
        None => None,
    };

    store.save_credential(&StoredCredential {
        tokens,
        client_secret: args.client_secret.map(ClientSecret::new),
    })?;

    output::success("Tokens saved");
    Ok(())
}

async fn refresh(store: &Store) -> Result<()> {
    let loaded = store.session(None)?;
    let credential = loaded
        .credential
        .context("Stored session is not credential-based")?;

    eprintln!("{}", "Refreshing tokens...".dimmed());

    credential
        .refresh()
        .await
        .context("Failed to refresh tokens")?;

    store
        .persist_tokens(&credential)
        .await
        .context("Failed to save refreshed tokens")?;

    output::success("Tokens refreshed");
    if let Some(expires_at) = credential.expires_at().await {
        output::field("Expires", &expires_at.to_rfc3339());
    }

    Ok(())
}

fn show(store: &Store) -> Result<()> {
    let stored = store
        .load_credential()?
        .context("No stored tokens. Run 'wayfare token set' first.")?;

    let yes_no = |present: bool| if present { "yes" } else { "no" };

    output::field("Access token", yes_no(true));
    output::field("Refresh token", yes_no(stored.tokens.refresh_token.is_some()));
    output::field("Client secret", yes_no(stored.client_secret.is_some()));
    match stored.tokens.expires_at {
        Some(at) if at <= Utc::now() => {
            output::field("Expires", &format!("{} (expired)", at.to_rfc3339()))
        }
        Some(at) => output::field("Expires", &at.to_rfc3339()),
        None => output::field("Expires", "unknown"),
    }

    Ok(())
}

fn clear(store: &Store) -> Result<()> {
    if store.clear_credential()? {
        output::success("Tokens removed");
    } else {
        output::warn("No stored tokens");
    }
    Ok(())
}
