//! Authenticated request command.

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use wayfare_core::ServerToken;
use wayfare_http::{ApiClient, Method};

use crate::output;
use crate::store::Store;

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    pub method: String,

    /// Path below the API base URL, e.g. /v1.2/me
    pub path: String,

    /// JSON request body
    #[arg(long)]
    pub data: Option<String>,

    /// Authenticate with a server token instead of the stored credential
    #[arg(long, env = "WAYFARE_SERVER_TOKEN", hide_env_values = true)]
    pub server_token: Option<String>,
}

pub async fn run(args: RequestArgs, store: &Store) -> Result<()> {
    let method = Method::from_bytes(args.method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("Invalid HTTP method '{}'", args.method))?;

    let body: Option<serde_json::Value> = args
        .data
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .context("Request body is not valid JSON")?;

    let loaded = store.session(args.server_token.map(ServerToken::new))?;
    debug!(mode = %loaded.session.mode(), %method, path = %args.path, "Sending request");
    let client = ApiClient::new(loaded.session)?;

    let result = client.send_json(method, &args.path, body.as_ref()).await;

    // Tokens may have been refreshed even if the request itself failed
    if let Some(credential) = &loaded.credential {
        store
            .persist_tokens(credential)
            .await
            .context("Failed to save refreshed tokens")?;
    }

    match result.context("Request failed")? {
        Some(value) => output::json_pretty(&value),
        None => {
            output::success("No content");
            Ok(())
        }
    }
}
