//! On-disk storage for the configuration and credential state.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use wayfare_core::{ClientSecret, ServerToken, Session, SessionBuilder, SessionConfiguration};
use wayfare_http::{OAuth2Credential, TokenSnapshot};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

const CONFIG_FILE: &str = "config.json";
const SESSION_FILE: &str = "session.json";

/// Stored credential state.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredCredential {
    #[serde(flatten)]
    pub tokens: TokenSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<ClientSecret>,
}

/// A session assembled from the store.
///
/// `credential` is set for credential-based sessions so refreshed tokens
/// can be written back.
pub struct LoadedSession {
    pub session: Session,
    pub credential: Option<Arc<OAuth2Credential>>,
}

/// The data directory holding `config.json` and `session.json`.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open the store at `dir`, or the platform data directory.
    pub fn open(dir: Option<PathBuf>) -> Result<Self> {
        let dir = match dir {
            Some(dir) => dir,
            None => ProjectDirs::from("", "", "wayfare")
                .context("Could not determine data directory")?
                .data_dir()
                .to_path_buf(),
        };

        fs::create_dir_all(&dir).context("Failed to create data directory")?;

        Ok(Self { dir })
    }

    fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Save the configuration.
    pub fn save_config(&self, config: &SessionConfiguration) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        fs::write(self.config_path(), json).context("Failed to write config file")
    }

    /// Load and validate the configuration.
    pub fn load_config(&self) -> Result<Option<SessionConfiguration>> {
        let path = self.config_path();
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: SessionConfiguration =
            serde_json::from_str(&json).context("Invalid config file")?;
        config.validate().context("Invalid config file")?;

        Ok(Some(config))
    }

    /// Load the configuration, failing with a hint when there is none.
    pub fn require_config(&self) -> Result<SessionConfiguration> {
        self.load_config()?
            .context("No configuration. Run 'wayfare config init' first.")
    }

    /// Save credential state with owner-only permissions.
    pub fn save_credential(&self, stored: &StoredCredential) -> Result<()> {
        let path = self.session_path();
        let json = serde_json::to_string_pretty(stored)?;

        fs::write(&path, &json).context("Failed to write session file")?;
        restrict_permissions(&path)?;

        Ok(())
    }

    /// Load credential state.
    pub fn load_credential(&self) -> Result<Option<StoredCredential>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).context("Failed to read session file")?;
        let stored = serde_json::from_str(&json).context("Invalid session file")?;

        Ok(Some(stored))
    }

    /// Remove stored credential state.
    pub fn clear_credential(&self) -> Result<bool> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path).context("Failed to remove session file")?;
        Ok(true)
    }

    /// Build a session from the stored configuration.
    ///
    /// With `server_token` the session uses that token; otherwise it uses the
    /// stored OAuth2 credential.
    pub fn session(&self, server_token: Option<ServerToken>) -> Result<LoadedSession> {
        let config = Arc::new(self.require_config()?);
        let builder = SessionBuilder::new().configuration(config.clone());

        if let Some(token) = server_token {
            let session = builder.server_token(token).build()?;
            return Ok(LoadedSession {
                session,
                credential: None,
            });
        }

        let stored = self
            .load_credential()?
            .context("No stored tokens. Run 'wayfare token set' or pass --server-token.")?;

        let mut credential = OAuth2Credential::new(&config, stored.tokens)?;
        if let Some(secret) = stored.client_secret {
            credential = credential.with_client_secret(secret);
        }
        let credential = Arc::new(credential);

        let session = builder.credential(credential.clone()).build()?;
        Ok(LoadedSession {
            session,
            credential: Some(credential),
        })
    }

    /// Write the credential's current tokens back, keeping the stored secret.
    pub async fn persist_tokens(&self, credential: &OAuth2Credential) -> Result<()> {
        let client_secret = self
            .load_credential()?
            .and_then(|stored| stored.client_secret);

        self.save_credential(&StoredCredential {
            tokens: credential.snapshot().await,
            client_secret,
        })
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o600);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
