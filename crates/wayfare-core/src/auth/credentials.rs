//! Authenticator backed by a refreshable credential.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::traits::{Authenticator, Credential};
use crate::{Result, SessionConfiguration};

use super::AuthHeaders;

/// Signs requests with the bearer token of an OAuth2-style credential.
///
/// The authenticator is derived from exactly one `(configuration, credential)`
/// pair and holds shared references to both. Token expiry and refresh are
/// left to the credential.
#[derive(Clone)]
pub struct CredentialsAuthenticator {
    config: Arc<SessionConfiguration>,
    credential: Arc<dyn Credential>,
}

impl CredentialsAuthenticator {
    /// Create an authenticator for the given configuration and credential.
    pub fn new(config: Arc<SessionConfiguration>, credential: Arc<dyn Credential>) -> Self {
        Self { config, credential }
    }

    /// Returns the configuration this authenticator was built from.
    pub fn configuration(&self) -> &Arc<SessionConfiguration> {
        &self.config
    }

    /// Returns the credential this authenticator was built from.
    pub fn credential(&self) -> &Arc<dyn Credential> {
        &self.credential
    }
}

#[async_trait]
impl Authenticator for CredentialsAuthenticator {
    async fn authenticate(&self) -> Result<AuthHeaders> {
        let token = self.credential.access_token().await?;
        AuthHeaders::bearer(token.as_str())?.with_accept_language(self.config.locale())
    }

    fn can_refresh(&self) -> bool {
        self.credential.can_refresh()
    }

    #[instrument(skip(self), fields(client_id = %self.config.client_id()))]
    async fn refresh(&self) -> Result<()> {
        self.credential.refresh().await?;
        debug!("Credential refreshed");
        Ok(())
    }
}

impl fmt::Debug for CredentialsAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsAuthenticator")
            .field("client_id", &self.config.client_id())
            .field("credential", &"[REDACTED]")
            .finish()
    }
}
