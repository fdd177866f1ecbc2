//! Authenticator backed by a static server token.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::traits::Authenticator;
use crate::{Result, ServerToken, SessionConfiguration};

use super::AuthHeaders;

/// Authorization scheme used for server tokens.
pub const SERVER_TOKEN_SCHEME: &str = "Token";

/// Signs requests with a static server token. Cannot be refreshed.
#[derive(Clone)]
pub struct ServerTokenAuthenticator {
    config: Arc<SessionConfiguration>,
    token: ServerToken,
}

impl ServerTokenAuthenticator {
    pub fn new(config: Arc<SessionConfiguration>, token: ServerToken) -> Self {
        Self { config, token }
    }

    pub fn configuration(&self) -> &Arc<SessionConfiguration> {
        &self.config
    }
}

#[async_trait]
impl Authenticator for ServerTokenAuthenticator {
    async fn authenticate(&self) -> Result<AuthHeaders> {
        AuthHeaders::with_scheme(SERVER_TOKEN_SCHEME, self.token.as_str())?
            .with_accept_language(self.config.locale())
    }
}

impl fmt::Debug for ServerTokenAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerTokenAuthenticator")
            .field("client_id", &self.config.client_id())
            .field("token", &self.token)
            .finish()
    }
}
