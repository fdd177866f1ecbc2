//! Sessions: how a client authenticates its requests.
//!
//! A [`Session`] is either credential-based or server-token-based, never both
//! and never neither. Each variant owns the authenticator for its mode.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::auth::{CredentialsAuthenticator, ServerTokenAuthenticator};
use crate::error::InvalidInputError;
use crate::traits::{Authenticator, Credential};
use crate::{Result, ServerToken, SessionConfiguration};

/// The authentication mode of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// OAuth2-style refreshable credential.
    Credentials,
    /// Static server token.
    ServerToken,
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::Credentials => f.write_str("credentials"),
            AuthMode::ServerToken => f.write_str("server-token"),
        }
    }
}

/// A session bound to a configuration and one authentication mode.
///
/// Sessions are cheap to clone; clones share the same authenticator.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use wayfare_core::{ApiUrl, CredentialsSession, Session, SessionConfiguration, StaticCredential};
///
/// let config = Arc::new(
///     SessionConfiguration::new("client-abc", ApiUrl::new("https://api.example.com").unwrap())
///         .unwrap(),
/// );
/// let session: Session = CredentialsSession::new(config, Arc::new(StaticCredential::new("tok"))).into();
/// assert_eq!(session.mode(), wayfare_core::AuthMode::Credentials);
/// ```
#[derive(Debug, Clone)]
pub enum Session {
    Credentials(CredentialsSession),
    ServerToken(ServerTokenSession),
}

impl Session {
    /// Returns the configuration shared by the session.
    pub fn configuration(&self) -> &Arc<SessionConfiguration> {
        match self {
            Session::Credentials(session) => session.configuration(),
            Session::ServerToken(session) => session.configuration(),
        }
    }

    /// Returns which authentication mode is active.
    pub fn mode(&self) -> AuthMode {
        match self {
            Session::Credentials(_) => AuthMode::Credentials,
            Session::ServerToken(_) => AuthMode::ServerToken,
        }
    }

    /// Returns the authenticator that signs requests for this session.
    pub fn authenticator(&self) -> &dyn Authenticator {
        match self {
            Session::Credentials(session) => session.authenticator(),
            Session::ServerToken(session) => session.authenticator(),
        }
    }

    /// Returns the credentials session, if that mode is active.
    pub fn as_credentials(&self) -> Option<&CredentialsSession> {
        match self {
            Session::Credentials(session) => Some(session),
            _ => None,
        }
    }

    /// Returns the server-token session, if that mode is active.
    pub fn as_server_token(&self) -> Option<&ServerTokenSession> {
        match self {
            Session::ServerToken(session) => Some(session),
            _ => None,
        }
    }
}

impl From<CredentialsSession> for Session {
    fn from(session: CredentialsSession) -> Self {
        Session::Credentials(session)
    }
}

impl From<ServerTokenSession> for Session {
    fn from(session: ServerTokenSession) -> Self {
        Session::ServerToken(session)
    }
}

/// A session that authenticates with a refreshable OAuth2-style credential.
///
/// Construction is synchronous and performs no I/O. The configuration and
/// the credential are captured by reference (`Arc`), never copied: a change
/// inside the credential after construction is seen by the session.
#[derive(Debug, Clone)]
pub struct CredentialsSession {
    inner: Arc<CredentialsAuthenticator>,
}

impl CredentialsSession {
    /// Bind `config` and `credential` into a session.
    pub fn new(config: Arc<SessionConfiguration>, credential: Arc<dyn Credential>) -> Self {
        debug!(client_id = %config.client_id(), "Creating credentials session");
        Self {
            inner: Arc::new(CredentialsAuthenticator::new(config, credential)),
        }
    }

    /// Returns the configuration the session was built from.
    pub fn configuration(&self) -> &Arc<SessionConfiguration> {
        self.inner.configuration()
    }

    /// Returns the credential the session was built from.
    pub fn credential(&self) -> &Arc<dyn Credential> {
        self.inner.credential()
    }

    /// Returns the authenticator derived from the configuration and credential.
    pub fn authenticator(&self) -> &CredentialsAuthenticator {
        &self.inner
    }
}

/// A session that authenticates with a static server token.
#[derive(Debug, Clone)]
pub struct ServerTokenSession {
    inner: Arc<ServerTokenAuthenticator>,
}

impl ServerTokenSession {
    /// Bind `config` and `token` into a session.
    pub fn new(config: Arc<SessionConfiguration>, token: ServerToken) -> Self {
        debug!(client_id = %config.client_id(), "Creating server token session");
        Self {
            inner: Arc::new(ServerTokenAuthenticator::new(config, token)),
        }
    }

    /// Returns the configuration the session was built from.
    pub fn configuration(&self) -> &Arc<SessionConfiguration> {
        self.inner.configuration()
    }

    /// Returns the authenticator that attaches the server token.
    pub fn authenticator(&self) -> &ServerTokenAuthenticator {
        &self.inner
    }
}

/// Assembles a [`Session`] from parts that may be absent.
///
/// Useful when the parts come from files or flags. Validation happens in
/// [`SessionBuilder::build`], before any authenticator is created; absent
/// parts are reported, never defaulted.
#[derive(Default)]
pub struct SessionBuilder {
    configuration: Option<Arc<SessionConfiguration>>,
    credential: Option<Arc<dyn Credential>>,
    server_token: Option<ServerToken>,
}

impl SessionBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the connection configuration.
    pub fn configuration(mut self, configuration: impl Into<Arc<SessionConfiguration>>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }

    /// Use a refreshable credential for authentication.
    pub fn credential(mut self, credential: Arc<dyn Credential>) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Use a static server token for authentication.
    pub fn server_token(mut self, token: ServerToken) -> Self {
        self.server_token = Some(token);
        self
    }

    /// Build the session.
    ///
    /// # Errors
    ///
    /// - `MissingArgument { name: "configuration" }` without a configuration
    /// - `MissingArgument { name: "credential" }` without a credential or server token
    /// - `ConflictingAuthModes` when both a credential and a server token are set
    pub fn build(self) -> Result<Session> {
        let configuration = self
            .configuration
            .ok_or(InvalidInputError::MissingArgument {
                name: "configuration",
            })?;

        match (self.credential, self.server_token) {
            (Some(credential), None) => {
                Ok(CredentialsSession::new(configuration, credential).into())
            }
            (None, Some(token)) => Ok(ServerTokenSession::new(configuration, token).into()),
            (Some(_), Some(_)) => Err(InvalidInputError::ConflictingAuthModes.into()),
            (None, None) => Err(InvalidInputError::MissingArgument { name: "credential" }.into()),
        }
    }
}

impl fmt::Debug for SessionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionBuilder")
            .field("configuration", &self.configuration)
            .field("credential", &self.credential.as_ref().map(|_| "[REDACTED]"))
            .field("server_token", &self.server_token)
            .finish()
    }
}
