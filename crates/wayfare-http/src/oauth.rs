//! OAuth2 credential that refreshes itself at the token endpoint.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, trace};

use wayfare_core::error::{AuthError, Error, ProtocolError};
use wayfare_core::{
    AccessToken, ClientSecret, Credential, RefreshToken, Result, SessionConfiguration,
};

use crate::error::{ErrorBody, transport};

/// Path of the token endpoint below the configured auth URL.
pub const TOKEN_PATH: &str = "/oauth/v2/token";

/// Tokens expiring within this window are treated as already expired.
const EXPIRY_SKEW_SECS: i64 = 60;

/// Persistable token state of an [`OAuth2Credential`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSnapshot {
    pub access_token: AccessToken,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<RefreshToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenSnapshot {
    /// Create a snapshot for an access token with no refresh token or expiry.
    pub fn new(access_token: AccessToken) -> Self {
        Self {
            access_token,
            refresh_token: None,
            expires_at: None,
        }
    }

    /// Returns true if the access token expires before `now + skew`.
    fn is_stale(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .is_some_and(|at| at <= now + Duration::seconds(EXPIRY_SKEW_SECS))
    }
}

/// Returns `now + secs`, or `None` if the result is not representable.
pub fn expiry_after(now: DateTime<Utc>, secs: i64) -> Option<DateTime<Utc>> {
    now.checked_add_signed(Duration::try_seconds(secs)?)
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

/// An OAuth2 access token plus the material needed to refresh it.
///
/// [`Credential::access_token`] returns the cached token until it is within
/// a minute of expiry, then exchanges the refresh token first. Concurrent
/// callers share a single in-flight refresh.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use wayfare_core::{AccessToken, ApiUrl, CredentialsSession, RefreshToken, SessionConfiguration};
/// use wayfare_http::{OAuth2Credential, TokenSnapshot};
///
/// # fn example() -> wayfare_core::Result<()> {
/// let config = Arc::new(SessionConfiguration::new(
///     "client-abc",
///     ApiUrl::new("https://api.example.com")?,
/// )?);
/// let mut tokens = TokenSnapshot::new(AccessToken::new("access"));
/// tokens.refresh_token = Some(RefreshToken::new("refresh"));
///
/// let credential = OAuth2Credential::new(&config, tokens)?;
/// let session = CredentialsSession::new(config, Arc::new(credential));
/// # Ok(())
/// # }
/// ```
pub struct OAuth2Credential {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: Option<ClientSecret>,
    tokens: RwLock<TokenSnapshot>,
    refresh_lock: Mutex<()>,
}

impl OAuth2Credential {
    /// Create a credential for `config` starting from `tokens`.
    ///
    /// No request is made until the token is needed.
    pub fn new(config: &SessionConfiguration, tokens: TokenSnapshot) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("wayfare/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport)?;

        Ok(Self::with_http_client(config, tokens, client))
    }

    /// Create a credential that sends refresh requests through `client`.
    pub fn with_http_client(
        config: &SessionConfiguration,
        tokens: TokenSnapshot,
        client: reqwest::Client,
    ) -> Self {
        Self {
            client,
            token_url: config.auth_url().endpoint(TOKEN_PATH),
            client_id: config.client_id().to_string(),
            client_secret: None,
            tokens: RwLock::new(tokens),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Authenticate refresh requests with a client secret.
    pub fn with_client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Export the current token state for persistence.
    ///
    /// # Security
    ///
    /// The snapshot grants access to the account. Store it securely.
    pub async fn snapshot(&self) -> TokenSnapshot {
        self.tokens.read().await.clone()
    }

    /// Returns when the current access token expires, if known.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.tokens.read().await.expires_at
    }

    /// Exchange the refresh token for new tokens and store them.
    #[instrument(skip(self), fields(client_id = %self.client_id))]
    async fn exchange(&self) -> Result<AccessToken> {
        let refresh_token = self
            .tokens
            .read()
            .await
            .refresh_token
            .clone()
            .ok_or(AuthError::RefreshTokenMissing)?;

        info!("Refreshing access token");

        let mut form = vec![
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
            ("client_id", self.client_id.as_str()),
        ];
        if let Some(secret) = &self.client_secret {
            form.push(("client_secret", secret.as_str()));
        }

        let response = self
            .client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        trace!(status = %status, "Token endpoint response");

        if !status.is_success() {
            let status = status.as_u16();
            let body = response.json::<ErrorBody>().await.unwrap_or_default();
            let invalid_grant = body.code.as_deref() == Some("invalid_grant")
                || body.error.as_deref() == Some("invalid_grant");
            if matches!(status, 400 | 401) && invalid_grant {
                return Err(AuthError::RefreshTokenInvalid.into());
            }
            return Err(Error::Protocol(ProtocolError::new(
                status,
                body.code().map(str::to_string),
                body.message().map(str::to_string),
            )));
        }

        let body: TokenResponse = response.json().await.map_err(transport)?;
        if let Some(token_type) = &body.token_type
            && !token_type.eq_ignore_ascii_case("bearer")
        {
            return Err(Error::Protocol(ProtocolError::new(
                status.as_u16(),
                Some("unsupported_token_type".to_string()),
                Some(format!("expected a bearer token, got '{}'", token_type)),
            )));
        }

        let expires_at = match body.expires_in {
            Some(secs) => Some(expiry_after(Utc::now(), secs).ok_or_else(|| {
                Error::Protocol(ProtocolError::new(
                    status.as_u16(),
                    Some("invalid_expires_in".to_string()),
                    Some(format!("expires_in {} is out of range", secs)),
                ))
            })?),
            None => None,
        };

        let access_token = AccessToken::new(body.access_token);
        {
            let mut tokens = self.tokens.write().await;
            tokens.access_token = access_token.clone();
            if let Some(refresh) = body.refresh_token {
                tokens.refresh_token = Some(RefreshToken::new(refresh));
            }
            tokens.expires_at = expires_at;
        }

        debug!(scope = ?body.scope, expires_in = ?body.expires_in, "Access token refreshed");
        Ok(access_token)
    }
}

#[async_trait]
impl Credential for OAuth2Credential {
    async fn access_token(&self) -> Result<AccessToken> {
        {
            let tokens = self.tokens.read().await;
            if !tokens.is_stale(Utc::now()) {
                return Ok(tokens.access_token.clone());
            }
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited
        {
            let tokens = self.tokens.read().await;
            if !tokens.is_stale(Utc::now()) {
                return Ok(tokens.access_token.clone());
            }
        }

        self.exchange().await
    }

    fn can_refresh(&self) -> bool {
        self.tokens
            .try_read()
            .map(|tokens| tokens.refresh_token.is_some())
            .unwrap_or(true)
    }

    async fn refresh(&self) -> Result<AccessToken> {
        let seen = self.tokens.read().await.access_token.clone();

        let _guard = self.refresh_lock.lock().await;

        {
            let tokens = self.tokens.read().await;
            if tokens.access_token != seen && !tokens.is_stale(Utc::now()) {
                return Ok(tokens.access_token.clone());
            }
        }

        self.exchange().await
    }
}

impl fmt::Debug for OAuth2Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2Credential")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
