//! Connection configuration shared by every session kind.

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::InvalidInputError;
use crate::types::ApiUrl;

/// Connection parameters for an API.
///
/// A configuration is built once by the caller, wrapped in an `Arc`, and
/// never mutated afterwards. Sessions only hold a shared reference to it.
///
/// # Example
///
/// ```
/// use wayfare_core::{ApiUrl, SessionConfiguration};
///
/// let config = SessionConfiguration::new(
///     "client-abc",
///     ApiUrl::new("https://api.example.com").unwrap(),
/// )
/// .unwrap()
/// .with_scopes(["profile", "history"])
/// .with_locale("en-US");
///
/// assert_eq!(config.scope_string(), "profile history");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfiguration {
    client_id: String,
    api_url: ApiUrl,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_url: Option<ApiUrl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    locale: Option<String>,
}

impl SessionConfiguration {
    /// Create a configuration for `client_id` talking to `api_url`.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error if the client id is empty or contains
    /// whitespace.
    pub fn new(client_id: impl Into<String>, api_url: ApiUrl) -> Result<Self> {
        let config = Self {
            client_id: client_id.into(),
            api_url,
            auth_url: None,
            scopes: Vec::new(),
            locale: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Use a separate host for the OAuth2 token endpoint.
    pub fn with_auth_url(mut self, auth_url: ApiUrl) -> Self {
        self.auth_url = Some(auth_url);
        self
    }

    /// Set the scopes requested for credentials.
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the locale sent with each request as `Accept-Language`.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Check invariants that deserialization alone cannot enforce.
    ///
    /// Configurations loaded from files should be validated before use.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.is_empty() {
            return Err(InvalidInputError::ClientId {
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if self.client_id.chars().any(char::is_whitespace) {
            return Err(InvalidInputError::ClientId {
                reason: "must not contain whitespace".to_string(),
            }
            .into());
        }
        if let Some(locale) = &self.locale
            && (locale.is_empty() || locale.chars().any(|c| c.is_control()))
        {
            return Err(InvalidInputError::Other {
                message: format!("invalid locale '{}'", locale),
            }
            .into());
        }
        Ok(())
    }

    /// Returns the OAuth2 client identifier.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the API base URL.
    pub fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the token endpoint host, falling back to the API host.
    pub fn auth_url(&self) -> &ApiUrl {
        self.auth_url.as_ref().unwrap_or(&self.api_url)
    }

    /// Returns the configured scopes.
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Returns the scopes joined with spaces, as OAuth2 expects.
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }

    /// Returns the configured locale.
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }
}
