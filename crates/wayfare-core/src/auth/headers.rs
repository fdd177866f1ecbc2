//! Authentication headers produced by authenticators.

use std::fmt;

use crate::Result;
use crate::error::InvalidInputError;

/// Header name for the authorization value.
pub const AUTHORIZATION: &str = "authorization";

/// Header name for the requested response language.
pub const ACCEPT_LANGUAGE: &str = "accept-language";

/// The headers that authenticate a single request.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    authorization: String,
    accept_language: Option<String>,
}

impl AuthHeaders {
    /// Build headers carrying `Authorization: Bearer <token>`.
    pub fn bearer(token: &str) -> Result<Self> {
        Self::with_scheme("Bearer", token)
    }

    /// Build headers carrying `Authorization: <scheme> <token>`.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error if the token cannot be sent in a header.
    pub fn with_scheme(scheme: &str, token: &str) -> Result<Self> {
        let authorization = format!("{} {}", scheme, token);
        check_header_value(AUTHORIZATION, &authorization)?;
        Ok(Self {
            authorization,
            accept_language: None,
        })
    }

    /// Add an `Accept-Language` header.
    pub fn with_accept_language(mut self, locale: Option<&str>) -> Result<Self> {
        if let Some(locale) = locale {
            check_header_value(ACCEPT_LANGUAGE, locale)?;
            self.accept_language = Some(locale.to_string());
        }
        Ok(self)
    }

    /// Returns the full `Authorization` header value.
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    /// Returns the `Accept-Language` header value, if any.
    pub fn accept_language(&self) -> Option<&str> {
        self.accept_language.as_deref()
    }

    /// Iterate over `(name, value)` pairs in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        std::iter::once((AUTHORIZATION, self.authorization.as_str())).chain(
            self.accept_language
                .as_deref()
                .map(|value| (ACCEPT_LANGUAGE, value)),
        )
    }
}

// Only the scheme of the authorization value is shown
impl fmt::Debug for AuthHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = self
            .authorization
            .split_once(' ')
            .map_or("", |(scheme, _)| scheme);
        f.debug_struct("AuthHeaders")
            .field("authorization", &format_args!("{} [REDACTED]", scheme))
            .field("accept_language", &self.accept_language)
            .finish()
    }
}

/// Visible ASCII, space and tab only.
fn check_header_value(header: &'static str, value: &str) -> Result<()> {
    let valid = value
        .bytes()
        .all(|b| b == b'\t' || (0x20..=0x7e).contains(&b));
    if valid {
        Ok(())
    } else {
        Err(InvalidInputError::HeaderValue { header }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_header_value() {
        let headers = AuthHeaders::bearer("tok-123").unwrap();
        assert_eq!(headers.authorization(), "Bearer tok-123");
        assert_eq!(headers.accept_language(), None);
    }

    #[test]
    fn iter_lists_authorization_first() {
        let headers = AuthHeaders::bearer("tok")
            .unwrap()
            .with_accept_language(Some("de-DE"))
            .unwrap();
        let pairs: Vec<_> = headers.iter().collect();
        assert_eq!(
            pairs,
            vec![(AUTHORIZATION, "Bearer tok"), (ACCEPT_LANGUAGE, "de-DE")]
        );
    }

    #[test]
    fn rejects_control_characters() {
        let err = AuthHeaders::bearer("tok\r\nX-Injected: 1").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn debug_hides_token() {
        let headers = AuthHeaders::with_scheme("Token", "server-secret").unwrap();
        let debug = format!("{:?}", headers);
        assert!(debug.contains("Token [REDACTED]"));
        assert!(!debug.contains("server-secret"));
    }
}
