//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated base URL for an API or token endpoint host.
///
/// The URL must be absolute with a host, and use HTTPS. Plain HTTP is only
/// accepted for loopback hosts so local test servers work.
///
/// # Example
///
/// ```
/// use wayfare_core::ApiUrl;
///
/// let api = ApiUrl::new("https://api.example.com").unwrap();
/// assert_eq!(api.endpoint("/v1.2/me"), "https://api.example.com/v1.2/me");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::Url {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the full URL for a path below this base.
    ///
    /// Leading slashes on `path` and trailing slashes on the base are
    /// collapsed so exactly one separator remains.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns true if the host is a loopback address.
    pub fn is_loopback(&self) -> bool {
        is_loopback_host(&self.0)
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::Url {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::Url {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        if scheme != "https" && !(scheme == "http" && is_loopback_host(url)) {
            return Err(InvalidInputError::Url {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for loopback hosts)".to_string(),
            }
            .into());
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::Url {
                value: original.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

fn is_loopback_host(url: &Url) -> bool {
    url.host_str()
        .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]")
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let api = ApiUrl::new("https://api.example.com").unwrap();
        assert_eq!(api.host(), Some("api.example.com"));
        assert!(!api.is_loopback());
    }

    #[test]
    fn valid_loopback_http() {
        let api = ApiUrl::new("http://127.0.0.1:8080").unwrap();
        assert!(api.is_loopback());
    }

    #[test]
    fn endpoint_joins_with_single_slash() {
        let api = ApiUrl::new("https://api.example.com/").unwrap();
        assert_eq!(
            api.endpoint("/oauth/v2/token"),
            "https://api.example.com/oauth/v2/token"
        );
        assert_eq!(api.endpoint("v1/me"), "https://api.example.com/v1/me");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let api = ApiUrl::new("https://example.com/api").unwrap();
        assert_eq!(api.endpoint("/me"), "https://example.com/api/me");
    }

    #[test]
    fn invalid_http_non_loopback() {
        assert!(ApiUrl::new("http://api.example.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/v1/me").is_err());
    }

    #[test]
    fn rejects_query_string() {
        assert!(ApiUrl::new("https://api.example.com?x=1").is_err());
    }

    #[test]
    fn deserializes_with_validation() {
        let ok: ApiUrl = serde_json::from_str("\"https://api.example.com\"").unwrap();
        assert_eq!(ok.host(), Some("api.example.com"));
        assert!(serde_json::from_str::<ApiUrl>("\"ftp://example.com\"").is_err());
    }
}
