//! In-memory credential for externally managed tokens.

use std::fmt;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::traits::Credential;
use crate::{AccessToken, Result};

/// A credential whose token is managed outside the SDK.
///
/// The token can be swapped with [`StaticCredential::set_access_token`];
/// sessions already holding the credential pick up the new value on their
/// next request. It cannot refresh itself.
///
/// # Example
///
/// ```
/// use wayfare_core::StaticCredential;
///
/// let credential = StaticCredential::new("tok-123");
/// credential.set_access_token("tok-456");
/// ```
pub struct StaticCredential {
    token: RwLock<AccessToken>,
}

impl StaticCredential {
    /// Create a credential that always yields `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(AccessToken::new(token)),
        }
    }

    /// Replace the token.
    pub fn set_access_token(&self, token: impl Into<String>) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = AccessToken::new(token);
    }
}

#[async_trait]
impl Credential for StaticCredential {
    async fn access_token(&self) -> Result<AccessToken> {
        let guard = self.token.read().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }
}

impl fmt::Debug for StaticCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredential")
            .field("token", &"[REDACTED]")
            .finish()
    }
}
