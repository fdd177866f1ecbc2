//! Refreshable credential trait.

use async_trait::async_trait;

use crate::error::AuthError;
use crate::{AccessToken, Result};

/// Anything that can yield a current bearer token and refresh itself.
///
/// Sessions hold credentials as `Arc<dyn Credential>` and never copy them,
/// so state changes inside a credential (for example a refresh triggered by
/// another session sharing it) are visible to every holder.
///
/// Implementations are responsible for their own thread safety.
#[async_trait]
pub trait Credential: Send + Sync {
    /// Returns a token that is valid now, refreshing first if it has expired.
    async fn access_token(&self) -> Result<AccessToken>;

    /// Returns true if [`Credential::refresh`] can obtain a new token.
    fn can_refresh(&self) -> bool {
        false
    }

    /// Force a refresh and return the new access token.
    async fn refresh(&self) -> Result<AccessToken> {
        Err(AuthError::NotRefreshable.into())
    }
}
