//! Request authenticator trait.

use async_trait::async_trait;

use crate::Result;
use crate::auth::AuthHeaders;
use crate::error::AuthError;

/// Produces the headers that authenticate one outgoing request.
///
/// HTTP layers ask the authenticator for headers before every request and
/// call [`Authenticator::refresh`] at most once when the server answers
/// `401 Unauthorized`.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Returns the headers to attach to the next request.
    async fn authenticate(&self) -> Result<AuthHeaders>;

    /// Returns true if a rejected request may succeed after [`Authenticator::refresh`].
    fn can_refresh(&self) -> bool {
        false
    }

    /// Refresh the underlying authentication material.
    async fn refresh(&self) -> Result<()> {
        Err(AuthError::NotRefreshable.into())
    }
}
