//! wayfare-core - Sessions, credentials and authenticators.
//!
//! A [`Session`] binds an immutable [`SessionConfiguration`] to exactly one
//! authentication mode and owns the [`Authenticator`] for that mode. HTTP
//! layers only ever talk to the authenticator.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use wayfare_core::{ApiUrl, Authenticator, CredentialsSession, SessionConfiguration, StaticCredential};
//!
//! # async fn example() -> wayfare_core::Result<()> {
//! let config = Arc::new(SessionConfiguration::new(
//!     "client-abc",
//!     ApiUrl::new("https://api.example.com")?,
//! )?);
//! let session = CredentialsSession::new(config, Arc::new(StaticCredential::new("tok-123")));
//!
//! let headers = session.authenticator().authenticate().await?;
//! assert_eq!(headers.authorization(), "Bearer tok-123");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod session;
pub mod tokens;
pub mod traits;
pub mod types;

pub use auth::{AuthHeaders, CredentialsAuthenticator, ServerTokenAuthenticator, StaticCredential};
pub use config::SessionConfiguration;
pub use error::Error;
pub use session::{AuthMode, CredentialsSession, ServerTokenSession, Session, SessionBuilder};
pub use tokens::{AccessToken, ClientSecret, RefreshToken, ServerToken};
pub use traits::{Authenticator, Credential};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
