//! Authenticators and the headers they produce.
//!
//! Each session kind owns exactly one authenticator: a
//! [`CredentialsAuthenticator`] for OAuth2-style credentials or a
//! [`ServerTokenAuthenticator`] for a static server token.

mod credentials;
mod headers;
mod server_token;
mod static_credential;

pub use credentials::CredentialsAuthenticator;
pub use headers::{ACCEPT_LANGUAGE, AUTHORIZATION, AuthHeaders};
pub use server_token::{SERVER_TOKEN_SCHEME, ServerTokenAuthenticator};
pub use static_credential::StaticCredential;
