//! wayfare-http - HTTP transport for wayfare sessions.
//!
//! [`ApiClient`] signs requests with any [`wayfare_core::Session`], and
//! [`OAuth2Credential`] is a [`wayfare_core::Credential`] that refreshes
//! itself at the OAuth2 token endpoint.

mod client;
mod error;
mod oauth;

pub use client::ApiClient;
pub use oauth::{OAuth2Credential, TOKEN_PATH, TokenSnapshot, expiry_after};
pub use reqwest::Method;
