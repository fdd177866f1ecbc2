//! Secret token types.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! secret_string {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a secret value.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the secret value.
            ///
            /// # Security
            ///
            /// Use only when constructing requests. Never log the result.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        // Hide the value in Debug output
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&"[REDACTED]").finish()
            }
        }
    };
}

secret_string!(
    /// A short-lived OAuth2 access token, sent as a bearer token.
    AccessToken
);

secret_string!(
    /// A longer-lived token exchanged at the token endpoint for new access tokens.
    RefreshToken
);

secret_string!(
    /// A static, non-refreshing API secret used by server-token sessions.
    ServerToken
);

secret_string!(
    /// An OAuth2 client secret.
    ClientSecret
);
