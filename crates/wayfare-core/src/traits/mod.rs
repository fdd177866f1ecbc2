//! Capability traits at the seams between sessions and their collaborators.

mod authenticator;
mod credential;

pub use authenticator::Authenticator;
pub use credential::Credential;
