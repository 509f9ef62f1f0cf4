//! Auth Module - Pluggable authentication strategies
//!
//! Sign-in is a capability behind a trait so the rest of the system never
//! depends on a concrete provider. The demo provider accepts anything and
//! returns a fixed identity; real deployments would plug in their own.

mod demo;

pub use demo::DemoProvider;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Provider error: {0}")]
    Provider(String),
}

/// Credentials presented at sign-in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
}

/// Authentication strategy.
pub trait AuthStrategy: Send + Sync {
    /// Provider name shown on the sign-in screen.
    fn name(&self) -> &str;

    /// Resolve credentials to an identity, or fail.
    fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthError>;
}
