//! Demo authentication provider.
//!
//! Accepts any credentials and returns the fixed demo account. Exists so
//! the application can be exercised end to end without a real identity
//! backend.

use super::{AuthError, AuthStrategy, Credentials, Identity};

/// Stubbed provider returning a fixed demo identity.
pub struct DemoProvider;

impl DemoProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthStrategy for DemoProvider {
    fn name(&self) -> &str {
        "Demo Account"
    }

    fn authenticate(&self, _credentials: &Credentials) -> Result<Identity, AuthError> {
        Ok(Identity {
            id: "1".to_string(),
            name: "Demo User".to_string(),
            email: "demo@example.com".to_string(),
            image: Some(
                "https://images.pexels.com/photos/771742/pexels-photo-771742.jpeg".to_string(),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_provider_ignores_credentials() {
        let provider = DemoProvider::new();

        let anonymous = provider.authenticate(&Credentials::default()).unwrap();
        let named = provider
            .authenticate(&Credentials {
                email: Some("someone@else.com".to_string()),
                password: Some("hunter2".to_string()),
            })
            .unwrap();

        assert_eq!(anonymous, named);
        assert_eq!(anonymous.id, "1");
        assert_eq!(anonymous.email, "demo@example.com");
    }

    #[test]
    fn test_demo_provider_name() {
        assert_eq!(DemoProvider::new().name(), "Demo Account");
    }
}
