use crate::config::app_config::AuthSection;
use crate::core::traits::credentials::CredentialVerifier;

/// Verifier for the single fixed operator pair.
///
/// The pair comes from configuration (with built-in defaults), not from
/// source code, so deployments can rotate it without a rebuild and tests
/// can inject fixtures.
#[derive(Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Build the verifier from the `[auth]` config section.
    pub fn from_config(auth: &AuthSection) -> Self {
        Self::new(auth.username.clone(), auth.password.clone())
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}
