//! Anti-forgery `state` tokens for the authorization redirect.

use rand::Rng;

/// CSRF state token echoed back by the provider on callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AntiForgeryState(String);

impl AntiForgeryState {
    /// Generate a cryptographically random state token (32 bytes, hex encoded).
    pub fn generate() -> Self {
        let random_bytes: [u8; 32] = rand::thread_rng().gen();
        Self(hex::encode(random_bytes))
    }

    pub fn from_string(state: String) -> Self {
        Self(state)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Exact comparison against the value returned on callback.
    pub fn matches(&self, returned: &str) -> bool {
        self.0 == returned
    }
}
