//! PKCE (Proof Key for Code Exchange) support.
//!
//! RFC 7636 with the `S256` method only.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::Rng;
use sha2::{Digest, Sha256};

/// Number of random bytes behind every verifier.
const VERIFIER_ENTROPY_BYTES: usize = 32;

/// PKCE code verifier (random string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkceVerifier(String);

impl PkceVerifier {
    /// Generate a new random PKCE verifier.
    ///
    /// 32 random bytes encoded as unpadded base64url, i.e. 43 characters.
    /// Panics only if the operating system random source is unavailable.
    pub fn generate() -> Self {
        let random_bytes: [u8; VERIFIER_ENTROPY_BYTES] = rand::thread_rng().gen();
        Self(URL_SAFE_NO_PAD.encode(random_bytes))
    }

    /// Create a PKCE verifier from an existing string.
    pub fn from_string(verifier: String) -> Self {
        Self(verifier)
    }

    /// Get the verifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Generate the corresponding code challenge.
    pub fn challenge(&self) -> PkceChallenge {
        PkceChallenge::from_verifier(self)
    }
}

/// PKCE code challenge (SHA256 hash of verifier).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkceChallenge(String);

impl PkceChallenge {
    /// Create a code challenge from a verifier.
    ///
    /// `base64url(sha256(verifier))` without padding.
    pub fn from_verifier(verifier: &PkceVerifier) -> Self {
        let hash = Sha256::digest(verifier.as_str().as_bytes());
        Self(URL_SAFE_NO_PAD.encode(hash))
    }

    /// Get the challenge string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pkce_verifier_generation() {
        let verifier = PkceVerifier::generate();
        assert_eq!(verifier.as_str().len(), 43);
        assert!(verifier
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_pkce_verifiers_are_unique() {
        let first = PkceVerifier::generate();
        let second = PkceVerifier::generate();
        assert_ne!(first, second);
    }

    #[test]
    fn test_pkce_challenge_matches_rfc7636_appendix_b() {
        let verifier =
            PkceVerifier::from_string("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk".to_string());
        assert_eq!(
            verifier.challenge().as_str(),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        );
    }

    #[test]
    fn test_pkce_challenge_deterministic() {
        let verifier = PkceVerifier::from_string("test_verifier".to_string());
        let challenge1 = verifier.challenge();
        let challenge2 = verifier.challenge();
        assert_eq!(challenge1, challenge2);
    }

    #[test]
    fn test_pkce_challenge_has_no_padding() {
        for _ in 0..32 {
            let challenge = PkceVerifier::generate().challenge();
            assert!(!challenge.as_str().contains('='));
            assert!(!challenge.as_str().contains('+'));
            assert!(!challenge.as_str().contains('/'));
            // 32 byte digest -> 43 unpadded base64 characters
            assert_eq!(challenge.as_str().len(), 43);
        }
    }
}
