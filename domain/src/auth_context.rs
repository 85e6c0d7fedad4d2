//! The per-session authentication context of the backend-to-backend example.

use kauth::oauth::token::TokenSet;
use kauth::oauth::{AntiForgeryState, PkceVerifier};
use serde::{Deserialize, Serialize};

/// Everything the backend keeps about one browser session.
///
/// `code_verifier` and `state` only exist between `/login` and a successful
/// `/callback`; `tokens` only exists after it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_verifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenSet>,
}

impl AuthContext {
    /// Key the context is stored under in the session.
    pub const SESSION_KEY: &'static str = "kauth.auth_context";

    /// Record a freshly started authorization request.
    pub fn begin(&mut self, verifier: PkceVerifier, state: AntiForgeryState) {
        self.code_verifier = Some(verifier.into_string());
        self.state = Some(state.into_string());
    }

    pub fn pending_verifier(&self) -> Option<PkceVerifier> {
        self.code_verifier
            .clone()
            .map(PkceVerifier::from_string)
    }

    pub fn pending_state(&self) -> Option<AntiForgeryState> {
        self.state.clone().map(AntiForgeryState::from_string)
    }

    /// Store the token set from a successful exchange and drop the pending verifier and state.
    pub fn authenticate(&mut self, tokens: TokenSet) {
        self.tokens = Some(tokens);
        self.code_verifier = None;
        self.state = None;
    }

    /// Replace the token set wholesale after a refresh.
    pub fn replace_tokens(&mut self, tokens: TokenSet) {
        self.tokens = Some(tokens);
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens
            .as_ref()
            .and_then(|tokens| tokens.refresh_token.as_deref())
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_begin_stores_pending_pair() {
        let mut ctx = AuthContext::default();
        ctx.begin(
            PkceVerifier::from_string("v".to_string()),
            AntiForgeryState::from_string("s".to_string()),
        );
        assert_eq!(ctx.pending_verifier().unwrap().as_str(), "v");
        assert!(ctx.pending_state().unwrap().matches("s"));
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn test_authenticate_discards_verifier_and_state() {
        let mut ctx = AuthContext::default();
        ctx.begin(PkceVerifier::generate(), AntiForgeryState::generate());
        ctx.authenticate(TokenSet::new("at1", Some("rt1".to_string())));

        assert_eq!(ctx.code_verifier, None);
        assert_eq!(ctx.state, None);
        assert_eq!(ctx.refresh_token(), Some("rt1"));
        assert!(ctx.is_authenticated());
    }

    #[test]
    fn test_refresh_token_absent_without_tokens() {
        let mut ctx = AuthContext::default();
        assert_eq!(ctx.refresh_token(), None);
        ctx.authenticate(TokenSet::new("at1", None));
        assert_eq!(ctx.refresh_token(), None);
    }

    #[test]
    fn test_clear() {
        let mut ctx = AuthContext::default();
        ctx.begin(PkceVerifier::generate(), AntiForgeryState::generate());
        ctx.replace_tokens(TokenSet::new("at", None));
        ctx.clear();
        assert_eq!(ctx, AuthContext::default());
    }

    #[test]
    fn test_serialized_form_omits_empty_fields() {
        let mut ctx = AuthContext::default();
        assert_eq!(serde_json::to_value(&ctx).unwrap(), json!({}));

        ctx.authenticate(TokenSet::new("at1", Some("rt1".to_string())));
        assert_eq!(
            serde_json::to_value(&ctx).unwrap(),
            json!({"tokens": {"accessToken": "at1", "refreshToken": "rt1"}})
        );
    }
}
