//! Server-rendered pages of the backend-to-backend example.

use askama::Template;
use domain::TokenSet;

#[derive(Template)]
#[template(path = "home.html")]
pub(crate) struct HomePage {
    pub tokens: Option<TokenView>,
}

/// A token set as shown on the home page.
pub(crate) struct TokenView {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Any other fields K-Auth returned, pretty printed.
    pub extra: Option<String>,
}

impl From<&TokenSet> for TokenView {
    fn from(tokens: &TokenSet) -> Self {
        Self {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            extra: (!tokens.extra.is_empty())
                .then(|| serde_json::to_string_pretty(&tokens.extra).unwrap_or_default()),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub(crate) struct ErrorPage {
    pub title: &'static str,
    pub detail: String,
}

impl HomePage {
    pub fn render_html(&self) -> askama::Result<String> {
        self.render()
    }
}

impl ErrorPage {
    pub fn render_html(&self) -> askama::Result<String> {
        self.render()
    }
}
