use crate::extractors::session_context::SessionContext;
use crate::pages::{HomePage, TokenView};
use crate::Error;

use axum::response::{Html, IntoResponse};
use domain::error::{DomainErrorKind, Error as DomainError, InternalErrorKind};

/// GET the home page
///
/// Shows the stored token set when the session is authenticated, otherwise a login link.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Home page", body = String, content_type = "text/html"),
        (status = 500, description = "Internal Server Error"),
    )
)]
pub async fn index(ctx: SessionContext) -> Result<impl IntoResponse, Error> {
    let page = HomePage {
        tokens: ctx.auth.tokens.as_ref().map(TokenView::from),
    };
    let html = page.render_html().map_err(|e| DomainError {
        source: Some(Box::new(e)),
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
            "failed to render home page".to_string(),
        )),
    })?;
    Ok(Html(html))
}
