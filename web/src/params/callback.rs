//! Query parameters K-Auth appends when redirecting back to `/callback`.

use domain::auth_flow::Callback;
use domain::error::Error as DomainError;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackParams {
    /// Authorization code issued by K-Auth
    pub code: Option<String>,
    /// Anti-forgery state echoed back by K-Auth
    pub state: Option<String>,
    /// Error code when K-Auth refused the authorization request
    pub error: Option<String>,
    /// Human readable detail for `error`
    pub error_description: Option<String>,
}

impl TryFrom<CallbackParams> for Callback {
    type Error = DomainError;

    fn try_from(params: CallbackParams) -> Result<Self, Self::Error> {
        Callback::from_query(
            params.code,
            params.state,
            params.error,
            params.error_description,
        )
    }
}
