use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::instrument;

use crate::{
    auth::API_KEY_HEADER,
    errors::{Error, Result},
    AppState,
};

/// The authenticated caller, resolved from the `X-API-Key` header.
///
/// Handlers take this as an extractor argument; extraction fails with a 401
/// when the header is absent or matches no registered user.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub email: String,
    pub api_key: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let api_key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(Error::Unauthenticated {
                message: Some(format!("API key required in {API_KEY_HEADER} header")),
            })?;

        let user = state.store.user_by_api_key(api_key).ok_or(Error::InvalidApiKey)?;

        Ok(CurrentUser {
            email: user.email,
            api_key: user.api_key,
        })
    }
}
