use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{DecodingKey, Validation, decode};
use tracing::debug;

use snippets_types::api::Claims;

use crate::AppState;
use crate::error::ApiError;

/// Whoever sent the request: `None` for anonymous callers.
///
/// A request without a bearer token is anonymous. A bearer token that fails
/// verification rejects the request with 401 rather than downgrading it.
#[derive(Debug, Clone)]
pub struct Requester(pub Option<Claims>);

impl Requester {
    pub fn claims(&self) -> Option<&Claims> {
        self.0.as_ref()
    }

    /// The authenticated caller, or `NotAuthenticated`.
    pub fn require(&self) -> Result<&Claims, ApiError> {
        self.0.as_ref().ok_or(ApiError::NotAuthenticated)
    }
}

impl FromRequestParts<AppState> for Requester {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(Authorization(bearer)) = parts.headers.typed_get::<Authorization<Bearer>>() else {
            return Ok(Requester(None));
        };

        let claims = decode_token(bearer.token(), &state.jwt_secret)?;
        Ok(Requester(Some(claims)))
    }
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        ApiError::AuthenticationFailed("Invalid token.")
    })?;

    Ok(token_data.claims)
}
