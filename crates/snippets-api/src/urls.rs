use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::headers::{HeaderMapExt, Host};

use crate::error::ApiError;

/// Scheme and authority the client used to reach us, for building the
/// absolute URLs embedded in responses.
#[derive(Debug, Clone)]
pub struct BaseUrl(String);

impl BaseUrl {
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into().trim_end_matches('/').to_string())
    }

    pub fn snippets(&self) -> String {
        format!("{}/snippets/", self.0)
    }

    pub fn snippet(&self, id: i64) -> String {
        format!("{}/snippets/{}/", self.0, id)
    }

    pub fn snippet_highlight(&self, id: i64) -> String {
        format!("{}/snippets/{}/highlight/", self.0, id)
    }

    pub fn users(&self) -> String {
        format!("{}/users/", self.0)
    }

    pub fn user(&self, id: i64) -> String {
        format!("{}/users/{}/", self.0, id)
    }
}

impl<S> FromRequestParts<S> for BaseUrl
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let scheme = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .filter(|proto| *proto == "https")
            .unwrap_or("http");

        let authority = match parts.headers.typed_get::<Host>() {
            Some(host) => match host.port() {
                Some(port) => format!("{}:{}", host.hostname(), port),
                None => host.hostname().to_string(),
            },
            None => parts
                .uri
                .authority()
                .map(|a| a.to_string())
                .unwrap_or_else(|| "localhost".to_string()),
        };

        Ok(BaseUrl::new(format!("{scheme}://{authority}")))
    }
}

/// Parse an item path segment: a numeric id, optionally carrying the `.json`
/// format suffix. Anything else cannot name a record.
pub fn parse_pk(segment: &str) -> Result<i64, ApiError> {
    let digits = segment.strip_suffix(".json").unwrap_or(segment);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::NotFound);
    }
    digits.parse().map_err(|_| ApiError::NotFound)
}
