//! Access rules for the snippet endpoints.
//!
//! Two checks run for every request: a global one before the record is
//! loaded (anyone may read, only authenticated callers may write) and an
//! object one after it (only the owner may write).

use axum::http::Method;

use snippets_types::api::Claims;

use crate::error::ApiError;

pub fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// The write predicate: the requester is the record's owner.
pub fn allow_write(requester: &Claims, owner_id: i64) -> bool {
    requester.sub == owner_id
}

pub fn authenticated_or_read_only(method: &Method, requester: Option<&Claims>) -> Result<(), ApiError> {
    if is_safe_method(method) || requester.is_some() {
        Ok(())
    } else {
        Err(ApiError::NotAuthenticated)
    }
}

pub fn owner_or_read_only(method: &Method, requester: Option<&Claims>, owner_id: i64) -> Result<(), ApiError> {
    if is_safe_method(method) {
        return Ok(());
    }
    match requester {
        Some(claims) if allow_write(claims, owner_id) => Ok(()),
        _ => Err(ApiError::PermissionDenied),
    }
}
