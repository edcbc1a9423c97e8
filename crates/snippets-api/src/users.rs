use axum::{
    Json,
    extract::{Path, State},
};

use snippets_types::api::UserResponse;

use crate::error::ApiError;
use crate::urls::{BaseUrl, parse_pk};
use crate::{AppState, run_db, serializers};

/// GET /users/
pub async fn list_users(
    State(state): State<AppState>,
    base: BaseUrl,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = run_db(&state, |db| db.list_users()).await?;

    Ok(Json(
        users
            .into_iter()
            .map(|user| serializers::user_response(user, &base))
            .collect(),
    ))
}

/// GET /users/{id}/
pub async fn retrieve_user(
    State(state): State<AppState>,
    Path(pk): Path<String>,
    base: BaseUrl,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_pk(&pk)?;
    let user = run_db(&state, move |db| db.get_user_with_snippets(id))
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(serializers::user_response(user, &base)))
}
