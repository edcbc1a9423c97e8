use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{Method, StatusCode, header},
    response::{Html, IntoResponse},
};
use serde_json::Value;
use tracing::info;

use snippets_db::SnippetRepository;
use snippets_db::models::SnippetWrite;
use snippets_types::api::SnippetResponse;

use crate::error::ApiError;
use crate::identity::Requester;
use crate::urls::{BaseUrl, parse_pk};
use crate::{AppState, highlight, permissions, run_db, serializers};

type Payload = Result<Json<Value>, JsonRejection>;

/// GET /snippets/ — every snippet, oldest first.
pub async fn list_snippets(
    State(state): State<AppState>,
    base: BaseUrl,
) -> Result<Json<Vec<SnippetResponse>>, ApiError> {
    let rows = run_db(&state, |db| db.list()).await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| serializers::snippet_response(row, &base))
            .collect(),
    ))
}

/// POST /snippets/ — create a snippet owned by the caller.
pub async fn create_snippet(
    State(state): State<AppState>,
    method: Method,
    requester: Requester,
    base: BaseUrl,
    payload: Payload,
) -> Result<impl IntoResponse, ApiError> {
    permissions::authenticated_or_read_only(&method, requester.claims())?;
    let claims = requester.require()?.clone();

    let Json(data) = payload?;
    let fields = serializers::validate_snippet(&data, None, false)?;
    let highlighted = highlight::render(&fields);

    let owner_id = claims.sub;
    let row = run_db(&state, move |db| {
        // The token may outlive the account it names
        if db.get_user_by_id(owner_id)?.is_none() {
            return Ok(None);
        }
        let write = SnippetWrite {
            fields: &fields,
            highlighted: &highlighted,
        };
        db.insert(owner_id, &write).map(Some)
    })
    .await?
    .ok_or(ApiError::AuthenticationFailed("User not found."))?;

    info!("Snippet {} created by {}", row.id, claims.username);

    let response = serializers::snippet_response(row, &base);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, response.url.clone())],
        Json(response),
    ))
}

/// GET /snippets/{id}/
pub async fn retrieve_snippet(
    State(state): State<AppState>,
    Path(pk): Path<String>,
    base: BaseUrl,
) -> Result<Json<SnippetResponse>, ApiError> {
    let id = parse_pk(&pk)?;
    let row = run_db(&state, move |db| db.get(id)).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(serializers::snippet_response(row, &base)))
}

/// PUT /snippets/{id}/ — replace every editable field; `code` is required.
pub async fn update_snippet(
    State(state): State<AppState>,
    method: Method,
    Path(pk): Path<String>,
    requester: Requester,
    base: BaseUrl,
    payload: Payload,
) -> Result<Json<SnippetResponse>, ApiError> {
    save_snippet(&state, &method, &pk, &requester, &base, payload, false).await
}

/// PATCH /snippets/{id}/ — change only the fields present in the payload.
pub async fn partial_update_snippet(
    State(state): State<AppState>,
    method: Method,
    Path(pk): Path<String>,
    requester: Requester,
    base: BaseUrl,
    payload: Payload,
) -> Result<Json<SnippetResponse>, ApiError> {
    save_snippet(&state, &method, &pk, &requester, &base, payload, true).await
}

/// DELETE /snippets/{id}/
pub async fn destroy_snippet(
    State(state): State<AppState>,
    method: Method,
    Path(pk): Path<String>,
    requester: Requester,
) -> Result<StatusCode, ApiError> {
    permissions::authenticated_or_read_only(&method, requester.claims())?;
    let id = parse_pk(&pk)?;

    let existing = run_db(&state, move |db| db.get(id)).await?.ok_or(ApiError::NotFound)?;
    permissions::owner_or_read_only(&method, requester.claims(), existing.owner_id)?;

    if !run_db(&state, move |db| db.delete(id)).await? {
        return Err(ApiError::NotFound);
    }

    info!("Snippet {} deleted by {}", id, existing.owner_username);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /snippets/{id}/highlight/ — the stored HTML rendering.
pub async fn highlight_snippet(
    State(state): State<AppState>,
    Path(pk): Path<String>,
) -> Result<Html<String>, ApiError> {
    let id = parse_pk(&pk)?;
    let row = run_db(&state, move |db| db.get(id)).await?.ok_or(ApiError::NotFound)?;
    Ok(Html(row.highlighted))
}

async fn save_snippet(
    state: &AppState,
    method: &Method,
    pk: &str,
    requester: &Requester,
    base: &BaseUrl,
    payload: Payload,
    partial: bool,
) -> Result<Json<SnippetResponse>, ApiError> {
    permissions::authenticated_or_read_only(method, requester.claims())?;
    let id = parse_pk(pk)?;

    let existing = run_db(state, move |db| db.get(id)).await?.ok_or(ApiError::NotFound)?;
    permissions::owner_or_read_only(method, requester.claims(), existing.owner_id)?;

    // Payload problems surface only once the caller is known to be allowed
    let Json(data) = payload?;
    let fields = serializers::validate_snippet(&data, Some(&existing.fields()), partial)?;
    let highlighted = highlight::render(&fields);

    let row = run_db(state, move |db| {
        let write = SnippetWrite {
            fields: &fields,
            highlighted: &highlighted,
        };
        db.update(id, &write)
    })
    .await?
    .ok_or(ApiError::NotFound)?;

    info!("Snippet {} updated by {}", id, existing.owner_username);
    Ok(Json(serializers::snippet_response(row, base)))
}
