pub mod auth;
pub mod error;
pub mod highlight;
pub mod identity;
pub mod permissions;
pub mod root;
pub mod serializers;
pub mod snippets;
pub mod urls;
pub mod users;

use std::sync::Arc;

use axum::{
    Router,
    routing::{MethodRouter, get, post},
};
use tracing::error;

use snippets_db::Database;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
}

/// All API routes. Item routes accept the id with or without a trailing
/// slash, and with a `.json` format suffix.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::api_root))
        .route("/.json", get(root::api_root_json))
        .route("/health", get(root::health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/snippets", snippet_collection())
        .route("/snippets/", snippet_collection())
        .route("/snippets.json", snippet_collection())
        .route("/snippets/{pk}", snippet_item())
        .route("/snippets/{pk}/", snippet_item())
        .route("/snippets/{pk}/highlight", get(snippets::highlight_snippet))
        .route("/snippets/{pk}/highlight/", get(snippets::highlight_snippet))
        .route("/users", get(users::list_users))
        .route("/users/", get(users::list_users))
        .route("/users.json", get(users::list_users))
        .route("/users/{pk}", get(users::retrieve_user))
        .route("/users/{pk}/", get(users::retrieve_user))
        .with_state(state)
}

fn snippet_collection() -> MethodRouter<AppState> {
    get(snippets::list_snippets).post(snippets::create_snippet)
}

fn snippet_item() -> MethodRouter<AppState> {
    get(snippets::retrieve_snippet)
        .put(snippets::update_snippet)
        .patch(snippets::partial_update_snippet)
        .delete(snippets::destroy_snippet)
}

/// Run blocking DB work off the async runtime.
pub(crate) async fn run_db<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(anyhow::anyhow!("blocking task failed: {}", e))
        })?
        .map_err(ApiError::from)
}
