use axum::Json;

use snippets_types::api::ApiRoot;

use crate::urls::BaseUrl;

/// GET / — entry points of the API.
pub async fn api_root(base: BaseUrl) -> Json<ApiRoot> {
    Json(ApiRoot {
        users: base.users(),
        snippets: base.snippets(),
    })
}

/// GET /.json — same as the root, with suffixed links.
pub async fn api_root_json(base: BaseUrl) -> Json<ApiRoot> {
    let links = |collection: String| format!("{}.json", collection.trim_end_matches('/'));
    Json(ApiRoot {
        users: links(base.users()),
        snippets: links(base.snippets()),
    })
}

/// GET /health — liveness check (no auth).
pub async fn health() -> &'static str {
    "ok"
}
