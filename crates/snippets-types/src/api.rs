use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// -- JWT Claims --

/// Bearer token claims. `sub` is the numeric user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub user_id: i64,
    pub username: String,
    pub token: String,
}

// -- Discovery --

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiRoot {
    pub users: String,
    pub snippets: String,
}

// -- Snippets --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetResponse {
    pub url: String,
    pub id: i64,
    pub highlight: String,
    pub owner: String,
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: String,
    pub style: String,
    pub created: DateTime<Utc>,
}

// -- Users --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub url: String,
    pub id: i64,
    pub username: String,
    pub snippets: Vec<i64>,
}
