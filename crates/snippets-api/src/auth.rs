use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::info;

use snippets_types::api::{Claims, LoginRequest, RegisterRequest, TokenResponse};

use crate::error::{ApiError, FieldErrors};
use crate::{AppState, run_db};

const TOKEN_LIFETIME_DAYS: i64 = 30;

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut errors = FieldErrors::new();
    let username_len = req.username.chars().count();
    if !(3..=32).contains(&username_len) {
        errors.add("username", "Username must be between 3 and 32 characters.");
    }
    if req.password.chars().count() < 8 {
        errors.add("password", "Password must be at least 8 characters.");
    }
    errors.into_result(())?;

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Password hashing failed: {}", e))?
        .to_string();

    let username = req.username.clone();
    let user_id = run_db(&state, move |db| {
        if db.get_user_by_username(&username)?.is_some() {
            return Ok(None);
        }
        db.create_user(&username, &password_hash).map(Some)
    })
    .await?
    .ok_or(ApiError::Conflict("A user with that username already exists."))?;

    let token = create_token(&state.jwt_secret, user_id, &req.username)?;
    info!("Registered user {} ({})", req.username, user_id);

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            user_id,
            username: req.username,
            token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = req.username.clone();
    let user = run_db(&state, move |db| db.get_user_by_username(&username))
        .await?
        .ok_or(ApiError::AuthenticationFailed("Invalid username or password."))?;

    // Verify password
    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|e| anyhow::anyhow!("Corrupt password hash for user {}: {}", user.id, e))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::AuthenticationFailed("Invalid username or password."))?;

    let token = create_token(&state.jwt_secret, user.id, &user.username)?;

    Ok(Json(TokenResponse {
        user_id: user.id,
        username: user.username,
        token,
    }))
}

pub fn create_token(secret: &str, user_id: i64, username: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(TOKEN_LIFETIME_DAYS)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
