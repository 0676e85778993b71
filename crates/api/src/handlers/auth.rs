//! Handlers for signup and signin.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;
use wishpool_core::error::CoreError;
use wishpool_db::models::user::CreateUser;
use wishpool_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::dto::PrivateUser;
use crate::error::{validation_error, AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 6, max = 255))]
    pub password: String,
    #[validate(length(max = 255))]
    pub avatar: Option<String>,
    #[validate(length(max = 512))]
    pub about: Option<String>,
}

/// Request body for `POST /signin`.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

/// Successful signin response.
#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub access_token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /signup
///
/// Register a new user. Duplicate username or email is a 409.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<PrivateUser>)> {
    input.validate().map_err(|e| validation_error(&e))?;

    // Pre-check for a friendly message; the uq_ constraints remain the
    // backstop for concurrent signups.
    let by_email = UserRepo::find_by_email(&state.pool, &input.email).await?;
    let by_username = UserRepo::find_by_username(&state.pool, &input.username).await?;
    if by_email.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already in use".into(),
        )));
    }
    if by_username.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already in use".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            avatar: input.avatar,
            about: input.about,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((StatusCode::CREATED, Json(PrivateUser::from_user(&user))))
}

/// POST /signin
///
/// Authenticate with username + password. Returns a bearer access token.
pub async fn signin(
    State(state): State<AppState>,
    Json(input): Json<SigninRequest>,
) -> AppResult<Json<SigninResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid credentials".into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    let access_token = generate_access_token(user.id, &user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, username = %user.username, "User signed in");

    Ok(Json(SigninResponse { access_token }))
}
