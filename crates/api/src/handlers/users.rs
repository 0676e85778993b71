//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use wishpool_core::error::CoreError;
use wishpool_db::models::user::UpdateUser;
use wishpool_db::repositories::{UserRepo, WishRepo};

use crate::auth::password::hash_password;
use crate::dto::{PrivateUser, PublicUser, WishResponse};
use crate::error::{validation_error, AppError, AppResult};
use crate::handlers::wishes::render_detail;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PATCH /users/me`. A `password` re-hashes before
/// storage; the hash itself is never accepted from the wire.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 255))]
    pub password: Option<String>,
    #[validate(length(max = 1024))]
    pub avatar: Option<String>,
    #[validate(length(max = 512))]
    pub about: Option<String>,
}

/// Request body for `POST /users/find`.
#[derive(Debug, Deserialize)]
pub struct FindUsersRequest {
    pub query: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /users/me
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<PrivateUser>> {
    let profile = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(PrivateUser::from_user(&profile)))
}

/// PATCH /users/me
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<PrivateUser>> {
    input.validate().map_err(|e| validation_error(&e))?;

    let password_hash = match input.password.as_deref() {
        Some(password) => Some(
            hash_password(password)
                .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
        ),
        None => None,
    };

    let updated = UserRepo::update(
        &state.pool,
        user.user_id,
        &UpdateUser {
            username: input.username,
            email: input.email,
            password_hash,
            avatar: input.avatar,
            about: input.about,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "User",
        id: user.user_id,
    }))?;

    tracing::info!(user_id = updated.id, "Profile updated");

    Ok(Json(PrivateUser::from_user(&updated)))
}

/// GET /users/me/wishes
///
/// The caller's own catalog. The viewer is the owner, so hidden offers
/// are included in each rendering.
pub async fn my_wishes(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<WishResponse>>> {
    let wishes = WishRepo::list_by_owner(&state.pool, user.user_id).await?;
    let mut responses = Vec::with_capacity(wishes.len());
    for wish in &wishes {
        responses.push(render_detail(&state.pool, wish, user.user_id).await?);
    }
    Ok(Json(responses))
}

/// POST /users/find
pub async fn find(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<FindUsersRequest>,
) -> AppResult<Json<Vec<PublicUser>>> {
    let users = UserRepo::search(&state.pool, &input.query).await?;
    Ok(Json(users.iter().map(PublicUser::from_user).collect()))
}

/// GET /users/{username}
pub async fn get_by_username(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(username): Path<String>,
) -> AppResult<Json<PublicUser>> {
    let profile = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {username} not found")))?;
    Ok(Json(PublicUser::from_user(&profile)))
}

/// GET /users/{username}/wishes
///
/// Someone else's catalog through the caller's eyes: hidden offers show
/// only where the caller is the contributor (or happens to own the wish).
pub async fn wishes_by_username(
    State(state): State<AppState>,
    user: AuthUser,
    Path(username): Path<String>,
) -> AppResult<Json<Vec<WishResponse>>> {
    let profile = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {username} not found")))?;

    let wishes = WishRepo::list_by_owner(&state.pool, profile.id).await?;
    let mut responses = Vec::with_capacity(wishes.len());
    for wish in &wishes {
        responses.push(render_detail(&state.pool, wish, user.user_id).await?);
    }
    Ok(Json(responses))
}
