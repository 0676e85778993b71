//! Handlers for the `/wishlists` resource.
//!
//! Wishlists are named groupings over existing wishes. They carry no
//! funding state of their own; member renderings re-derive `raised` the
//! same way the wish listings do.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use wishpool_core::error::CoreError;
use wishpool_core::types::DbId;
use wishpool_db::models::wishlist::{CreateWishlist, UpdateWishlist, WishlistWithOwner};
use wishpool_db::repositories::{WishRepo, WishlistRepo};
use wishpool_db::DbPool;

use crate::dto::{self, WishlistResponse};
use crate::error::{validation_error, AppError, AppResult};
use crate::handlers::wishes::render_summary;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /wishlists`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWishlistRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(url, length(max = 1024))]
    pub image: Option<String>,
    pub items_id: Option<Vec<DbId>>,
}

/// Request body for `PATCH /wishlists/{id}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWishlistRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(url, length(max = 1024))]
    pub image: Option<String>,
    pub items_id: Option<Vec<DbId>>,
}

/// Query string for `GET /wishlists`.
#[derive(Debug, Deserialize)]
pub struct WishlistsQuery {
    pub topic: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve requested member ids, failing the whole request when any id
/// does not exist. Keeps wishlist membership all-or-nothing.
async fn resolve_members(pool: &DbPool, ids: &[DbId]) -> AppResult<()> {
    let found = WishRepo::find_by_ids(pool, ids).await?;
    if found.len() != ids.len() {
        return Err(AppError::NotFound("One or more wishes not found".into()));
    }
    Ok(())
}

/// Render a wishlist with its member summaries.
async fn render_wishlist(
    pool: &DbPool,
    wishlist: &WishlistWithOwner,
) -> AppResult<WishlistResponse> {
    let members = WishlistRepo::items(pool, wishlist.id).await?;
    let mut items = Vec::with_capacity(members.len());
    for wish in &members {
        items.push(render_summary(pool, wish).await?);
    }
    Ok(dto::wishlist_response(wishlist, items))
}

async fn load_wishlist(pool: &DbPool, id: DbId) -> AppResult<WishlistWithOwner> {
    WishlistRepo::find_with_owner(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wishlist",
            id,
        }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /wishlists[?topic=]
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<WishlistsQuery>,
) -> AppResult<Json<Vec<WishlistResponse>>> {
    let wishlists = WishlistRepo::list_with_owner(&state.pool, query.topic.as_deref()).await?;
    let mut responses = Vec::with_capacity(wishlists.len());
    for wishlist in &wishlists {
        responses.push(render_wishlist(&state.pool, wishlist).await?);
    }
    Ok(Json(responses))
}

/// POST /wishlists
///
/// Every requested member id must resolve; otherwise nothing is created.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateWishlistRequest>,
) -> AppResult<(StatusCode, Json<WishlistResponse>)> {
    input.validate().map_err(|e| validation_error(&e))?;

    let items = input.items_id.unwrap_or_default();
    resolve_members(&state.pool, &items).await?;

    let created = WishlistRepo::create(
        &state.pool,
        &CreateWishlist {
            owner_id: user.user_id,
            name: input.name,
            image: input.image,
            items,
        },
    )
    .await?;

    tracing::info!(wishlist_id = created.id, owner_id = user.user_id, "Wishlist created");

    let wishlist = load_wishlist(&state.pool, created.id).await?;
    let response = render_wishlist(&state.pool, &wishlist).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /wishlists/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<WishlistResponse>> {
    let wishlist = load_wishlist(&state.pool, id).await?;
    let response = render_wishlist(&state.pool, &wishlist).await?;
    Ok(Json(response))
}

/// PATCH /wishlists/{id}
///
/// Only the owner may modify. A present `itemsId` replaces the whole
/// membership set after resolving every id.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWishlistRequest>,
) -> AppResult<Json<WishlistResponse>> {
    input.validate().map_err(|e| validation_error(&e))?;

    let wishlist = load_wishlist(&state.pool, id).await?;
    if wishlist.owner_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot modify this wishlist".into(),
        )));
    }

    if let Some(items) = &input.items_id {
        resolve_members(&state.pool, items).await?;
    }

    WishlistRepo::update(
        &state.pool,
        id,
        &UpdateWishlist {
            name: input.name,
            image: input.image,
            items: input.items_id,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Wishlist",
        id,
    }))?;

    let updated = load_wishlist(&state.pool, id).await?;
    let response = render_wishlist(&state.pool, &updated).await?;
    Ok(Json(response))
}

/// DELETE /wishlists/{id}
///
/// Only the owner may delete. Removing a wishlist never touches its
/// member wishes. Returns the final rendering before removal.
pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<WishlistResponse>> {
    let wishlist = load_wishlist(&state.pool, id).await?;
    if wishlist.owner_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot modify this wishlist".into(),
        )));
    }

    let response = render_wishlist(&state.pool, &wishlist).await?;
    WishlistRepo::delete(&state.pool, id).await?;

    tracing::info!(wishlist_id = id, owner_id = user.user_id, "Wishlist deleted");

    Ok(Json(response))
}
