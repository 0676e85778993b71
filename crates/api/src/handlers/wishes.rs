//! Handlers for the `/wishes` resource (the wish catalog).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use wishpool_core::error::CoreError;
use wishpool_core::types::{DbId, Money};
use wishpool_db::models::wish::{CreateWish, UpdateWish, WishWithOwner};
use wishpool_db::repositories::{OfferRepo, WishRepo};
use wishpool_db::DbPool;

use crate::dto::{self, WishResponse, WishSummary};
use crate::error::{validation_error, AppError, AppResult};
use crate::handlers::offers::admit_contribution;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Size of the `GET /wishes/last` listing.
const RECENT_LIMIT: i64 = 40;

/// Size of the `GET /wishes/top` listing.
const TOP_LIMIT: i64 = 20;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /wishes`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWishRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(url, length(max = 1024))]
    pub link: Option<String>,
    #[validate(url, length(max = 1024))]
    pub image: Option<String>,
    pub price: Money,
    #[validate(length(max = 2048))]
    pub description: Option<String>,
}

/// Request body for `PATCH /wishes/{id}`. All fields optional.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWishRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(url, length(max = 1024))]
    pub link: Option<String>,
    #[validate(url, length(max = 1024))]
    pub image: Option<String>,
    pub price: Option<Money>,
    #[validate(length(max = 2048))]
    pub description: Option<String>,
}

/// Request body for `POST /wishes/{id}/offers`.
#[derive(Debug, Deserialize)]
pub struct CreateWishOfferRequest {
    pub amount: Money,
    pub hidden: Option<bool>,
}

// ---------------------------------------------------------------------------
// Rendering helpers (shared with the users handlers)
// ---------------------------------------------------------------------------

/// Render a wish summary, re-deriving `raised` from the ledger.
pub(crate) async fn render_summary(
    pool: &DbPool,
    wish: &WishWithOwner,
) -> AppResult<WishSummary> {
    let raised = OfferRepo::raised_amount(pool, wish.id).await?;
    Ok(dto::wish_summary(wish, raised))
}

/// Render a full wish detail for a viewer: fresh `raised` plus the
/// visibility-filtered offer list.
pub(crate) async fn render_detail(
    pool: &DbPool,
    wish: &WishWithOwner,
    viewer_id: DbId,
) -> AppResult<WishResponse> {
    let raised = OfferRepo::raised_amount(pool, wish.id).await?;
    let offers = OfferRepo::list_with_relations(pool, Some(wish.id)).await?;
    Ok(dto::wish_response(wish, raised, &offers, viewer_id))
}

async fn load_wish(pool: &DbPool, id: DbId) -> AppResult<WishWithOwner> {
    WishRepo::find_with_owner(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Wish", id }))
}

/// Product rule: a wish without a link or image is invalid.
fn ensure_required_fields(link: Option<&str>, image: Option<&str>) -> AppResult<()> {
    if link.is_none_or(str::is_empty) {
        return Err(AppError::Core(CoreError::Validation("Link is required".into())));
    }
    if image.is_none_or(str::is_empty) {
        return Err(AppError::Core(CoreError::Validation("Image is required".into())));
    }
    Ok(())
}

fn ensure_positive_price(price: Money) -> AppResult<()> {
    if price <= Money::ZERO {
        return Err(AppError::Core(CoreError::Validation(
            "price must be positive".into(),
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /wishes/last -- the 40 most recent wishes, as summaries. Public.
pub async fn last(State(state): State<AppState>) -> AppResult<Json<Vec<WishSummary>>> {
    let wishes = WishRepo::list_recent(&state.pool, RECENT_LIMIT).await?;
    let mut summaries = Vec::with_capacity(wishes.len());
    for wish in &wishes {
        summaries.push(render_summary(&state.pool, wish).await?);
    }
    Ok(Json(summaries))
}

/// GET /wishes/top -- the 20 most copied wishes, as summaries. Public.
pub async fn top(State(state): State<AppState>) -> AppResult<Json<Vec<WishSummary>>> {
    let wishes = WishRepo::list_top(&state.pool, TOP_LIMIT).await?;
    let mut summaries = Vec::with_capacity(wishes.len());
    for wish in &wishes {
        summaries.push(render_summary(&state.pool, wish).await?);
    }
    Ok(Json(summaries))
}

/// POST /wishes
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateWishRequest>,
) -> AppResult<(StatusCode, Json<WishResponse>)> {
    input.validate().map_err(|e| validation_error(&e))?;
    ensure_required_fields(input.link.as_deref(), input.image.as_deref())?;
    ensure_positive_price(input.price)?;

    let created = WishRepo::create(
        &state.pool,
        &CreateWish {
            owner_id: user.user_id,
            name: input.name,
            link: input.link.unwrap_or_default(),
            image: input.image.unwrap_or_default(),
            price: input.price,
            description: input.description,
        },
    )
    .await?;

    tracing::info!(wish_id = created.id, owner_id = user.user_id, "Wish created");

    let wish = load_wish(&state.pool, created.id).await?;
    let response = render_detail(&state.pool, &wish, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /wishes/{id}
///
/// The owner viewing their own wish sees every offer on it, hidden ones
/// included; other viewers get the filtered slice.
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<WishResponse>> {
    let wish = load_wish(&state.pool, id).await?;
    let response = render_detail(&state.pool, &wish, user.user_id).await?;
    Ok(Json(response))
}

/// PATCH /wishes/{id}
///
/// Only the owner may edit. The price is frozen once the wish has any
/// ledger entries (a same-value no-op "change" is still accepted).
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWishRequest>,
) -> AppResult<Json<WishResponse>> {
    input.validate().map_err(|e| validation_error(&e))?;

    let wish = load_wish(&state.pool, id).await?;
    if wish.owner_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot edit this wish".into(),
        )));
    }

    if let Some(price) = input.price {
        ensure_positive_price(price)?;
        let ledger_entries = OfferRepo::count_for_wish(&state.pool, id).await?;
        if ledger_entries > 0 && price != wish.price {
            return Err(AppError::Core(CoreError::Forbidden(
                "Cannot change price after contributions exist".into(),
            )));
        }
    }

    // The merged wish must still satisfy the link/image product rule.
    let next_link = input.link.as_deref().unwrap_or(&wish.link);
    let next_image = input.image.as_deref().unwrap_or(&wish.image);
    ensure_required_fields(Some(next_link), Some(next_image))?;

    WishRepo::update(
        &state.pool,
        id,
        &UpdateWish {
            name: input.name,
            link: input.link,
            image: input.image,
            price: input.price,
            description: input.description,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "Wish", id }))?;

    let updated = load_wish(&state.pool, id).await?;
    let response = render_detail(&state.pool, &updated, user.user_id).await?;
    Ok(Json(response))
}

/// DELETE /wishes/{id}
///
/// Only the owner may delete, and only while the ledger is empty: a wish
/// that has ever attracted contributions (even cancelled ones) stays.
/// Returns the final rendering of the wish before removal.
pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<WishResponse>> {
    let wish = load_wish(&state.pool, id).await?;
    if wish.owner_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot delete this wish".into(),
        )));
    }

    let ledger_entries = OfferRepo::count_for_wish(&state.pool, id).await?;
    if ledger_entries > 0 {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot delete wish with existing offers".into(),
        )));
    }

    let response = render_detail(&state.pool, &wish, user.user_id).await?;
    WishRepo::delete(&state.pool, id).await?;

    tracing::info!(wish_id = id, owner_id = user.user_id, "Wish deleted");

    Ok(Json(response))
}

/// POST /wishes/{id}/copy
///
/// Duplicate someone's wish into the caller's catalog. The source counter
/// increment and the duplicate insert commit atomically; the duplicate
/// starts with `copied = 0` and an empty ledger.
pub async fn copy(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<WishResponse>)> {
    let mut tx = state.pool.begin().await?;

    let source = WishRepo::find_with_owner_for_update(&mut tx, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Wish", id }))?;

    ensure_required_fields(Some(&source.link), Some(&source.image))?;

    WishRepo::increment_copied(&mut tx, source.id).await?;

    let created = WishRepo::create(
        &mut *tx,
        &CreateWish {
            owner_id: user.user_id,
            name: source.name.clone(),
            link: source.link.clone(),
            image: source.image.clone(),
            price: source.price,
            description: source.description.clone(),
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        source_wish_id = id,
        new_wish_id = created.id,
        owner_id = user.user_id,
        "Wish copied"
    );

    let wish = load_wish(&state.pool, created.id).await?;
    let response = render_detail(&state.pool, &wish, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /wishes/{id}/offers
///
/// Contribute in wish context; returns the updated wish rendering.
pub async fn create_offer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateWishOfferRequest>,
) -> AppResult<(StatusCode, Json<WishResponse>)> {
    admit_contribution(
        &state.pool,
        user.user_id,
        id,
        input.amount,
        input.hidden.unwrap_or(false),
    )
    .await?;

    let wish = load_wish(&state.pool, id).await?;
    let response = render_detail(&state.pool, &wish, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
