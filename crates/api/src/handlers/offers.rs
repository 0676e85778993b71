//! Handlers for the `/offers` resource -- the contribution ledger.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use wishpool_core::error::CoreError;
use wishpool_core::types::{DbId, Money};
use wishpool_core::visibility::offer_visible_to;
use wishpool_core::funding;
use wishpool_db::models::offer::{CreateOffer, Offer, UpdateOffer};
use wishpool_db::repositories::{OfferRepo, WishRepo};
use wishpool_db::DbPool;

use crate::dto::{self, OfferResponse};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /offers`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    pub amount: Money,
    pub wish_id: DbId,
    pub hidden: Option<bool>,
}

/// Request body for `PATCH /offers/{id}`.
///
/// `user_id` / `wish_id` are accepted by the deserializer only so that
/// reassignment attempts can be rejected explicitly instead of silently
/// dropped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOfferRequest {
    pub amount: Option<Money>,
    pub hidden: Option<bool>,
    pub status: Option<wishpool_db::models::offer::OfferStatus>,
    pub user_id: Option<DbId>,
    pub wish_id: Option<DbId>,
}

/// Query string for `GET /offers`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffersQuery {
    pub wish_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Ledger admission
// ---------------------------------------------------------------------------

/// Admit and persist a new contribution.
///
/// The read-decide-write sequence runs in one transaction that locks the
/// wish row first, so two concurrent contributions against the same
/// near-fully-funded wish serialize and the second one sees the first
/// one's amount when the policy re-sums the ledger.
pub(crate) async fn admit_contribution(
    pool: &DbPool,
    contributor_id: DbId,
    wish_id: DbId,
    amount: Money,
    hidden: bool,
) -> AppResult<Offer> {
    // Malformed amounts fail before any ledger read.
    ensure_positive_amount(amount)?;

    let mut tx = pool.begin().await?;

    let wish = WishRepo::find_with_owner_for_update(&mut tx, wish_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wish",
            id: wish_id,
        }))?;

    funding::ensure_not_self_funding(wish.owner_id, contributor_id)
        .map_err(CoreError::from)?;

    let raised = OfferRepo::raised_amount(&mut *tx, wish_id).await?;
    funding::admit(wish.price, raised, amount).map_err(CoreError::from)?;

    let offer = OfferRepo::insert(
        &mut tx,
        &CreateOffer {
            wish_id,
            user_id: contributor_id,
            amount,
            hidden,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        offer_id = offer.id,
        wish_id,
        contributor_id,
        amount = %amount,
        "Contribution admitted"
    );

    Ok(offer)
}

fn ensure_positive_amount(amount: Money) -> AppResult<()> {
    if amount <= Money::ZERO {
        return Err(AppError::Core(CoreError::Validation(
            "amount must be positive".into(),
        )));
    }
    Ok(())
}

/// Hydrate a single offer into its response shape, re-summing the funded
/// wish's raised amount.
async fn render_offer(pool: &DbPool, id: DbId) -> AppResult<OfferResponse> {
    let offer = OfferRepo::find_with_relations(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Offer", id }))?;
    let raised = OfferRepo::raised_amount(pool, offer.wish_id).await?;
    Ok(dto::offer_response(&offer, raised))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /offers
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateOfferRequest>,
) -> AppResult<(StatusCode, Json<OfferResponse>)> {
    let offer = admit_contribution(
        &state.pool,
        user.user_id,
        input.wish_id,
        input.amount,
        input.hidden.unwrap_or(false),
    )
    .await?;

    let response = render_offer(&state.pool, offer.id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /offers[?wishId=]
///
/// Lists the offers the caller may see: hidden offers appear only for
/// their contributor or the funded wish's owner.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OffersQuery>,
) -> AppResult<Json<Vec<OfferResponse>>> {
    let offers = OfferRepo::list_with_relations(&state.pool, query.wish_id).await?;

    // Raised amounts are re-derived once per distinct wish in the page.
    let mut raised_by_wish: HashMap<DbId, Money> = HashMap::new();
    let mut responses = Vec::new();
    for offer in &offers {
        if !offer_visible_to(offer.hidden, offer.user_id, offer.owner_id, user.user_id) {
            continue;
        }
        let raised = match raised_by_wish.get(&offer.wish_id) {
            Some(raised) => *raised,
            None => {
                let raised = OfferRepo::raised_amount(&state.pool, offer.wish_id).await?;
                raised_by_wish.insert(offer.wish_id, raised);
                raised
            }
        };
        responses.push(dto::offer_response(offer, raised));
    }

    Ok(Json(responses))
}

/// GET /offers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<OfferResponse>> {
    let offer = OfferRepo::find_with_relations(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Offer", id }))?;

    if !offer_visible_to(offer.hidden, offer.user_id, offer.owner_id, user.user_id) {
        return Err(AppError::Core(CoreError::Forbidden("Offer is hidden".into())));
    }

    let raised = OfferRepo::raised_amount(&state.pool, offer.wish_id).await?;
    Ok(Json(dto::offer_response(&offer, raised)))
}

/// PATCH /offers/{id}
///
/// Only the contributor may revise their offer. Reassigning the offer to
/// another user or wish is always rejected. An amount change re-runs the
/// funding policy against the ledger minus this offer's own contribution,
/// inside the same wish-locked transaction as the write. `hidden` and
/// `status` change freely.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOfferRequest>,
) -> AppResult<Json<OfferResponse>> {
    let offer = OfferRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Offer", id }))?;

    if offer.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden("Not your offer".into())));
    }

    if input.user_id.is_some() || input.wish_id.is_some() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot reassign offer owner or wish".into(),
        )));
    }

    let patch = UpdateOffer {
        amount: input.amount,
        hidden: input.hidden,
        status: input.status,
    };

    if let Some(amount) = input.amount {
        ensure_positive_amount(amount)?;

        let mut tx = state.pool.begin().await?;

        let wish = WishRepo::find_with_owner_for_update(&mut tx, offer.wish_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Wish",
                id: offer.wish_id,
            }))?;

        // The wish relationship cannot have changed since creation, but the
        // revision path asserts the no-self-funding rule anyway.
        funding::ensure_not_self_funding(wish.owner_id, user.user_id)
            .map_err(CoreError::from)?;

        let other_raised =
            OfferRepo::raised_amount_excluding(&mut *tx, offer.wish_id, offer.id).await?;
        funding::admit(wish.price, other_raised, amount).map_err(CoreError::from)?;

        OfferRepo::update(&mut *tx, id, &patch)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "Offer", id }))?;

        tx.commit().await?;
    } else {
        OfferRepo::update(&state.pool, id, &patch)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "Offer", id }))?;
    }

    let response = render_offer(&state.pool, id).await?;
    Ok(Json(response))
}

/// DELETE /offers/{id}
///
/// Always fails with 403: contributions are retracted by cancelling them,
/// never by deleting the ledger row. The existence and ownership checks
/// still run first so the caller gets the most specific error.
pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let offer = OfferRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Offer", id }))?;

    if offer.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden("Not your offer".into())));
    }

    Err(AppError::Core(CoreError::Forbidden(
        "You cannot delete this offer".into(),
    )))
}
