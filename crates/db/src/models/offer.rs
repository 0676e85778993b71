//! Offer (ledger entry) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wishpool_core::types::{DbId, Money, Timestamp};

/// Lifecycle state of a ledger entry.
///
/// `Active` and `Completed` offers count toward a wish's raised amount;
/// `Cancelled` offers never do. Retraction happens by flipping the status,
/// never by deleting the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "offer_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Active,
    Cancelled,
    Completed,
}

/// Offer row from the `offers` table.
#[derive(Debug, Clone, FromRow)]
pub struct Offer {
    pub id: DbId,
    pub wish_id: DbId,
    pub user_id: DbId,
    pub amount: Money,
    pub hidden: bool,
    pub status: OfferStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Offer row joined with the contributor's public profile and the funded
/// wish (including the wish owner's public profile).
///
/// One flat row per offer so a single query hydrates everything the API
/// needs for response shaping and visibility filtering.
#[derive(Debug, Clone, FromRow)]
pub struct OfferWithRelations {
    pub id: DbId,
    pub wish_id: DbId,
    pub user_id: DbId,
    pub amount: Money,
    pub hidden: bool,
    pub status: OfferStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    // Contributor
    pub contributor_username: String,
    pub contributor_avatar: Option<String>,
    pub contributor_about: Option<String>,
    pub contributor_created_at: Timestamp,
    // Funded wish
    pub wish_name: String,
    pub wish_link: String,
    pub wish_image: String,
    pub wish_price: Money,
    pub wish_description: Option<String>,
    pub wish_copied: i32,
    pub wish_created_at: Timestamp,
    pub wish_updated_at: Timestamp,
    // Wish owner
    pub owner_id: DbId,
    pub owner_username: String,
    pub owner_avatar: Option<String>,
    pub owner_about: Option<String>,
    pub owner_created_at: Timestamp,
}

/// DTO for inserting a new ledger entry. New offers are always `active`.
#[derive(Debug, Clone)]
pub struct CreateOffer {
    pub wish_id: DbId,
    pub user_id: DbId,
    pub amount: Money,
    pub hidden: bool,
}

/// DTO for patching an offer. Amount changes must pass the funding policy
/// again; `hidden` and `status` are freely mutable by the contributor.
/// Owner and wish reassignment are not representable here.
#[derive(Debug, Default)]
pub struct UpdateOffer {
    pub amount: Option<Money>,
    pub hidden: Option<bool>,
    pub status: Option<OfferStatus>,
}
