//! Wish entity model and DTOs.

use sqlx::FromRow;
use wishpool_core::types::{DbId, Money, Timestamp};

/// Wish row from the `wishes` table.
#[derive(Debug, Clone, FromRow)]
pub struct Wish {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub link: String,
    pub image: String,
    pub price: Money,
    pub description: Option<String>,
    pub copied: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wish row joined with its owner's public profile fields.
///
/// `raised` is not part of this row -- it is always re-summed from the
/// offers table by the caller, never read from a stored column.
#[derive(Debug, Clone, FromRow)]
pub struct WishWithOwner {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub link: String,
    pub image: String,
    pub price: Money,
    pub description: Option<String>,
    pub copied: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub owner_username: String,
    pub owner_avatar: Option<String>,
    pub owner_about: Option<String>,
    pub owner_created_at: Timestamp,
}

/// DTO for creating a new wish. `copied` always starts at zero.
#[derive(Debug, Clone)]
pub struct CreateWish {
    pub owner_id: DbId,
    pub name: String,
    pub link: String,
    pub image: String,
    pub price: Money,
    pub description: Option<String>,
}

/// DTO for updating an existing wish. All fields are optional; the price
/// freeze once the wish has ledger entries is enforced by the caller, which
/// must compare against the stored row first.
#[derive(Debug, Default)]
pub struct UpdateWish {
    pub name: Option<String>,
    pub link: Option<String>,
    pub image: Option<String>,
    pub price: Option<Money>,
    pub description: Option<String>,
}
