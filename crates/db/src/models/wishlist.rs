//! Wishlist entity model and DTOs.

use sqlx::FromRow;
use wishpool_core::types::{DbId, Timestamp};

/// Wishlist row from the `wishlists` table. Member wishes live in the
/// `wishlist_items` join table and are loaded separately.
#[derive(Debug, Clone, FromRow)]
pub struct Wishlist {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wishlist row joined with its owner's public profile fields.
#[derive(Debug, Clone, FromRow)]
pub struct WishlistWithOwner {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub owner_username: String,
    pub owner_avatar: Option<String>,
    pub owner_about: Option<String>,
    pub owner_created_at: Timestamp,
}

/// DTO for creating a wishlist. `items` must already be resolved wish ids;
/// the repository inserts the membership rows in the same transaction as
/// the wishlist itself.
#[derive(Debug, Clone)]
pub struct CreateWishlist {
    pub owner_id: DbId,
    pub name: String,
    pub image: Option<String>,
    pub items: Vec<DbId>,
}

/// DTO for patching a wishlist. `items: Some(vec![])` clears all members;
/// `None` leaves the membership untouched.
#[derive(Debug, Default)]
pub struct UpdateWishlist {
    pub name: Option<String>,
    pub image: Option<String>,
    pub items: Option<Vec<DbId>>,
}
