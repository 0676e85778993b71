//! Repository for the `wishlists` table and its membership join table.

use sqlx::{PgConnection, PgPool};
use wishpool_core::types::DbId;

use crate::models::wish::WishWithOwner;
use crate::models::wishlist::{CreateWishlist, UpdateWishlist, Wishlist, WishlistWithOwner};

const COLUMNS: &str = "id, owner_id, name, image, created_at, updated_at";

const WITH_OWNER: &str = "l.id, l.owner_id, l.name, l.image, l.created_at, l.updated_at, \
     u.username AS owner_username, u.avatar AS owner_avatar, \
     u.about AS owner_about, u.created_at AS owner_created_at";

/// Provides CRUD operations for wishlists.
pub struct WishlistRepo;

impl WishlistRepo {
    /// Insert a wishlist and its membership rows in one transaction.
    ///
    /// Item ids must already be resolved by the caller; an id that slipped
    /// through still aborts the whole insert via the foreign key, so a
    /// partially-populated wishlist can never be persisted.
    pub async fn create(pool: &PgPool, input: &CreateWishlist) -> Result<Wishlist, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO wishlists (owner_id, name, image)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let wishlist = sqlx::query_as::<_, Wishlist>(&query)
            .bind(input.owner_id)
            .bind(&input.name)
            .bind(&input.image)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_items(&mut tx, wishlist.id, &input.items).await?;

        tx.commit().await?;
        Ok(wishlist)
    }

    /// Find a wishlist by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Wishlist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM wishlists WHERE id = $1");
        sqlx::query_as::<_, Wishlist>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a wishlist by ID, hydrated with its owner's public profile.
    pub async fn find_with_owner(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WishlistWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_OWNER}
             FROM wishlists l
             JOIN users u ON u.id = l.owner_id
             WHERE l.id = $1"
        );
        sqlx::query_as::<_, WishlistWithOwner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List wishlists, optionally filtered by exact name, newest first.
    pub async fn list_with_owner(
        pool: &PgPool,
        name: Option<&str>,
    ) -> Result<Vec<WishlistWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_OWNER}
             FROM wishlists l
             JOIN users u ON u.id = l.owner_id
             WHERE ($1::varchar IS NULL OR l.name = $1)
             ORDER BY l.created_at DESC"
        );
        sqlx::query_as::<_, WishlistWithOwner>(&query)
            .bind(name)
            .fetch_all(pool)
            .await
    }

    /// Member wishes of a wishlist, hydrated with their owners.
    pub async fn items(pool: &PgPool, wishlist_id: DbId) -> Result<Vec<WishWithOwner>, sqlx::Error> {
        sqlx::query_as::<_, WishWithOwner>(
            "SELECT w.id, w.owner_id, w.name, w.link, w.image, w.price, w.description,
                    w.copied, w.created_at, w.updated_at,
                    u.username AS owner_username, u.avatar AS owner_avatar,
                    u.about AS owner_about, u.created_at AS owner_created_at
             FROM wishlist_items li
             JOIN wishes w ON w.id = li.wish_id
             JOIN users u ON u.id = w.owner_id
             WHERE li.wishlist_id = $1
             ORDER BY w.id",
        )
        .bind(wishlist_id)
        .fetch_all(pool)
        .await
    }

    /// Update a wishlist. `items: Some(_)` replaces the whole membership
    /// set (empty vector clears it); `None` leaves members untouched. The
    /// row update and the membership replacement share one transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWishlist,
    ) -> Result<Option<Wishlist>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE wishlists SET
                name = COALESCE($2, name),
                image = COALESCE($3, image)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(wishlist) = sqlx::query_as::<_, Wishlist>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.image)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(items) = &input.items {
            sqlx::query("DELETE FROM wishlist_items WHERE wishlist_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::insert_items(&mut tx, id, items).await?;
        }

        tx.commit().await?;
        Ok(Some(wishlist))
    }

    /// Delete a wishlist. Returns `true` if a row was removed.
    ///
    /// Membership rows cascade away; the member wishes themselves are
    /// never touched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM wishlists WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_items(
        conn: &mut PgConnection,
        wishlist_id: DbId,
        items: &[DbId],
    ) -> Result<(), sqlx::Error> {
        if items.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO wishlist_items (wishlist_id, wish_id)
             SELECT $1, unnest($2::bigint[])",
        )
        .bind(wishlist_id)
        .bind(items)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
