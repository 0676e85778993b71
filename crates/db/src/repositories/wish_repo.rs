//! Repository for the `wishes` table.

use sqlx::{PgConnection, PgPool};
use wishpool_core::types::DbId;

use crate::models::wish::{CreateWish, UpdateWish, Wish, WishWithOwner};

const COLUMNS: &str =
    "id, owner_id, name, link, image, price, description, copied, created_at, updated_at";

/// SELECT list for wish rows joined with the owner's public profile.
const WITH_OWNER: &str = "w.id, w.owner_id, w.name, w.link, w.image, w.price, w.description, \
     w.copied, w.created_at, w.updated_at, \
     u.username AS owner_username, u.avatar AS owner_avatar, \
     u.about AS owner_about, u.created_at AS owner_created_at";

/// Provides CRUD operations for wishes.
pub struct WishRepo;

impl WishRepo {
    /// Insert a new wish with `copied = 0`, returning the created row.
    ///
    /// Takes an executor so wish copy can create the duplicate inside the
    /// same transaction that increments the source counter.
    pub async fn create(
        executor: impl sqlx::PgExecutor<'_>,
        input: &CreateWish,
    ) -> Result<Wish, sqlx::Error> {
        let query = format!(
            "INSERT INTO wishes (owner_id, name, link, image, price, description)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wish>(&query)
            .bind(input.owner_id)
            .bind(&input.name)
            .bind(&input.link)
            .bind(&input.image)
            .bind(input.price)
            .bind(&input.description)
            .fetch_one(executor)
            .await
    }

    /// Find a wish by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Wish>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM wishes WHERE id = $1");
        sqlx::query_as::<_, Wish>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a wish by ID, hydrated with its owner's public profile.
    pub async fn find_with_owner(
        executor: impl sqlx::PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<WishWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_OWNER}
             FROM wishes w
             JOIN users u ON u.id = w.owner_id
             WHERE w.id = $1"
        );
        sqlx::query_as::<_, WishWithOwner>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a wish with its owner, locking the wish row (`FOR UPDATE OF w`).
    ///
    /// Ledger admission serializes on this lock: concurrent contributions
    /// against the same wish queue behind it, so each admission decision
    /// sees a raised amount that cannot change before its insert commits.
    pub async fn find_with_owner_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<WishWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_OWNER}
             FROM wishes w
             JOIN users u ON u.id = w.owner_id
             WHERE w.id = $1
             FOR UPDATE OF w"
        );
        sqlx::query_as::<_, WishWithOwner>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// The `n` most recently created wishes, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<WishWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_OWNER}
             FROM wishes w
             JOIN users u ON u.id = w.owner_id
             ORDER BY w.created_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, WishWithOwner>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// The `n` most copied wishes.
    pub async fn list_top(pool: &PgPool, limit: i64) -> Result<Vec<WishWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_OWNER}
             FROM wishes w
             JOIN users u ON u.id = w.owner_id
             ORDER BY w.copied DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, WishWithOwner>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// All wishes owned by a user, newest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<WishWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_OWNER}
             FROM wishes w
             JOIN users u ON u.id = w.owner_id
             WHERE w.owner_id = $1
             ORDER BY w.created_at DESC"
        );
        sqlx::query_as::<_, WishWithOwner>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch multiple wishes by ID. Missing ids are simply absent from the
    /// result; callers that need all-or-nothing semantics compare lengths.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Wish>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM wishes WHERE id = ANY($1)");
        sqlx::query_as::<_, Wish>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Update a wish. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. Ownership and
    /// the price freeze are checked by the caller against the loaded row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWish,
    ) -> Result<Option<Wish>, sqlx::Error> {
        let query = format!(
            "UPDATE wishes SET
                name = COALESCE($2, name),
                link = COALESCE($3, link),
                image = COALESCE($4, image),
                price = COALESCE($5, price),
                description = COALESCE($6, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wish>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.link)
            .bind(&input.image)
            .bind(input.price)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a wish. Returns `true` if a row was removed.
    ///
    /// Membership rows in `wishlist_items` cascade away with the wish.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM wishes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the copy counter by 1. Runs on a raw connection so the
    /// increment and the duplicate insert commit or roll back together.
    pub async fn increment_copied(conn: &mut PgConnection, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE wishes SET copied = copied + 1 WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
