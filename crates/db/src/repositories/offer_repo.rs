//! Repository for the `offers` table -- the contribution ledger.

use sqlx::{PgConnection, PgPool};
use wishpool_core::types::{DbId, Money};

use crate::models::offer::{CreateOffer, Offer, OfferWithRelations, UpdateOffer};

const COLUMNS: &str = "id, wish_id, user_id, amount, hidden, status, created_at, updated_at";

/// SELECT list for offers hydrated with contributor, wish, and wish owner.
const WITH_RELATIONS: &str = "o.id, o.wish_id, o.user_id, o.amount, o.hidden, o.status, \
     o.created_at, o.updated_at, \
     cu.username AS contributor_username, cu.avatar AS contributor_avatar, \
     cu.about AS contributor_about, cu.created_at AS contributor_created_at, \
     w.name AS wish_name, w.link AS wish_link, w.image AS wish_image, \
     w.price AS wish_price, w.description AS wish_description, w.copied AS wish_copied, \
     w.created_at AS wish_created_at, w.updated_at AS wish_updated_at, \
     w.owner_id AS owner_id, ou.username AS owner_username, ou.avatar AS owner_avatar, \
     ou.about AS owner_about, ou.created_at AS owner_created_at";

const RELATION_JOINS: &str = "FROM offers o \
     JOIN users cu ON cu.id = o.user_id \
     JOIN wishes w ON w.id = o.wish_id \
     JOIN users ou ON ou.id = w.owner_id";

/// Provides ledger operations for offers.
pub struct OfferRepo;

impl OfferRepo {
    /// Insert a new ledger entry with status `active`.
    ///
    /// Runs on a raw connection: admission must happen inside the same
    /// transaction that locked the wish row and summed the ledger.
    pub async fn insert(conn: &mut PgConnection, input: &CreateOffer) -> Result<Offer, sqlx::Error> {
        let query = format!(
            "INSERT INTO offers (wish_id, user_id, amount, hidden)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Offer>(&query)
            .bind(input.wish_id)
            .bind(input.user_id)
            .bind(input.amount)
            .bind(input.hidden)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find an offer by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Offer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM offers WHERE id = $1");
        sqlx::query_as::<_, Offer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an offer by ID, hydrated with contributor and wish relations.
    pub async fn find_with_relations(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OfferWithRelations>, sqlx::Error> {
        let query = format!("SELECT {WITH_RELATIONS} {RELATION_JOINS} WHERE o.id = $1");
        sqlx::query_as::<_, OfferWithRelations>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List hydrated offers, optionally restricted to one wish, oldest first.
    ///
    /// Returns every matching row; visibility filtering against the viewer
    /// happens in the caller.
    pub async fn list_with_relations(
        pool: &PgPool,
        wish_id: Option<DbId>,
    ) -> Result<Vec<OfferWithRelations>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_RELATIONS} {RELATION_JOINS}
             WHERE ($1::bigint IS NULL OR o.wish_id = $1)
             ORDER BY o.created_at, o.id"
        );
        sqlx::query_as::<_, OfferWithRelations>(&query)
            .bind(wish_id)
            .fetch_all(pool)
            .await
    }

    /// Sum of eligible contribution amounts for a wish.
    ///
    /// Only `active` and `completed` offers count; `cancelled` never does.
    /// There is no stored raised column -- this query is the only source of
    /// the aggregate, so it is recomputed on every read that needs it.
    pub async fn raised_amount(
        executor: impl sqlx::PgExecutor<'_>,
        wish_id: DbId,
    ) -> Result<Money, sqlx::Error> {
        let (sum,): (Money,) = sqlx::query_as(
            "SELECT COALESCE(SUM(amount), 0)
             FROM offers
             WHERE wish_id = $1 AND status IN ('active', 'completed')",
        )
        .bind(wish_id)
        .fetch_one(executor)
        .await?;
        Ok(sum)
    }

    /// Raised amount for a wish excluding one offer's own contribution.
    ///
    /// Used when re-admitting an amount revision: the offer under revision
    /// must not count against itself. Excluding by id (rather than
    /// subtracting the old amount) stays correct when the offer is
    /// currently cancelled and contributes nothing.
    pub async fn raised_amount_excluding(
        executor: impl sqlx::PgExecutor<'_>,
        wish_id: DbId,
        offer_id: DbId,
    ) -> Result<Money, sqlx::Error> {
        let (sum,): (Money,) = sqlx::query_as(
            "SELECT COALESCE(SUM(amount), 0)
             FROM offers
             WHERE wish_id = $1 AND status IN ('active', 'completed') AND id <> $2",
        )
        .bind(wish_id)
        .bind(offer_id)
        .fetch_one(executor)
        .await?;
        Ok(sum)
    }

    /// Number of ledger entries for a wish, in any status.
    ///
    /// Gates the price freeze and wish deletion: a wish with any entries,
    /// cancelled ones included, has had funding activity.
    pub async fn count_for_wish(
        executor: impl sqlx::PgExecutor<'_>,
        wish_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM offers WHERE wish_id = $1")
            .bind(wish_id)
            .fetch_one(executor)
            .await?;
        Ok(count)
    }

    /// Update an offer. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. Amount changes
    /// must be re-admitted by the caller (inside a wish-locked transaction)
    /// before this runs; pass an executor from that transaction.
    pub async fn update(
        executor: impl sqlx::PgExecutor<'_>,
        id: DbId,
        input: &UpdateOffer,
    ) -> Result<Option<Offer>, sqlx::Error> {
        let query = format!(
            "UPDATE offers SET
                amount = COALESCE($2, amount),
                hidden = COALESCE($3, hidden),
                status = COALESCE($4, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Offer>(&query)
            .bind(id)
            .bind(input.amount)
            .bind(input.hidden)
            .bind(input.status)
            .fetch_optional(executor)
            .await
    }
}
