//! Offer visibility predicate.
//!
//! A hidden offer is concealed from everyone except its contributor and
//! the owner of the wish it funds. Applied uniformly wherever offers are
//! rendered: the ledger listing, wish detail, and single-offer lookup.

use crate::types::DbId;

/// Whether `viewer_id` may see an offer.
pub fn offer_visible_to(
    hidden: bool,
    contributor_id: DbId,
    wish_owner_id: DbId,
    viewer_id: DbId,
) -> bool {
    !hidden || viewer_id == contributor_id || viewer_id == wish_owner_id
}
