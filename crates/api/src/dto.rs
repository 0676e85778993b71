//! Response shapes and the mapping functions that build them.
//!
//! Each mapper is a pure function from hydrated rows (plus any derived
//! values the caller already computed, like `raised`) to an output record.
//! Domain entities stay free of presentation concerns; everything
//! wire-facing lives here. The wire format is camelCase.

use serde::Serialize;
use wishpool_core::types::{DbId, Money, Timestamp};
use wishpool_core::visibility::offer_visible_to;
use wishpool_db::models::offer::{OfferStatus, OfferWithRelations};
use wishpool_db::models::user::User;
use wishpool_db::models::wish::WishWithOwner;
use wishpool_db::models::wishlist::WishlistWithOwner;

/// Public profile embedded in wish/offer/wishlist responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: DbId,
    pub username: String,
    pub avatar: Option<String>,
    pub about: Option<String>,
    pub created_at: Timestamp,
}

/// The caller's own profile. Includes the email, never the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateUser {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub about: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wish rendering without offer detail. Used for the recent/top listings
/// and for wishlist members, always annotated with the derived `raised`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishSummary {
    pub id: DbId,
    pub name: String,
    pub link: String,
    pub image: String,
    pub price: Money,
    pub description: Option<String>,
    pub copied: i32,
    pub raised: Money,
    pub owner: PublicUser,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Offer as embedded in a wish detail rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedOffer {
    pub id: DbId,
    pub amount: Money,
    pub hidden: bool,
    pub status: OfferStatus,
    pub user: PublicUser,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full wish detail: summary plus the viewer-visible slice of its ledger.
#[derive(Debug, Clone, Serialize)]
pub struct WishResponse {
    #[serde(flatten)]
    pub summary: WishSummary,
    pub offers: Vec<EmbeddedOffer>,
}

/// Standalone offer rendering with its contributor and funded wish.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferResponse {
    pub id: DbId,
    pub amount: Money,
    pub hidden: bool,
    pub status: OfferStatus,
    pub user: PublicUser,
    pub item: WishSummary,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wishlist rendering: owner plus member summaries, never offer detail.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistResponse {
    pub id: DbId,
    pub name: String,
    pub image: Option<String>,
    pub owner: PublicUser,
    pub items: Vec<WishSummary>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PublicUser {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            about: user.about.clone(),
            created_at: user.created_at,
        }
    }
}

impl PrivateUser {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            about: user.about.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Owner profile from a hydrated wish row.
fn wish_owner(wish: &WishWithOwner) -> PublicUser {
    PublicUser {
        id: wish.owner_id,
        username: wish.owner_username.clone(),
        avatar: wish.owner_avatar.clone(),
        about: wish.owner_about.clone(),
        created_at: wish.owner_created_at,
    }
}

/// Contributor profile from a hydrated offer row.
fn offer_contributor(offer: &OfferWithRelations) -> PublicUser {
    PublicUser {
        id: offer.user_id,
        username: offer.contributor_username.clone(),
        avatar: offer.contributor_avatar.clone(),
        about: offer.contributor_about.clone(),
        created_at: offer.contributor_created_at,
    }
}

/// Build a wish summary from a hydrated row and its freshly derived
/// raised amount.
pub fn wish_summary(wish: &WishWithOwner, raised: Money) -> WishSummary {
    WishSummary {
        id: wish.id,
        name: wish.name.clone(),
        link: wish.link.clone(),
        image: wish.image.clone(),
        price: wish.price,
        description: wish.description.clone(),
        copied: wish.copied,
        raised,
        owner: wish_owner(wish),
        created_at: wish.created_at,
        updated_at: wish.updated_at,
    }
}

/// Build a full wish detail for a viewer.
///
/// The offer slice is filtered through the visibility predicate, so the
/// wish owner sees every offer on their own wish (hidden included), a
/// contributor sees their own hidden offer, and everyone else sees only
/// public ones.
pub fn wish_response(
    wish: &WishWithOwner,
    raised: Money,
    offers: &[OfferWithRelations],
    viewer_id: DbId,
) -> WishResponse {
    let offers = offers
        .iter()
        .filter(|o| offer_visible_to(o.hidden, o.user_id, wish.owner_id, viewer_id))
        .map(|o| EmbeddedOffer {
            id: o.id,
            amount: o.amount,
            hidden: o.hidden,
            status: o.status,
            user: offer_contributor(o),
            created_at: o.created_at,
            updated_at: o.updated_at,
        })
        .collect();

    WishResponse {
        summary: wish_summary(wish, raised),
        offers,
    }
}

/// Build a standalone offer rendering. `wish_raised` is the derived raised
/// amount of the funded wish, re-summed by the caller.
pub fn offer_response(offer: &OfferWithRelations, wish_raised: Money) -> OfferResponse {
    OfferResponse {
        id: offer.id,
        amount: offer.amount,
        hidden: offer.hidden,
        status: offer.status,
        user: offer_contributor(offer),
        item: WishSummary {
            id: offer.wish_id,
            name: offer.wish_name.clone(),
            link: offer.wish_link.clone(),
            image: offer.wish_image.clone(),
            price: offer.wish_price,
            description: offer.wish_description.clone(),
            copied: offer.wish_copied,
            raised: wish_raised,
            owner: PublicUser {
                id: offer.owner_id,
                username: offer.owner_username.clone(),
                avatar: offer.owner_avatar.clone(),
                about: offer.owner_about.clone(),
                created_at: offer.owner_created_at,
            },
            created_at: offer.wish_created_at,
            updated_at: offer.wish_updated_at,
        },
        created_at: offer.created_at,
        updated_at: offer.updated_at,
    }
}

/// Build a wishlist rendering from its row and pre-rendered member summaries.
pub fn wishlist_response(wishlist: &WishlistWithOwner, items: Vec<WishSummary>) -> WishlistResponse {
    WishlistResponse {
        id: wishlist.id,
        name: wishlist.name.clone(),
        image: wishlist.image.clone(),
        owner: PublicUser {
            id: wishlist.owner_id,
            username: wishlist.owner_username.clone(),
            avatar: wishlist.owner_avatar.clone(),
            about: wishlist.owner_about.clone(),
            created_at: wishlist.owner_created_at,
        },
        items,
        created_at: wishlist.created_at,
        updated_at: wishlist.updated_at,
    }
}
