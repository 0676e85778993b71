//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Most methods accept `&PgPool`; methods that participate in the ledger
//! admission transaction accept an executor or a raw connection so they
//! can run against `&mut *tx`.

pub mod offer_repo;
pub mod user_repo;
pub mod wish_repo;
pub mod wishlist_repo;

pub use offer_repo::OfferRepo;
pub use user_repo::UserRepo;
pub use wish_repo::WishRepo;
pub use wishlist_repo::WishlistRepo;
