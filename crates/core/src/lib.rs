//! Domain logic for the wishpool backend.
//!
//! Pure, storage-agnostic pieces of the funding ledger: the shared type
//! aliases, the error taxonomy, the funding admission policy, and the
//! offer visibility predicate. Nothing in this crate touches the database
//! or the HTTP layer.

pub mod error;
pub mod funding;
pub mod types;
pub mod visibility;
