//! Row models and persistence DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Flat hydrated row structs for queries that join related tables
//! - Create / update DTOs for inserts and patches

pub mod offer;
pub mod user;
pub mod wish;
pub mod wishlist;
