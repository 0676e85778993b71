pub mod auth;
pub mod offers;
pub mod users;
pub mod wishes;
pub mod wishlists;
