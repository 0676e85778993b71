//! Route definitions for the `/wishlists` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::wishlists;
use crate::state::AppState;

/// Routes mounted at `/wishlists`.
///
/// ```text
/// GET    /       -> list (optional ?topic= exact-name filter)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PATCH  /{id}   -> update
/// DELETE /{id}   -> remove
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlists::list).post(wishlists::create))
        .route(
            "/{id}",
            get(wishlists::get_by_id)
                .patch(wishlists::update)
                .delete(wishlists::remove),
        )
}
