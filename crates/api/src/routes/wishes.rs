//! Route definitions for the `/wishes` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::wishes;
use crate::state::AppState;

/// Routes mounted at `/wishes`.
///
/// ```text
/// GET    /last         -> last (public)
/// GET    /top          -> top (public)
/// POST   /             -> create
/// GET    /{id}         -> get_by_id
/// PATCH  /{id}         -> update
/// DELETE /{id}         -> remove
/// POST   /{id}/copy    -> copy
/// POST   /{id}/offers  -> create_offer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/last", get(wishes::last))
        .route("/top", get(wishes::top))
        .route("/", post(wishes::create))
        .route(
            "/{id}",
            get(wishes::get_by_id)
                .patch(wishes::update)
                .delete(wishes::remove),
        )
        .route("/{id}/copy", post(wishes::copy))
        .route("/{id}/offers", post(wishes::create_offer))
}
