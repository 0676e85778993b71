//! Route definitions for the `/offers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::offers;
use crate::state::AppState;

/// Routes mounted at `/offers`.
///
/// ```text
/// GET    /       -> list (visibility-filtered, optional ?wishId=)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PATCH  /{id}   -> update
/// DELETE /{id}   -> remove (always 403 after the ownership checks)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(offers::list).post(offers::create))
        .route(
            "/{id}",
            get(offers::get_by_id)
                .patch(offers::update)
                .delete(offers::remove),
        )
}
