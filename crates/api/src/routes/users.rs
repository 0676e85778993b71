//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET   /me                   -> me
/// PATCH /me                   -> update_me
/// GET   /me/wishes            -> my_wishes
/// POST  /find                 -> find
/// GET   /{username}           -> get_by_username
/// GET   /{username}/wishes    -> wishes_by_username
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(users::me).patch(users::update_me))
        .route("/me/wishes", get(users::my_wishes))
        .route("/find", post(users::find))
        .route("/{username}", get(users::get_by_username))
        .route("/{username}/wishes", get(users::wishes_by_username))
}
