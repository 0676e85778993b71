pub mod auth;
pub mod health;
pub mod offers;
pub mod users;
pub mod wishes;
pub mod wishlists;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /signup, /signin                      authentication
/// /users/...                            profiles and per-user catalogs
/// /wishes/...                           wish catalog and in-context offers
/// /offers/...                           contribution ledger
/// /wishlists/...                        wish groupings
/// ```
///
/// `/signup`, `/signin` and the public listings `/wishes/last` and
/// `/wishes/top` are reachable without a token; everything else extracts
/// an authenticated user.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/users", users::router())
        .nest("/wishes", wishes::router())
        .nest("/offers", offers::router())
        .nest("/wishlists", wishlists::router())
}
