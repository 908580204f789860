pub mod generation;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree; see [`generation::router`] for the routes.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(generation::router())
}
