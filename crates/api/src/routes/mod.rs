pub mod health;
pub mod readings;

use axum::Router;

use crate::state::AppState;

/// Build the device-facing route tree.
///
/// Route hierarchy:
///
/// ```text
/// /readings/evaluate                               evaluate a reading (POST, device secret)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/readings", readings::router())
}
