use axum::Router;

use crate::state::SharedState;

/// Swagger UI and OpenAPI document.
pub mod docs;
mod extract;
/// Health check route.
pub mod health;
/// League table and player management.
pub mod league;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(league::router())
        .merge(docs::router())
        .with_state(state)
}
