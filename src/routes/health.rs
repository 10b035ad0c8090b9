use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::health::HealthResponse, error::AppError, services::health_service, state::SharedState,
};

#[utoipa::path(
    get,
    path = "/healthcheck",
    tag = "health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
/// Return the current health status of the backend.
pub async fn healthcheck(
    State(state): State<SharedState>,
) -> Result<Json<HealthResponse>, AppError> {
    Ok(Json(health_service::health_status(&state).await?))
}

/// Configure the health routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/healthcheck", get(healthcheck))
}
