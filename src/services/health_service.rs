use crate::{dto::health::HealthResponse, error::ServiceError, state::SharedState};

/// Report service health along with the current league size.
pub async fn health_status(state: &SharedState) -> Result<HealthResponse, ServiceError> {
    let players = state.with_store(|store| store.get_league().len()).await?;
    Ok(HealthResponse::ok(players))
}
