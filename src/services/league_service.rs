//! Business logic behind the league routes. Every call hops onto the
//! blocking pool because the store may touch the disk.

use std::time::SystemTime;

use tracing::debug;

use crate::{
    dao::models::Player,
    dto::player::{CreatePlayerRequest, PlayerResource, PlayerSummary},
    error::ServiceError,
    state::SharedState,
};

/// League ordered by wins, highest first.
pub async fn league(state: &SharedState) -> Result<Vec<PlayerSummary>, ServiceError> {
    let league = state.with_store(|store| store.get_league()).await?;
    Ok(league.into_iter().map(PlayerSummary::from).collect())
}

/// Wins recorded for `id`; unknown players report zero.
pub async fn player_score(state: &SharedState, id: i64) -> Result<u32, ServiceError> {
    state
        .with_store(move |store| store.get_player_score(id))
        .await
}

/// Record a win and return the updated total.
pub async fn record_win(state: &SharedState, id: i64) -> Result<u32, ServiceError> {
    let wins = state
        .with_store(move |store| store.record_win(id))
        .await??;
    debug!(id, wins, "win recorded through api");
    Ok(wins)
}

/// Register a new player.
pub async fn create_player(
    state: &SharedState,
    request: CreatePlayerRequest,
) -> Result<(i64, PlayerResource), ServiceError> {
    let player = Player::from(request);
    let id = player.id;
    let resource = PlayerResource::new(&player, SystemTime::now());

    state
        .with_store(move |store| store.add_player(player))
        .await??;

    Ok((id, resource))
}

/// Remove a player.
pub async fn delete_player(state: &SharedState, id: i64) -> Result<(), ServiceError> {
    state
        .with_store(move |store| store.delete_player(id))
        .await??;
    Ok(())
}
