use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use axum_valid::Valid;

use super::extract::AppJson;
use crate::{
    dto::player::{CreatePlayerRequest, PlayerResource, PlayerSummary, WinnerRequest},
    error::AppError,
    services::league_service,
    state::SharedState,
};

/// Routes mapping one-to-one onto the player store operations.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/league", get(get_league))
        .route("/info/{id}", get(get_player_score))
        .route("/update", patch(record_win))
        .route("/create", post(create_player))
        .route("/delete/{id}", delete(delete_player))
}

/// Return the league table ordered by wins.
#[utoipa::path(
    get,
    path = "/league",
    tag = "league",
    responses((status = 200, description = "League ordered by wins", body = [PlayerSummary]))
)]
pub async fn get_league(
    State(state): State<SharedState>,
) -> Result<Json<Vec<PlayerSummary>>, AppError> {
    Ok(Json(league_service::league(&state).await?))
}

/// Report how many wins a player has; unknown players have zero.
#[utoipa::path(
    get,
    path = "/info/{id}",
    tag = "league",
    params(("id" = i64, Path, description = "Identifier of the player")),
    responses((status = 200, description = "Score sentence", body = String, content_type = "text/plain"))
)]
pub async fn get_player_score(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<String, AppError> {
    let wins = league_service::player_score(&state, id).await?;
    Ok(format!("The player with id: {id} has {wins} wins"))
}

/// Record a win for the player named in the body.
#[utoipa::path(
    patch,
    path = "/update",
    tag = "league",
    request_body = WinnerRequest,
    responses(
        (status = 200, description = "Win recorded", body = String, content_type = "text/plain"),
        (status = 400, description = "Undecodable body"),
        (status = 404, description = "Unknown player")
    )
)]
pub async fn record_win(
    State(state): State<SharedState>,
    Valid(AppJson(payload)): Valid<AppJson<WinnerRequest>>,
) -> Result<String, AppError> {
    let id = payload.id;
    let wins = league_service::record_win(&state, id).await?;
    Ok(format!("The player with id: {id} has {wins} wins now"))
}

/// Register a new player.
#[utoipa::path(
    post,
    path = "/create",
    tag = "league",
    request_body = CreatePlayerRequest,
    responses(
        (status = 201, description = "Player created", body = PlayerResource),
        (status = 400, description = "Invalid player"),
        (status = 409, description = "Identifier already taken")
    )
)]
pub async fn create_player(
    State(state): State<SharedState>,
    Valid(AppJson(payload)): Valid<AppJson<CreatePlayerRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let (id, resource) = league_service::create_player(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/info/{id}"))],
        Json(resource),
    ))
}

/// Remove a player from the league.
#[utoipa::path(
    delete,
    path = "/delete/{id}",
    tag = "league",
    params(("id" = i64, Path, description = "Identifier of the player to delete")),
    responses(
        (status = 204, description = "Player deleted"),
        (status = 404, description = "Unknown player")
    )
)]
pub async fn delete_player(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    league_service::delete_player(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
