use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the player league API.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::league::get_league,
        crate::routes::league::get_player_score,
        crate::routes::league::record_win,
        crate::routes::league::create_player,
        crate::routes::league::delete_player,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::player::PlayerSummary,
            crate::dto::player::CreatePlayerRequest,
            crate::dto::player::WinnerRequest,
            crate::dto::player::PlayerResource,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "league", description = "Player league operations"),
    )
)]
pub struct ApiDoc;
