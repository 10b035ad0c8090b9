use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dao::models::Player,
    dto::{format_system_time, validation::validate_player_name},
};

/// League entry returned by `/league`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PlayerSummary {
    pub id: i64,
    pub name: String,
    pub wins: u32,
}

impl From<Player> for PlayerSummary {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            name: player.name,
            wins: player.wins,
        }
    }
}

/// Payload used to register a player.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreatePlayerRequest {
    pub id: i64,
    #[validate(custom(function = "validate_player_name"))]
    pub name: String,
    /// Starting win count, zero when omitted.
    #[serde(default)]
    pub wins: u32,
}

impl From<CreatePlayerRequest> for Player {
    fn from(request: CreatePlayerRequest) -> Self {
        Player::new(request.id, request.name, request.wins)
    }
}

/// Payload naming the winner of a game.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct WinnerRequest {
    pub id: i64,
    /// Informational only; the identifier selects the player.
    #[serde(default)]
    pub name: Option<String>,
}

/// Resource description returned once a player has been created.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlayerResource {
    pub name: String,
    pub wins: u32,
    pub created_at: String,
}

impl PlayerResource {
    /// Describe `player` as created at `created_at`.
    pub fn new(player: &Player, created_at: SystemTime) -> Self {
        Self {
            name: player.name.clone(),
            wins: player.wins,
            created_at: format_system_time(created_at),
        }
    }
}
