//! Command-line poker session: blind schedule and winner recording.

/// Blind announcements.
pub mod alerter;
/// Terminal front end.
pub mod cli;
#[cfg(test)]
pub(crate) mod testing;

use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tracing::info;

use crate::dao::{player_store::PlayerStore, storage::StorageError};

pub use alerter::{BlindAlerter, StdOutAlerter};
pub use cli::{Cli, CliError};

/// Blind levels announced over the course of a game.
pub const BLINDS: [u32; 11] = [100, 200, 300, 400, 500, 600, 800, 1000, 2000, 4000, 8000];
/// Minutes between blind levels before accounting for the table size.
const BASE_BLIND_MINUTES: u64 = 5;

/// Failures raised when finishing a game.
#[derive(Debug, Error)]
pub enum GameError {
    /// The winner is not registered in the league.
    #[error("no player named `{0}` in the league")]
    UnknownPlayer(String),
    /// Recording the win failed.
    #[error("failed to record win")]
    Storage(#[from] StorageError),
}

/// Lifecycle of a single game driven by the CLI.
pub trait Game {
    /// Begin a game for `players` participants.
    fn start(&mut self, players: u32);
    /// Close the game and credit `winner`.
    fn finish(&mut self, winner: &str) -> Result<(), GameError>;
}

/// Texas Hold'em table: escalating blinds and a single recorded winner.
pub struct TexasHoldem {
    alerter: Arc<dyn BlindAlerter>,
    store: Arc<dyn PlayerStore>,
}

impl TexasHoldem {
    /// Create a game announcing blinds through `alerter` and recording wins in `store`.
    pub fn new(alerter: Arc<dyn BlindAlerter>, store: Arc<dyn PlayerStore>) -> Self {
        Self { alerter, store }
    }
}

impl Game for TexasHoldem {
    fn start(&mut self, players: u32) {
        let increment = Duration::from_secs((BASE_BLIND_MINUTES + u64::from(players)) * 60);

        let mut at = Duration::ZERO;
        for amount in BLINDS {
            self.alerter.schedule_alert_at(at, amount);
            at += increment;
        }
        info!(players, increment_secs = increment.as_secs(), "game started");
    }

    fn finish(&mut self, winner: &str) -> Result<(), GameError> {
        let league = self.store.get_league();
        let player = league
            .find_by_name(winner)
            .ok_or_else(|| GameError::UnknownPlayer(winner.to_string()))?;

        let wins = self.store.record_win(player.id)?;
        info!(id = player.id, winner, wins, "game finished");
        Ok(())
    }
}
