use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::dao::{
    models::{League, Player},
    storage::{StorageError, StorageResult},
};

use super::{PlayerStore, validate_new_player};

/// Volatile player store, handy for tests and throwaway sessions.
#[derive(Default)]
pub struct InMemoryPlayerStore {
    league: Mutex<League>,
}

impl InMemoryPlayerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `league`.
    pub fn with_league(league: League) -> Self {
        Self {
            league: Mutex::new(league),
        }
    }

    fn lock(&self) -> MutexGuard<'_, League> {
        self.league.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PlayerStore for InMemoryPlayerStore {
    fn get_league(&self) -> League {
        self.lock().sorted_by_wins_descending()
    }

    fn get_player_score(&self, id: i64) -> u32 {
        self.lock().find(id).map_or(0, |player| player.wins)
    }

    fn record_win(&self, id: i64) -> StorageResult<u32> {
        let mut league = self.lock();
        let player = league
            .find_mut(id)
            .ok_or(StorageError::PlayerNotFound { id })?;
        player.wins = player.wins.saturating_add(1);
        Ok(player.wins)
    }

    fn add_player(&self, player: Player) -> StorageResult<()> {
        let mut league = self.lock();
        validate_new_player(&league, &player)?;
        league.push(player);
        Ok(())
    }

    fn delete_player(&self, id: i64) -> StorageResult<()> {
        self.lock()
            .remove(id)
            .map(|_| ())
            .ok_or(StorageError::PlayerNotFound { id })
    }
}
