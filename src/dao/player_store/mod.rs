/// JSON document backend.
pub mod file;
/// Volatile backend.
pub mod memory;

use crate::dao::{
    models::{League, Player},
    storage::{StorageError, StorageResult},
};

pub use file::FileSystemPlayerStore;
pub use memory::InMemoryPlayerStore;

/// Abstraction over the persistence layer for the player league.
///
/// Calls are synchronous and may block on I/O. Implementations serialize
/// mutations internally so concurrent callers never lose an update.
pub trait PlayerStore: Send + Sync {
    /// Snapshot of the league ordered by wins, highest first.
    fn get_league(&self) -> League;
    /// Wins recorded for `id`, or `0` when the player is unknown.
    fn get_player_score(&self, id: i64) -> u32;
    /// Add one win to an existing player, returning the new total.
    fn record_win(&self, id: i64) -> StorageResult<u32>;
    /// Register a new player.
    fn add_player(&self, player: Player) -> StorageResult<()>;
    /// Remove a player.
    fn delete_player(&self, id: i64) -> StorageResult<()>;
}

/// Checks shared by every backend before a player joins `league`.
pub(crate) fn validate_new_player(league: &League, player: &Player) -> StorageResult<()> {
    if player.name.trim().is_empty() {
        return Err(StorageError::InvalidPlayer {
            reason: "player name cannot be empty".into(),
        });
    }

    if league.contains(player.id) {
        return Err(StorageError::DuplicatePlayer { id: player.id });
    }

    Ok(())
}
