use serde::{Deserialize, Serialize};

/// Competitor record persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    /// Caller-supplied identifier, unique within a league.
    pub id: i64,
    /// Display name (never blank once stored).
    pub name: String,
    /// Number of recorded wins.
    pub wins: u32,
}

impl Player {
    /// Build a player record from its parts.
    pub fn new(id: i64, name: impl Into<String>, wins: u32) -> Self {
        Self {
            id,
            name: name.into(),
            wins,
        }
    }
}

/// Ordered collection of players, serialized as a bare JSON array.
///
/// Storage order is insertion order. Presentation order (by wins) is produced
/// on demand by [`League::sorted_by_wins_descending`] and never written back.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct League(Vec<Player>);

impl League {
    /// Create an empty league.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locate a player by identifier.
    pub fn find(&self, id: i64) -> Option<&Player> {
        self.0.iter().find(|player| player.id == id)
    }

    /// Locate a player by identifier for in-place updates.
    pub fn find_mut(&mut self, id: i64) -> Option<&mut Player> {
        self.0.iter_mut().find(|player| player.id == id)
    }

    /// Locate a player by exact display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Player> {
        self.0.iter().find(|player| player.name == name)
    }

    /// Whether a player with `id` is part of the league.
    pub fn contains(&self, id: i64) -> bool {
        self.find(id).is_some()
    }

    /// Append a player at the end of the storage order.
    pub fn push(&mut self, player: Player) {
        self.0.push(player);
    }

    /// Remove the first player matching `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: i64) -> Option<Player> {
        let index = self.0.iter().position(|player| player.id == id)?;
        Some(self.0.remove(index))
    }

    /// Copy of the league ordered by wins, highest first.
    ///
    /// The sort is stable: players with equal wins keep their storage order.
    pub fn sorted_by_wins_descending(&self) -> League {
        let mut players = self.0.clone();
        players.sort_by(|a, b| b.wins.cmp(&a.wins));
        League(players)
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the league has no players.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate players in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, Player> {
        self.0.iter()
    }

    /// Players in their current order.
    pub fn as_slice(&self) -> &[Player] {
        &self.0
    }
}

impl From<Vec<Player>> for League {
    fn from(players: Vec<Player>) -> Self {
        Self(players)
    }
}

impl IntoIterator for League {
    type Item = Player;
    type IntoIter = std::vec::IntoIter<Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a League {
    type Item = &'a Player;
    type IntoIter = std::slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
