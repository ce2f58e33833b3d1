//! Player registry
//!
//! Owns every `Player` of a colony. Everything else refers to players by id.

use std::collections::HashMap;

use crate::models::{Player, PlayerId, Rank};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerRegistry {
    players: HashMap<PlayerId, Player>,
}

impl PlayerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.players.contains_key(id)
    }

    #[must_use]
    pub fn rank_of(&self, id: &PlayerId) -> Option<Rank> {
        self.players.get(id).map(Player::rank)
    }

    /// Add a player unless one with the same id already exists
    ///
    /// An existing entry is never overwritten, so a re-add cannot change a rank.
    pub fn insert(&mut self, player: Player) -> bool {
        if self.players.contains_key(&player.id()) {
            return false;
        }
        self.players.insert(player.id(), player);
        true
    }

    /// Add or replace a player
    pub(crate) fn upsert(&mut self, player: Player) {
        self.players.insert(player.id(), player);
    }

    /// Remove a player. Owners and unknown ids are left alone.
    pub fn remove(&mut self, id: &PlayerId) -> bool {
        let removable = self
            .players
            .get(id)
            .is_some_and(|player| player.rank() != Rank::Owner);
        removable && self.players.remove(id).is_some()
    }

    /// Change the rank of a known player, returning the previous rank
    pub fn set_rank(&mut self, id: &PlayerId, rank: Rank) -> Option<Rank> {
        let player = self.players.get_mut(id)?;
        let previous = player.rank();
        player.set_rank(rank);
        Some(previous)
    }

    /// The player holding `OWNER`, if the colony has one yet
    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        self.players
            .values()
            .find(|player| player.rank() == Rank::Owner)
            .map(Player::id)
    }

    /// Snapshot of the players holding `rank`
    #[must_use]
    pub fn players_by_rank(&self, rank: Rank) -> Vec<Player> {
        self.players_by_ranks(&[rank])
    }

    /// Snapshot of the players holding any of `ranks`
    #[must_use]
    pub fn players_by_ranks(&self, ranks: &[Rank]) -> Vec<Player> {
        self.players
            .values()
            .filter(|player| ranks.contains(&player.rank()))
            .cloned()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl FromIterator<Player> for PlayerRegistry {
    /// Later entries with a repeated id replace earlier ones
    fn from_iter<I: IntoIterator<Item = Player>>(iter: I) -> Self {
        let mut registry = Self::new();
        for player in iter {
            registry.upsert(player);
        }
        registry
    }
}
