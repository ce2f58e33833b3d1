//! Read-only permission queries
//!
//! Shared by the authoritative service and by remote replicas. Only the
//! service adds mutation on top of this.

use std::collections::HashSet;

use crate::models::{Action, PermissionMatrix, Player, PlayerId, Rank};
use crate::service::registry::PlayerRegistry;

pub trait PermissionView {
    fn players(&self) -> &PlayerRegistry;

    fn permissions(&self) -> &PermissionMatrix;

    /// Rank of `id`; unknown identities count as `NEUTRAL`
    fn get_rank(&self, id: &PlayerId) -> Rank {
        self.players().rank_of(id).unwrap_or(Rank::Neutral)
    }

    fn has_permission(&self, rank: Rank, action: Action) -> bool {
        self.permissions().has_permission(rank, action)
    }

    /// Whether the rank of `id` grants `action`
    fn player_has_permission(&self, id: &PlayerId, action: Action) -> bool {
        self.has_permission(self.get_rank(id), action)
    }

    fn is_colony_member(&self, id: &PlayerId) -> bool {
        self.players().contains(id)
    }

    /// Whether `id` automatically receives colony broadcasts
    fn is_subscriber(&self, id: &PlayerId) -> bool {
        self.get_rank(id).is_subscriber()
    }

    fn get_owner(&self) -> Option<PlayerId> {
        self.players().owner()
    }

    fn players_by_rank(&self, rank: Rank) -> Vec<Player> {
        self.players().players_by_rank(rank)
    }

    fn players_by_ranks(&self, ranks: &[Rank]) -> Vec<Player> {
        self.players().players_by_ranks(ranks)
    }

    /// Members allowed to send (and receive) colony messages
    fn message_players(&self) -> HashSet<PlayerId> {
        self.players()
            .iter()
            .filter(|player| self.has_permission(player.rank(), Action::SendMessages))
            .map(Player::id)
            .collect()
    }

    /// Members whose rank subscribes them to colony broadcasts
    fn subscribers(&self) -> HashSet<PlayerId> {
        self.players()
            .iter()
            .filter(|player| player.rank().is_subscriber())
            .map(Player::id)
            .collect()
    }
}
