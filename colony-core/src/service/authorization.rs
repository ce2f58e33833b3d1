//! Authorization service
//!
//! Authoritative permission state of one colony: the player registry, the
//! permission matrix and the dirty flag read by the persistence scheduler.
//! Every successful mutation marks the service dirty; queries never do.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    models::{Action, PermissionMatrix, Player, PlayerId, Rank, RankTransitions},
    persistence::{PermissionsRecord, PlayerRecord, RankPermissionsRecord},
    service::{
        access::PermissionView,
        identity::{Identity, IdentityProvider},
        registry::PlayerRegistry,
    },
    Error, Result,
};

pub struct AuthorizationService {
    players: PlayerRegistry,
    permissions: PermissionMatrix,
    transitions: RankTransitions,
    identity: Arc<dyn IdentityProvider>,
    dirty: bool,
}

impl std::fmt::Debug for AuthorizationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationService")
            .field("players", &self.players.len())
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl AuthorizationService {
    /// Create a service with the default matrix and the standard rank ladder
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self::with_transitions(identity, &RankTransitions::STANDARD)
    }

    #[must_use]
    pub fn with_transitions(
        identity: Arc<dyn IdentityProvider>,
        transitions: &RankTransitions,
    ) -> Self {
        Self {
            players: PlayerRegistry::new(),
            permissions: PermissionMatrix::seeded(),
            transitions: *transitions,
            identity,
            dirty: false,
        }
    }

    /// Rebuild a service from a persisted record
    pub fn from_record(
        identity: Arc<dyn IdentityProvider>,
        record: &PermissionsRecord,
    ) -> Result<Self> {
        let mut service = Self::new(identity);
        service.load(record)?;
        Ok(service)
    }

    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by the persistence collaborator after a successful save
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[must_use]
    pub const fn promotion_rank(&self, rank: Rank) -> Rank {
        self.transitions.promotion_rank(rank)
    }

    #[must_use]
    pub const fn demotion_rank(&self, rank: Rank) -> Rank {
        self.transitions.demotion_rank(rank)
    }

    /// Fail with `Error::Authorization` unless the rank of `id` grants `action`
    pub fn check_permission(&self, id: &PlayerId, action: Action) -> Result<()> {
        if !self.player_has_permission(id, action) {
            return Err(Error::Authorization(format!(
                "{} may not {action}",
                self.get_rank(id)
            )));
        }
        Ok(())
    }

    // ===== Permission matrix =====

    /// Grant `action` to `rank`. Returns false if it was already granted.
    pub fn set_permission(&mut self, rank: Rank, action: Action) -> bool {
        let changed = self.permissions.set_permission(rank, action);
        if changed {
            self.mark_dirty();
            debug!(rank = %rank, action = %action, "Permission granted");
        }
        changed
    }

    /// Revoke `action` from `rank`. Returns false if it was not granted.
    pub fn remove_permission(&mut self, rank: Rank, action: Action) -> bool {
        let changed = self.permissions.remove_permission(rank, action);
        if changed {
            self.mark_dirty();
            debug!(rank = %rank, action = %action, "Permission revoked");
        }
        changed
    }

    /// Flip `action` for `rank`; always a change. Returns the new state.
    pub fn toggle_permission(&mut self, rank: Rank, action: Action) -> bool {
        let granted = self.permissions.toggle_permission(rank, action);
        self.mark_dirty();
        debug!(rank = %rank, action = %action, granted, "Permission toggled");
        granted
    }

    // ===== Players =====

    /// Add a player by display name
    ///
    /// Declines when the name cannot be resolved or the player is already
    /// registered; an existing rank is never overwritten.
    pub fn add_player_by_name(&mut self, name: &str, rank: Rank) -> bool {
        let Some(identity) = self.identity.resolve_by_name(name) else {
            debug!(name = %name, "Add player declined: unknown name");
            return false;
        };
        self.add_identity(identity, rank)
    }

    /// Add a player by id; same rules as [`Self::add_player_by_name`]
    pub fn add_player_by_id(&mut self, id: &PlayerId, rank: Rank) -> bool {
        let Some(name) = self.identity.resolve_by_id(id) else {
            debug!(player_id = %id, "Add player declined: unknown id");
            return false;
        };
        self.add_identity(Identity::new(*id, name), rank)
    }

    fn add_identity(&mut self, identity: Identity, rank: Rank) -> bool {
        if self.owner_taken_by_other(&identity.id, rank) {
            debug!(player_id = %identity.id, "Add player declined: colony already has an owner");
            return false;
        }

        let id = identity.id;
        if !self.players.insert(Player::new(id, identity.name, rank)) {
            debug!(player_id = %id, "Add player declined: already registered");
            return false;
        }

        self.mark_dirty();
        info!(player_id = %id, rank = %rank, "Player added to colony");
        true
    }

    /// Remove a player. Owners and unknown ids are never removed.
    pub fn remove_player(&mut self, id: &PlayerId) -> bool {
        if !self.players.remove(id) {
            debug!(player_id = %id, "Remove player declined");
            return false;
        }
        self.mark_dirty();
        info!(player_id = %id, "Player removed from colony");
        true
    }

    /// Assign `rank` to `id`, registering the player first if needed
    ///
    /// This is the administrative override: any rank can be assigned, except
    /// that a second `OWNER` is refused. Assigning the current rank succeeds
    /// without marking the service dirty.
    pub fn set_player_rank(&mut self, id: &PlayerId, rank: Rank) -> bool {
        let Some(current) = self.players.rank_of(id) else {
            return self.add_player_by_id(id, rank);
        };

        if current == rank {
            return true;
        }
        if self.owner_taken_by_other(id, rank) {
            warn!(player_id = %id, "Rank change declined: colony already has an owner");
            return false;
        }

        self.players.set_rank(id, rank);
        self.mark_dirty();
        info!(player_id = %id, from = %current, to = %rank, "Player rank changed");
        true
    }

    /// Move a player one step up the rank ladder
    ///
    /// Returns the rank after promotion, or `None` for an unknown player.
    pub fn promote(&mut self, id: &PlayerId) -> Option<Rank> {
        let current = self.players.rank_of(id)?;
        let target = self.transitions.promotion_rank(current);
        Some(self.move_along_ladder(id, current, target))
    }

    /// Move a player one step down the rank ladder
    pub fn demote(&mut self, id: &PlayerId) -> Option<Rank> {
        let current = self.players.rank_of(id)?;
        let target = self.transitions.demotion_rank(current);
        Some(self.move_along_ladder(id, current, target))
    }

    fn move_along_ladder(&mut self, id: &PlayerId, current: Rank, target: Rank) -> Rank {
        if target == current || self.owner_taken_by_other(id, target) {
            return current;
        }
        self.players.set_rank(id, target);
        self.mark_dirty();
        info!(player_id = %id, from = %current, to = %target, "Player moved along rank ladder");
        target
    }

    fn owner_taken_by_other(&self, id: &PlayerId, rank: Rank) -> bool {
        rank == Rank::Owner && self.players.owner().is_some_and(|owner| owner != *id)
    }

    // ===== Persistence =====

    /// Snapshot for the persistence collaborator
    ///
    /// Players are sorted by id so repeated saves of the same state match.
    #[must_use]
    pub fn save(&self) -> PermissionsRecord {
        let mut owners: Vec<PlayerRecord> = self
            .players
            .iter()
            .map(|player| PlayerRecord {
                id: player.id().to_string(),
                rank: player.rank().as_str().to_string(),
            })
            .collect();
        owners.sort_by(|a, b| a.id.cmp(&b.id));

        let permissions = self
            .permissions
            .iter()
            .map(|(rank, flags)| RankPermissionsRecord {
                rank: rank.as_str().to_string(),
                flags: flags
                    .actions()
                    .map(|action| action.as_str().to_string())
                    .collect(),
            })
            .collect();

        PermissionsRecord {
            owners,
            permissions,
        }
    }

    /// Merge a persisted record into this service
    ///
    /// Nothing is applied unless every token in the record is valid. Listed
    /// players replace registered players with the same id; listed ranks
    /// replace their matrix entry. A record that would leave the colony with
    /// more than one `OWNER` is rejected. Loading does not mark the service
    /// dirty.
    pub fn load(&mut self, record: &PermissionsRecord) -> Result<()> {
        let parsed = record.parse()?;

        // last entry per id wins, same as the upserts below
        let incoming: HashMap<PlayerId, Rank> = parsed.players.iter().copied().collect();
        let kept_owner = self.players.owner().filter(|id| !incoming.contains_key(id));
        let owners = incoming.values().filter(|rank| **rank == Rank::Owner).count()
            + usize::from(kept_owner.is_some());
        if owners > 1 {
            warn!(owners, "Rejected permissions record with several owners");
            return Err(Error::InvalidInput(format!(
                "Permissions record would leave {owners} owners"
            )));
        }

        for (id, rank) in parsed.players {
            let name = self.identity.resolve_by_id(&id).unwrap_or_else(|| {
                warn!(player_id = %id, "No profile for persisted player, using id as name");
                id.to_string()
            });
            self.players.upsert(Player::new(id, name, rank));
        }
        for (rank, flags) in parsed.permissions {
            self.permissions.set_flags(rank, flags);
        }

        info!(players = self.players.len(), "Colony permissions loaded");
        Ok(())
    }
}

impl PermissionView for AuthorizationService {
    fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    fn permissions(&self) -> &PermissionMatrix {
        &self.permissions
    }
}
