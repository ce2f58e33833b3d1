use colony_core::config::SyncConfig;
use colony_core::models::{Action, ActionFlags, PermissionMatrix, Player, PlayerId, Rank};
use colony_core::service::PlayerRegistry;
use colony_core::PermissionView;

use crate::codec::{DecodeError, DecodeErrorValue, ViewReader, WireOrder};

/// Read-only copy of a colony's permissions held by a remote observer
///
/// The only way to change a replica is to decode a new view into it. It has
/// no dirty flag and none of the authoritative mutation methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionsReplica {
    user_rank: Rank,
    players: PlayerRegistry,
    permissions: PermissionMatrix,
}

impl Default for PermissionsReplica {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionsReplica {
    /// Replica before any view arrived: observer is `NEUTRAL`, nobody may do anything
    #[must_use]
    pub fn new() -> Self {
        Self {
            user_rank: Rank::Neutral,
            players: PlayerRegistry::new(),
            permissions: PermissionMatrix::empty(),
        }
    }

    /// Decode a complete view into a fresh replica
    pub fn decode(reader: &mut ViewReader, limits: &SyncConfig) -> Result<Self, DecodeError> {
        let user_rank = read_rank(reader, "viewer rank", limits)?;

        let player_count = reader.read_len::<WireOrder>("player count", limits.max_players)?;
        // each record needs at least its id, so the payload bounds the allocation
        let mut players = Vec::with_capacity(player_count.min(reader.remaining() / PlayerId::WIRE_LEN));
        for _ in 0..player_count {
            let id = PlayerId::from_bytes(reader.read_array::<{ PlayerId::WIRE_LEN }>("player id")?);
            let name = reader.read_string::<WireOrder>("player name", limits.max_string_len)?;
            let rank = read_rank(reader, "player rank", limits)?;
            players.push(Player::new(id, name, rank));
        }

        let entry_count = reader.read_len::<WireOrder>("permission count", limits.max_players)?;
        let mut permissions = PermissionMatrix::empty();
        for _ in 0..entry_count {
            let rank = read_rank(reader, "permission rank", limits)?;
            let flags = ActionFlags::new(reader.read_u32::<WireOrder>("permission flags")?);
            let unknown = flags.unknown_bits();
            if unknown != 0 {
                return Err(DecodeErrorValue::UnknownActionBits { rank, bits: unknown }.into());
            }
            permissions.set_flags(rank, flags);
        }

        Ok(Self {
            user_rank,
            players: players.into_iter().collect(),
            permissions,
        })
    }

    /// Replace this replica with the decoded view
    ///
    /// On error the replica keeps its previous contents.
    pub fn apply(&mut self, reader: &mut ViewReader, limits: &SyncConfig) -> Result<(), DecodeError> {
        *self = Self::decode(reader, limits)?;
        Ok(())
    }

    /// Rank the server reported for the observing player
    #[must_use]
    pub const fn user_rank(&self) -> Rank {
        self.user_rank
    }

    #[must_use]
    pub fn user_has_permission(&self, action: Action) -> bool {
        self.has_permission(self.user_rank, action)
    }
}

impl PermissionView for PermissionsReplica {
    fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    fn permissions(&self) -> &PermissionMatrix {
        &self.permissions
    }
}

fn read_rank(
    reader: &mut ViewReader,
    field: &'static str,
    limits: &SyncConfig,
) -> Result<Rank, DecodeError> {
    let token = reader.read_string::<WireOrder>(field, limits.max_string_len)?;
    token
        .parse::<Rank>()
        .map_err(|_| DecodeErrorValue::UnknownToken { field, token }.into())
}
