//! Permissions view payload
//!
//! Field order (big-endian, no padding):
//!
//! 1. viewer rank token
//! 2. player count, then per player: 16-byte id, display name, rank token
//! 3. permission entry count, then per entry: rank token, u32 flag set
//!
//! There are no field tags. Encoder and decoder must agree on this order.

mod replica;

pub use replica::PermissionsReplica;

use colony_core::models::{Player, Rank};
use colony_core::PermissionView;

use crate::codec::{EncodeError, ViewWriter, WireOrder};

/// Append the view of `state` as seen by a holder of `viewer_rank`
///
/// Players are written in id order so the same state always produces the
/// same bytes.
pub fn encode_permissions_view<V: PermissionView + ?Sized>(
    state: &V,
    viewer_rank: Rank,
    writer: &mut ViewWriter,
) -> Result<(), EncodeError> {
    writer.write_string::<WireOrder>("viewer rank", viewer_rank.as_str())?;

    let mut players: Vec<&Player> = state.players().iter().collect();
    players.sort_by_key(|player| player.id().0);
    writer.write_len::<WireOrder>("player count", players.len())?;
    for player in players {
        writer.write_bytes(player.id().as_bytes());
        writer.write_string::<WireOrder>("player name", player.name())?;
        writer.write_string::<WireOrder>("player rank", player.rank().as_str())?;
    }

    writer.write_len::<WireOrder>("permission count", Rank::COUNT)?;
    for (rank, flags) in state.permissions().iter() {
        writer.write_string::<WireOrder>("permission rank", rank.as_str())?;
        writer.write_u32::<WireOrder>(flags.bits());
    }

    Ok(())
}
