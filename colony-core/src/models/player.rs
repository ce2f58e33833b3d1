use serde::{Deserialize, Serialize};

use super::id::PlayerId;
use super::rank::Rank;

/// Player known to a colony
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    /// Display name cached when the player was registered
    name: String,
    rank: Rank,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, rank: Rank) -> Self {
        Self {
            id,
            name: name.into(),
            rank,
        }
    }

    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn rank(&self) -> Rank {
        self.rank
    }

    pub(crate) fn set_rank(&mut self, rank: Rank) {
        self.rank = rank;
    }
}
