use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::Error;

/// Rank of a player within a colony
///
/// Ranks are ordered by declaration only. What a rank may do is decided by the
/// permission matrix, never by its position in this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rank {
    /// Colony founder; cannot be removed, promoted or demoted
    Owner,
    Officer,
    Friend,
    /// Default rank for anyone the colony does not know
    Neutral,
    Hostile,
}

impl Rank {
    /// Every rank, in declaration order
    pub const ALL: [Self; 5] = [
        Self::Owner,
        Self::Officer,
        Self::Friend,
        Self::Neutral,
        Self::Hostile,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position in declaration order
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether holders are automatically subscribed to colony broadcasts
    #[must_use]
    pub const fn is_subscriber(self) -> bool {
        matches!(self, Self::Owner | Self::Officer | Self::Friend)
    }

    /// Persisted and transmitted name token
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Officer => "OFFICER",
            Self::Friend => "FRIEND",
            Self::Neutral => "NEUTRAL",
            Self::Hostile => "HOSTILE",
        }
    }
}

impl FromStr for Rank {
    type Err = Error;

    /// Tokens must match exactly; anything else is a version mismatch between peers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rank| rank.as_str() == s)
            .ok_or_else(|| Error::NotFound(format!("Unknown rank: {s}")))
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
