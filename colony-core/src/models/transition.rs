//! Promotion and demotion table
//!
//! Ranks without an entry map to themselves in both directions, which is how
//! `OWNER` stays out of reach of promote/demote.

use super::rank::Rank;

/// Where a rank moves on promotion and on demotion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankPair {
    pub promote: Rank,
    pub demote: Rank,
}

/// Static promotion/demotion adjacency table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankTransitions {
    entries: [Option<RankPair>; Rank::COUNT],
}

impl RankTransitions {
    /// The colony's standard ladder
    pub const STANDARD: Self = Self::empty()
        .with(Rank::Officer, Rank::Officer, Rank::Friend)
        .with(Rank::Friend, Rank::Officer, Rank::Neutral)
        .with(Rank::Neutral, Rank::Friend, Rank::Hostile)
        .with(Rank::Hostile, Rank::Neutral, Rank::Hostile);

    /// Table where every rank maps to itself
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: [None; Rank::COUNT],
        }
    }

    /// Add or replace the entry for `rank`
    #[must_use]
    pub const fn with(mut self, rank: Rank, promote: Rank, demote: Rank) -> Self {
        self.entries[rank.index()] = Some(RankPair { promote, demote });
        self
    }

    #[must_use]
    pub const fn entry(&self, rank: Rank) -> Option<RankPair> {
        self.entries[rank.index()]
    }

    /// Rank after promotion, e.g. `NEUTRAL` becomes `FRIEND`
    #[must_use]
    pub const fn promotion_rank(&self, rank: Rank) -> Rank {
        match self.entries[rank.index()] {
            Some(pair) => pair.promote,
            None => rank,
        }
    }

    /// Rank after demotion, e.g. `NEUTRAL` becomes `HOSTILE`
    #[must_use]
    pub const fn demotion_rank(&self, rank: Rank) -> Rank {
        match self.entries[rank.index()] {
            Some(pair) => pair.demote,
            None => rank,
        }
    }
}

impl Default for RankTransitions {
    fn default() -> Self {
        Self::STANDARD
    }
}
