//! Persisted form of a colony's permissions
//!
//! Ranks and actions are stored as name tokens. Parsing checks every token
//! before anything is applied, so a record from a newer or older build is
//! rejected as a whole instead of being half-loaded.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{Action, ActionFlags, PlayerId, Rank};
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionsRecord {
    /// Every registered player with their rank
    #[serde(default)]
    pub owners: Vec<PlayerRecord>,
    #[serde(default)]
    pub permissions: Vec<RankPermissionsRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: String,
    pub rank: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankPermissionsRecord {
    pub rank: String,
    /// Names of the actions granted to `rank`
    #[serde(default)]
    pub flags: Vec<String>,
}

/// Record with every token resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedRecord {
    pub players: Vec<(PlayerId, Rank)>,
    pub permissions: Vec<(Rank, ActionFlags)>,
}

impl PermissionsRecord {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub(crate) fn parse(&self) -> Result<ParsedRecord> {
        let players = self
            .owners
            .iter()
            .map(|record| -> Result<(PlayerId, Rank)> {
                Ok((record.id.parse()?, record.rank.parse()?))
            })
            .collect::<Result<Vec<_>>>()?;

        let permissions = self
            .permissions
            .iter()
            .map(|record| -> Result<(Rank, ActionFlags)> {
                let rank = record.rank.parse::<Rank>()?;
                let flags = record
                    .flags
                    .iter()
                    .map(|token| token.parse::<Action>())
                    .collect::<Result<ActionFlags>>()?;
                Ok((rank, flags))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ParsedRecord {
            players,
            permissions,
        })
    }
}
