//! Action catalog and the flag set stored per rank
//!
//! Bit positions are persisted and sent to remote views. Never renumber them.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::Error;

/// Privileged operation gated by the permission matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Open and use protected structures (huts)
    AccessProtectedStructure,
    /// Colony guards attack holders of this rank
    AllowGuardAggression,
    PlaceStructure,
    BreakStructure,
    Promote,
    Demote,
    SendMessages,
    EditPermissions,
}

impl Action {
    /// Every action, in bit order
    pub const ALL: [Self; 8] = [
        Self::AccessProtectedStructure,
        Self::AllowGuardAggression,
        Self::PlaceStructure,
        Self::BreakStructure,
        Self::Promote,
        Self::Demote,
        Self::SendMessages,
        Self::EditPermissions,
    ];

    /// Bit index in `[0, 8)`
    #[must_use]
    pub const fn bit(self) -> u32 {
        match self {
            Self::AccessProtectedStructure => 0,
            Self::AllowGuardAggression => 1,
            Self::PlaceStructure => 2,
            Self::BreakStructure => 3,
            Self::Promote => 4,
            Self::Demote => 5,
            Self::SendMessages => 6,
            Self::EditPermissions => 7,
        }
    }

    /// Single-bit mask, e.g. `SEND_MESSAGES` is `0100_0000`
    #[must_use]
    pub const fn flag(self) -> u32 {
        1 << self.bit()
    }

    /// Persisted name token
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessProtectedStructure => "ACCESS_PROTECTED_STRUCTURE",
            Self::AllowGuardAggression => "ALLOW_GUARD_AGGRESSION",
            Self::PlaceStructure => "PLACE_STRUCTURE",
            Self::BreakStructure => "BREAK_STRUCTURE",
            Self::Promote => "PROMOTE",
            Self::Demote => "DEMOTE",
            Self::SendMessages => "SEND_MESSAGES",
            Self::EditPermissions => "EDIT_PERMISSIONS",
        }
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| Error::NotFound(format!("Unknown action: {s}")))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flag set of authorized actions for one rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionFlags(pub u32);

impl ActionFlags {
    pub const NONE: u32 = 0;

    /// Every bit the action catalog defines
    pub const ALL: u32 = 0xff;

    /// Owner: everything except guard aggression
    pub const DEFAULT_OWNER: u32 = Action::AccessProtectedStructure.flag()
        | Action::PlaceStructure.flag()
        | Action::BreakStructure.flag()
        | Action::Promote.flag()
        | Action::Demote.flag()
        | Action::SendMessages.flag()
        | Action::EditPermissions.flag();

    /// Officer: owner minus permission editing
    pub const DEFAULT_OFFICER: u32 = Self::DEFAULT_OWNER & !Action::EditPermissions.flag();

    pub const DEFAULT_FRIEND: u32 = Action::AccessProtectedStructure.flag();

    pub const DEFAULT_NEUTRAL: u32 = Self::NONE;

    pub const DEFAULT_HOSTILE: u32 = Action::AllowGuardAggression.flag();

    #[must_use]
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self(Self::NONE)
    }

    #[must_use]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn has(&self, action: Action) -> bool {
        (self.0 & action.flag()) != 0
    }

    pub const fn grant(&mut self, action: Action) {
        self.0 |= action.flag();
    }

    pub const fn revoke(&mut self, action: Action) {
        self.0 &= !action.flag();
    }

    pub const fn toggle(&mut self, action: Action) {
        self.0 ^= action.flag();
    }

    /// Bits set that no action in the catalog owns
    #[must_use]
    pub const fn unknown_bits(&self) -> u32 {
        self.0 & !Self::ALL
    }

    /// Actions whose bit is set, in bit order
    pub fn actions(&self) -> impl Iterator<Item = Action> {
        let flags = *self;
        Action::ALL.into_iter().filter(move |action| flags.has(*action))
    }
}

impl Default for ActionFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<Action> for ActionFlags {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut flags = Self::empty();
        for action in iter {
            flags.grant(action);
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_are_distinct_and_in_range() {
        let mut seen = 0u32;
        for action in Action::ALL {
            assert!(action.bit() < 8);
            assert_eq!(seen & action.flag(), 0, "duplicate bit for {action}");
            seen |= action.flag();
        }
        assert_eq!(seen, ActionFlags::ALL);
    }

    #[test]
    fn test_unknown_bits() {
        assert_eq!(ActionFlags(ActionFlags::ALL).unknown_bits(), 0);
        assert_eq!(ActionFlags(0x1_01).unknown_bits(), 0x1_00);
    }

    #[test]
    fn test_flag_layout() {
        assert_eq!(Action::AccessProtectedStructure.flag(), 0b0000_0001);
        assert_eq!(Action::SendMessages.flag(), 0b0100_0000);
        assert_eq!(Action::EditPermissions.flag(), 0b1000_0000);
    }

    #[test]
    fn test_action_tokens() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
        assert!("ACCESS_HUTS".parse::<Action>().unwrap_err().is_not_found());
    }

    #[test]
    fn test_flags_grant_revoke_toggle() {
        let mut flags = ActionFlags::empty();
        flags.grant(Action::Promote);
        assert!(flags.has(Action::Promote));
        assert!(!flags.has(Action::Demote));

        flags.toggle(Action::Demote);
        assert!(flags.has(Action::Demote));

        flags.revoke(Action::Promote);
        assert!(!flags.has(Action::Promote));
        assert!(flags.has(Action::Demote));
    }

    #[test]
    fn test_actions_listed_in_bit_order() {
        let flags: ActionFlags = [Action::SendMessages, Action::AccessProtectedStructure]
            .into_iter()
            .collect();
        let listed: Vec<_> = flags.actions().collect();
        assert_eq!(
            listed,
            vec![Action::AccessProtectedStructure, Action::SendMessages]
        );
    }

    #[test]
    fn test_default_officer_lacks_edit() {
        let officer = ActionFlags(ActionFlags::DEFAULT_OFFICER);
        assert!(!officer.has(Action::EditPermissions));
        assert!(officer.has(Action::SendMessages));
        assert!(!officer.has(Action::AllowGuardAggression));
    }
}
