//! Permission matrix
//!
//! One flag set per rank. The matrix is a fixed array indexed by rank, so a
//! rank can never be missing from it.

use super::action::{Action, ActionFlags};
use super::rank::Rank;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionMatrix {
    flags: [ActionFlags; Rank::COUNT],
}

impl PermissionMatrix {
    /// Matrix seeded with the colony defaults
    #[must_use]
    pub const fn seeded() -> Self {
        let mut flags = [ActionFlags::empty(); Rank::COUNT];
        flags[Rank::Owner.index()] = ActionFlags(ActionFlags::DEFAULT_OWNER);
        flags[Rank::Officer.index()] = ActionFlags(ActionFlags::DEFAULT_OFFICER);
        flags[Rank::Friend.index()] = ActionFlags(ActionFlags::DEFAULT_FRIEND);
        flags[Rank::Neutral.index()] = ActionFlags(ActionFlags::DEFAULT_NEUTRAL);
        flags[Rank::Hostile.index()] = ActionFlags(ActionFlags::DEFAULT_HOSTILE);
        Self { flags }
    }

    /// Matrix where no rank may do anything
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            flags: [ActionFlags::empty(); Rank::COUNT],
        }
    }

    #[must_use]
    pub const fn flags(&self, rank: Rank) -> ActionFlags {
        self.flags[rank.index()]
    }

    pub fn set_flags(&mut self, rank: Rank, flags: ActionFlags) {
        self.flags[rank.index()] = flags;
    }

    #[must_use]
    pub const fn has_permission(&self, rank: Rank, action: Action) -> bool {
        self.flags[rank.index()].has(action)
    }

    /// Grant `action` to `rank`. Returns false when it was already granted.
    pub fn set_permission(&mut self, rank: Rank, action: Action) -> bool {
        let flags = &mut self.flags[rank.index()];
        if flags.has(action) {
            return false;
        }
        flags.grant(action);
        true
    }

    /// Revoke `action` from `rank`. Returns false when it was not granted.
    pub fn remove_permission(&mut self, rank: Rank, action: Action) -> bool {
        let flags = &mut self.flags[rank.index()];
        if !flags.has(action) {
            return false;
        }
        flags.revoke(action);
        true
    }

    /// Flip `action` for `rank` and return whether it is now granted
    pub fn toggle_permission(&mut self, rank: Rank, action: Action) -> bool {
        let flags = &mut self.flags[rank.index()];
        flags.toggle(action);
        flags.has(action)
    }

    /// Entries in rank declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Rank, ActionFlags)> + '_ {
        Rank::ALL
            .into_iter()
            .map(move |rank| (rank, self.flags[rank.index()]))
    }
}

impl Default for PermissionMatrix {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed() {
        let m = PermissionMatrix::seeded();
        assert!(m.has_permission(Rank::Hostile, Action::AllowGuardAggression));
        assert!(!m.has_permission(Rank::Hostile, Action::SendMessages));
        assert!(m.has_permission(Rank::Owner, Action::EditPermissions));
        assert!(!m.has_permission(Rank::Owner, Action::AllowGuardAggression));
        assert!(!m.has_permission(Rank::Officer, Action::EditPermissions));
        assert!(m.has_permission(Rank::Officer, Action::Promote));
        assert!(m.has_permission(Rank::Friend, Action::AccessProtectedStructure));
        assert!(!m.has_permission(Rank::Friend, Action::PlaceStructure));
        assert_eq!(m.flags(Rank::Neutral), ActionFlags::empty());
    }

    #[test]
    fn test_seed_owner_has_seven_actions() {
        let owner = PermissionMatrix::seeded().flags(Rank::Owner);
        assert_eq!(owner.actions().count(), 7);
    }

    #[test]
    fn test_set_and_remove_are_idempotent() {
        for rank in Rank::ALL {
            for action in Action::ALL {
                let mut m = PermissionMatrix::seeded();
                m.set_permission(rank, action);
                assert!(m.has_permission(rank, action));
                assert!(!m.set_permission(rank, action));
                assert!(m.has_permission(rank, action));

                m.remove_permission(rank, action);
                assert!(!m.has_permission(rank, action));
                assert!(!m.remove_permission(rank, action));
                assert!(!m.has_permission(rank, action));
            }
        }
    }

    #[test]
    fn test_toggle_is_an_involution() {
        for rank in Rank::ALL {
            for action in Action::ALL {
                let mut m = PermissionMatrix::seeded();
                let before = m.has_permission(rank, action);
                assert_eq!(m.toggle_permission(rank, action), !before);
                assert_eq!(m.toggle_permission(rank, action), before);
                assert_eq!(m, PermissionMatrix::seeded());
            }
        }
    }

    #[test]
    fn test_changes_touch_only_one_rank() {
        let mut m = PermissionMatrix::seeded();
        assert!(m.set_permission(Rank::Neutral, Action::SendMessages));
        for rank in Rank::ALL {
            if rank != Rank::Neutral {
                assert_eq!(m.flags(rank), PermissionMatrix::seeded().flags(rank));
            }
        }
    }

    #[test]
    fn test_iter_in_declaration_order() {
        let ranks: Vec<_> = PermissionMatrix::seeded().iter().map(|(r, _)| r).collect();
        assert_eq!(ranks, Rank::ALL.to_vec());
    }
}
