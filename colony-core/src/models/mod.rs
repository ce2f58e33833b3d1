pub mod action;
pub mod id;
pub mod permission;
pub mod player;
pub mod rank;
pub mod transition;

pub use action::{Action, ActionFlags};
pub use id::PlayerId;
pub use permission::PermissionMatrix;
pub use player::Player;
pub use rank::Rank;
pub use transition::{RankPair, RankTransitions};
