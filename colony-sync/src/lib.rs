//! Remote colony permission views
//!
//! The authoritative side encodes a [`ColonyViewMessage`] per viewer. The
//! remote side decodes it into a [`PermissionsReplica`] kept by a
//! [`ColonyViewCache`].

pub mod codec;
pub mod error;
pub mod message;
pub mod view;
pub mod view_cache;

pub use error::{Error, Result};
pub use message::ColonyViewMessage;
pub use view::{encode_permissions_view, PermissionsReplica};
pub use view_cache::ColonyViewCache;
