//! Identity resolution
//!
//! Identities come from an external provider and are trusted as-is. A failed
//! lookup is never an error here; callers treat it as "operation declined".

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::PlayerId;

/// Resolved identity: stable id plus current display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: PlayerId,
    pub name: String,
}

impl Identity {
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// External identity provider
#[cfg_attr(test, mockall::automock)]
pub trait IdentityProvider: Send + Sync {
    /// Look up an identity by display name
    fn resolve_by_name(&self, name: &str) -> Option<Identity>;

    /// Look up the current display name of an id
    fn resolve_by_id(&self, id: &PlayerId) -> Option<String>;
}

/// In-memory profile cache usable as an identity provider
///
/// Name lookups are case-insensitive; the stored display name keeps its case.
#[derive(Debug, Default)]
pub struct ProfileCache {
    by_id: DashMap<PlayerId, String>,
    by_name: DashMap<String, PlayerId>,
}

impl ProfileCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a profile, replacing any previous name for the same id
    pub fn insert(&self, identity: Identity) {
        if let Some(old) = self.by_id.insert(identity.id, identity.name.clone()) {
            self.by_name.remove(&old.to_lowercase());
        }
        self.by_name.insert(identity.name.to_lowercase(), identity.id);
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// All cached identities, in no particular order
    pub fn identities(&self) -> Vec<Identity> {
        self.by_id
            .iter()
            .map(|entry| Identity::new(*entry.key(), entry.value().clone()))
            .collect()
    }
}

impl FromIterator<Identity> for ProfileCache {
    fn from_iter<I: IntoIterator<Item = Identity>>(iter: I) -> Self {
        let cache = Self::new();
        for identity in iter {
            cache.insert(identity);
        }
        cache
    }
}

impl IdentityProvider for ProfileCache {
    fn resolve_by_name(&self, name: &str) -> Option<Identity> {
        let id = self.by_name.get(&name.to_lowercase()).map(|entry| *entry.value());
        let resolved = id.and_then(|id| {
            self.by_id
                .get(&id)
                .map(|entry| Identity::new(id, entry.value().clone()))
        });
        if resolved.is_none() {
            debug!(name = %name, "Profile not found by name");
        }
        resolved
    }

    fn resolve_by_id(&self, id: &PlayerId) -> Option<String> {
        let resolved = self.by_id.get(id).map(|entry| entry.value().clone());
        if resolved.is_none() {
            debug!(player_id = %id, "Profile not found by id");
        }
        resolved
    }
}
