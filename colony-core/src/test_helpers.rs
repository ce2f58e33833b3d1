//! Test helpers and fixtures for colony-core tests

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::PlayerId;
use crate::service::{AuthorizationService, Identity, IdentityProvider, ProfileCache};

/// Players known to a test profile cache, looked up by name
pub struct NamedPlayers {
    ids: HashMap<String, PlayerId>,
    cache: Arc<ProfileCache>,
}

impl NamedPlayers {
    pub fn id(&self, name: &str) -> PlayerId {
        self.ids[name]
    }

    pub fn provider(&self) -> Arc<dyn IdentityProvider> {
        self.cache.clone()
    }
}

/// Fresh service whose identity provider knows `names`; no player is registered yet
pub fn service_with_profiles(names: &[&str]) -> (AuthorizationService, NamedPlayers) {
    let ids: HashMap<String, PlayerId> = names
        .iter()
        .map(|name| ((*name).to_string(), PlayerId::new()))
        .collect();
    let cache: Arc<ProfileCache> = Arc::new(
        ids.iter()
            .map(|(name, id)| Identity::new(*id, name.clone()))
            .collect(),
    );
    let players = NamedPlayers { ids, cache };
    (AuthorizationService::new(players.provider()), players)
}
