//! Remote-side store of colony views
//!
//! One replica per colony id, fed by [`ColonyViewMessage`]s.

use std::collections::hash_map::{Entry, HashMap};

use colony_core::config::SyncConfig;
use colony_core::PermissionView;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::message::ColonyViewMessage;
use crate::view::PermissionsReplica;

#[derive(Debug, Default)]
pub struct ColonyViewCache {
    views: HashMap<u32, PermissionsReplica>,
    limits: SyncConfig,
}

impl ColonyViewCache {
    #[must_use]
    pub fn new(limits: SyncConfig) -> Self {
        Self {
            views: HashMap::new(),
            limits,
        }
    }

    /// Apply a received message
    ///
    /// A new subscription decodes into a fresh replica that replaces any
    /// existing view of that colony. An update requires an existing view. If
    /// decoding fails the cache is left as it was.
    pub fn handle_message(&mut self, message: &ColonyViewMessage) -> Result<&PermissionsReplica> {
        let colony_id = message.colony_id;
        let mut reader = message.payload_reader();

        if message.is_new_subscription {
            let replica = PermissionsReplica::decode(&mut reader, &self.limits)
                .inspect_err(|e| warn!(colony_id, error = %e, "Rejected colony view"))?;
            info!(
                colony_id,
                players = replica.players().len(),
                "Subscribed to colony view"
            );
            let slot = match self.views.entry(colony_id) {
                Entry::Occupied(mut entry) => {
                    entry.insert(replica);
                    entry.into_mut()
                }
                Entry::Vacant(entry) => entry.insert(replica),
            };
            return Ok(&*slot);
        }

        let Some(replica) = self.views.get_mut(&colony_id) else {
            debug!(colony_id, "Update for a colony without a view");
            return Err(Error::NotFound(format!("No view for colony {colony_id}")));
        };
        replica
            .apply(&mut reader, &self.limits)
            .inspect_err(|e| warn!(colony_id, error = %e, "Rejected colony view update"))?;
        debug!(colony_id, "Colony view updated");
        Ok(&*replica)
    }

    #[must_use]
    pub fn get(&self, colony_id: u32) -> Option<&PermissionsReplica> {
        self.views.get(&colony_id)
    }

    /// Drop the view of a colony, e.g. on unsubscribe
    pub fn remove(&mut self, colony_id: u32) -> Option<PermissionsReplica> {
        let removed = self.views.remove(&colony_id);
        if removed.is_some() {
            debug!(colony_id, "Colony view removed");
        }
        removed
    }

    pub fn colony_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.views.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
