//! On-disk colony state for the admin tool

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use colony_core::{
    config::StorageConfig,
    models::PlayerId,
    service::{Identity, IdentityProvider, ProfileCache},
    AuthorizationService, PermissionsRecord,
};
use tracing::{debug, info};

/// Colony loaded from the permissions record plus the profile list used to
/// resolve names
pub struct ColonyStore {
    pub colony: AuthorizationService,
    pub profiles: Arc<ProfileCache>,
    permissions_path: PathBuf,
}

impl ColonyStore {
    /// Load both files; a missing file starts from an empty profile list or
    /// a default colony
    pub fn open(storage: &StorageConfig) -> Result<Self> {
        let profiles = Arc::new(load_profiles(Path::new(&storage.profiles_path))?);
        let permissions_path = PathBuf::from(&storage.permissions_path);

        let colony = if permissions_path.exists() {
            let record = PermissionsRecord::read_from(&permissions_path).with_context(|| {
                format!("failed to read {}", permissions_path.display())
            })?;
            AuthorizationService::from_record(profiles.clone(), &record)?
        } else {
            debug!(path = %permissions_path.display(), "No permissions file, using defaults");
            AuthorizationService::new(profiles.clone())
        };

        Ok(Self {
            colony,
            profiles,
            permissions_path,
        })
    }

    /// Player id from a UUID string or a known profile name
    pub fn resolve(&self, player: &str) -> Result<PlayerId> {
        if let Ok(id) = player.parse::<PlayerId>() {
            return Ok(id);
        }
        self.profiles
            .resolve_by_name(player)
            .map(|identity| identity.id)
            .ok_or_else(|| anyhow!("Unknown player: {player}"))
    }

    /// Write the record if anything changed since it was loaded
    ///
    /// Returns whether a write happened.
    pub fn save_if_dirty(&mut self) -> Result<bool> {
        if !self.colony.is_dirty() {
            return Ok(false);
        }
        if let Some(parent) = self.permissions_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.colony
            .save()
            .write_to(&self.permissions_path)
            .with_context(|| format!("failed to write {}", self.permissions_path.display()))?;
        self.colony.clear_dirty();
        info!(path = %self.permissions_path.display(), "Saved colony permissions");
        Ok(true)
    }
}

fn load_profiles(path: &Path) -> Result<ProfileCache> {
    if !path.exists() {
        debug!(path = %path.display(), "No profiles file, names will not resolve");
        return Ok(ProfileCache::new());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let identities: Vec<Identity> = serde_json::from_str(&json)
        .with_context(|| format!("invalid profiles file {}", path.display()))?;
    Ok(identities.into_iter().collect())
}
