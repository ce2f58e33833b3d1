pub mod models;
pub mod service;
pub mod persistence;
pub mod config;
pub mod error;
pub mod logging;

#[cfg(test)]
pub mod test_helpers;

pub use config::Config;
pub use error::{Error, Result};
pub use persistence::PermissionsRecord;
pub use service::{AuthorizationService, PermissionView};
