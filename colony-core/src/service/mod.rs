pub mod access;
pub mod authorization;
pub mod identity;
pub mod registry;

pub use access::PermissionView;
pub use authorization::AuthorizationService;
pub use identity::{Identity, IdentityProvider, ProfileCache};
pub use registry::PlayerRegistry;
