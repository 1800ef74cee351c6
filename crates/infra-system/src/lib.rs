// Dynaq Infrastructure - System Adapters
// Implements: IdentityProvider

pub mod host_identity;

pub use host_identity::HostIdentityProvider;
