// Port Layer - Interfaces for external dependencies

pub mod assignment_store;
pub mod identity_provider;
pub mod queue_registry;
pub mod time_provider;

// Re-exports
pub use assignment_store::AssignmentStore;
pub use identity_provider::IdentityProvider;
pub use queue_registry::QueueRegistry;
pub use time_provider::TimeProvider;
