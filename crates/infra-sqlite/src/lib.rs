// Dynaq Infrastructure - SQLite Adapter
// Implements: AssignmentStore, QueueRegistry

mod assignment_store;
mod connection;
mod error;
mod migration;
mod queue_registry;

pub use assignment_store::SqliteAssignmentStore;
pub use connection::create_pool;
pub use migration::run_migrations;
pub use queue_registry::SqliteQueueRegistry;

// Note: sqlx::Error conversion is handled by a helper function (error.rs)
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
