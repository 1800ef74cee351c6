//! JSON-RPC API Layer
//!
//! Management entrypoints for Dynaq: list and edit assignments, preview
//! expansions, resolve queue expressions and register known queues.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use server::RpcServer;
