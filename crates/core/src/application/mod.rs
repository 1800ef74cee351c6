// Application Layer - Use Cases

pub mod assignment;
pub mod constants;
pub mod display;
pub mod resolver;

// Re-exports
pub use assignment::AssignmentService;
pub use display::collapse_repeats;
pub use resolver::{QueueResolver, ResolverConfig};
