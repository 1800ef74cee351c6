// Domain Layer - Pure expression language and assignment model

pub mod assignment;
pub mod expression;
pub mod pattern;

// Re-exports
pub use assignment::{
    default_assignment, AssignmentKey, AssignmentMap, AssignmentView, DEFAULT_ASSIGNMENT_KEY,
};
pub use expression::{toggle_negation, QueueExpression, QueueName};
pub use pattern::QueuePattern;
