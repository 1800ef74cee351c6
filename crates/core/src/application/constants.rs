// Resolution constants (No magic values)

/// Maximum chain of `@key` indirections followed from an input expression.
/// Anything deeper is treated as a cycle and dropped.
pub const DEFAULT_MAX_INDIRECTION_DEPTH: usize = 10;

/// Upper bound on work items processed by one resolution
pub const DEFAULT_MAX_RESOLUTION_STEPS: usize = 1_000_000;

/// Separator used when rendering expression lists for operators
pub const DISPLAY_SEPARATOR: &str = ", ";
