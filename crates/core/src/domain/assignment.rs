// Assignment Domain Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Worker group identifier
pub type AssignmentKey = String;

/// Snapshot of the assignment table (key -> ordered expressions)
pub type AssignmentMap = BTreeMap<AssignmentKey, Vec<String>>;

/// Reserved key consulted when a requested key has no assignment
pub const DEFAULT_ASSIGNMENT_KEY: &str = "default";

/// What `default` means when nothing is stored under it
pub fn default_assignment() -> Vec<String> {
    vec!["*".to_string()]
}

/// One row of the assignment overview shown to operators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentView {
    pub name: AssignmentKey,
    /// Stored expressions joined with ", "
    pub value: String,
    /// Display expansion of the listed expressions joined with ", "
    pub expanded: String,
}
