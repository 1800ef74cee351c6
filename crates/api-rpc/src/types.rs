//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results.

use dynaq_core::domain::{AssignmentMap, AssignmentView};
use serde::{Deserialize, Serialize};

/// assignments.list.v1 - Raw assignment table (`default` always present)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAssignmentsResponse {
    pub assignments: AssignmentMap,
}

/// assignments.overview.v1 - Operator view with display expansion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub rows: Vec<AssignmentView>,
}

/// assignments.set.v1 - Set one assignment (empty list deletes)
#[derive(Debug, Deserialize)]
pub struct SetAssignmentRequest {
    pub key: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAssignmentResponse {
    pub key: String,
    pub deleted: bool,
}

/// One edited row as submitted by a form: `value` is comma-separated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentInput {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// assignments.set_all.v1 - Replace the whole table atomically
#[derive(Debug, Deserialize)]
pub struct SetAllAssignmentsRequest {
    pub assignments: Vec<AssignmentInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAllAssignmentsResponse {
    pub keys: usize,
}

/// queues.resolve.v1 / queues.expand.v1 (queues.list.v1 shares the response)
#[derive(Debug, Deserialize)]
pub struct ExpressionsRequest {
    pub expressions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuesResponse {
    pub queues: Vec<String>,
}

/// queues.register.v1
#[derive(Debug, Deserialize)]
pub struct RegisterQueueRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterQueueResponse {
    pub name: String,
    pub registered: bool,
}
