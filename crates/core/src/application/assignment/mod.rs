// Assignment Service - management use cases (list, edit, preview)

pub mod parse;


pub use parse::{parse_expression_list, validate_key, validate_queue_name};

use crate::application::constants::DISPLAY_SEPARATOR;
use crate::application::resolver::QueueResolver;
use crate::domain::{AssignmentMap, AssignmentView, QueueName, DEFAULT_ASSIGNMENT_KEY};
use crate::error::Result;
use crate::port::{AssignmentStore, QueueRegistry};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::info;

/// Operator-facing facade over the store, the queue registry and the resolver
pub struct AssignmentService {
    store: Arc<dyn AssignmentStore>,
    registry: Arc<dyn QueueRegistry>,
    resolver: Arc<QueueResolver>,
}

impl AssignmentService {
    pub fn new(
        store: Arc<dyn AssignmentStore>,
        registry: Arc<dyn QueueRegistry>,
        resolver: Arc<QueueResolver>,
    ) -> Self {
        Self {
            store,
            registry,
            resolver,
        }
    }

    /// All assignments, `default` included
    pub async fn list(&self) -> Result<AssignmentMap> {
        self.store.list_all().await
    }

    /// Set one assignment (empty `values` deletes it)
    pub async fn set(&self, key: &str, values: Vec<String>) -> Result<()> {
        validate_key(key)?;
        self.store.set(key, &values).await?;
        info!(key = %key, expressions = values.len(), "Assignment updated");
        Ok(())
    }

    /// Replace the whole assignment table in one transaction
    pub async fn set_all(&self, assignments: AssignmentMap) -> Result<()> {
        for key in assignments.keys() {
            validate_key(key)?;
        }
        self.store.replace_all(&assignments).await?;
        info!(keys = assignments.len(), "Assignment table replaced");
        Ok(())
    }

    /// One row per assignment, sorted by name with `default` last.
    ///
    /// `expanded` previews the stored expressions against the current known
    /// queues, so a synthesized `default` shows what `*` covers.
    pub async fn overview(&self) -> Result<Vec<AssignmentView>> {
        let known = self.registry.known_queues().await?;
        let mut rows = Vec::new();

        for (name, values) in self.store.list_all().await? {
            let expanded = self.resolver.expand_for_display(&values, &known).await?;
            rows.push(AssignmentView {
                name,
                value: values.join(DISPLAY_SEPARATOR),
                expanded: expanded.join(DISPLAY_SEPARATOR),
            });
        }

        rows.sort_by(|a, b| default_last(&a.name, &b.name));
        Ok(rows)
    }

    /// Resolve against the registry's current queues
    pub async fn resolve(&self, expressions: &[String]) -> Result<Vec<QueueName>> {
        let known = self.registry.known_queues().await?;
        self.resolver.resolve(expressions, &known).await
    }

    /// Display expansion against the registry's current queues
    pub async fn expand(&self, expressions: &[String]) -> Result<Vec<String>> {
        let known = self.registry.known_queues().await?;
        self.resolver.expand_for_display(expressions, &known).await
    }

    pub async fn register_queue(&self, name: &str) -> Result<()> {
        validate_queue_name(name)?;
        self.registry.register(name).await
    }

    pub async fn known_queues(&self) -> Result<Vec<QueueName>> {
        self.registry.known_queues().await
    }
}

fn default_last(a: &str, b: &str) -> Ordering {
    match (a == DEFAULT_ASSIGNMENT_KEY, b == DEFAULT_ASSIGNMENT_KEY) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}
