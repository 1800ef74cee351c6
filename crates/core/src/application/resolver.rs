// Queue Resolver - expands queue expressions into concrete queue names
//
// Called once per poll cycle by every worker, so it never fails on bad input:
// malformed tokens degrade to literal names and unknown keys contribute nothing.
// Only store failures are returned as errors.

use crate::application::constants::{DEFAULT_MAX_INDIRECTION_DEPTH, DEFAULT_MAX_RESOLUTION_STEPS};
use crate::application::display::collapse_repeats;
use crate::domain::{toggle_negation, QueueExpression, QueueName, QueuePattern, DEFAULT_ASSIGNMENT_KEY};
use crate::error::Result;
use crate::port::AssignmentStore;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolver configuration (injected by the composition root)
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Key substituted for a bare `@`
    pub identity: String,
    pub max_indirection_depth: usize,
    pub max_steps: usize,
}

impl ResolverConfig {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            max_indirection_depth: DEFAULT_MAX_INDIRECTION_DEPTH,
            max_steps: DEFAULT_MAX_RESOLUTION_STEPS,
        }
    }

    pub fn with_max_indirection_depth(mut self, depth: usize) -> Self {
        self.max_indirection_depth = depth;
        self
    }

    pub fn with_max_steps(mut self, steps: usize) -> Self {
        self.max_steps = steps;
        self
    }
}

/// Pending expression plus the number of `@` hops that produced it
struct WorkItem {
    expr: String,
    depth: usize,
}

/// FIFO work list that charges every enqueued item against the step budget,
/// so its length never exceeds `budget`.
struct WorkList {
    items: VecDeque<WorkItem>,
    enqueued: usize,
    budget: usize,
    exhausted: bool,
}

impl WorkList {
    fn new(expressions: &[String], budget: usize) -> Self {
        let mut list = Self {
            items: VecDeque::with_capacity(expressions.len().min(budget)),
            enqueued: 0,
            budget,
            exhausted: false,
        };
        for expr in expressions {
            if !list.push(expr.clone(), 0) {
                break;
            }
        }
        list
    }

    /// Returns false once the budget is spent; the item is dropped.
    fn push(&mut self, expr: String, depth: usize) -> bool {
        if self.enqueued >= self.budget {
            if !self.exhausted {
                warn!(
                    max_steps = self.budget,
                    pending = self.items.len(),
                    "Resolution step budget exhausted, returning partial queue list"
                );
                self.exhausted = true;
            }
            return false;
        }
        self.enqueued += 1;
        self.items.push_back(WorkItem { expr, depth });
        true
    }

    fn pop(&mut self) -> Option<WorkItem> {
        self.items.pop_front()
    }
}

/// Compiled patterns reused across identical tokens within one resolution
fn compiled<'p>(cache: &'p mut HashMap<String, QueuePattern>, glob: &str) -> &'p QueuePattern {
    if !cache.contains_key(glob) {
        cache.insert(glob.to_string(), QueuePattern::compile(glob));
    }
    &cache[glob]
}

/// Expression resolver over a shared assignment store
pub struct QueueResolver {
    store: Arc<dyn AssignmentStore>,
    config: ResolverConfig,
}

impl QueueResolver {
    pub fn new(store: Arc<dyn AssignmentStore>, config: ResolverConfig) -> Self {
        Self { store, config }
    }

    pub fn identity(&self) -> &str {
        &self.config.identity
    }

    /// Resolve `expressions` against `known_queues`.
    ///
    /// Tokens are processed strictly in FIFO order from a single work list;
    /// repeat and indirection tokens append their expansion to the back.
    /// A negation removes only what was accumulated before it.
    ///
    /// Returns the accumulated names sorted ascending, duplicates kept
    /// (a queue listed N times is polled N times as often).
    ///
    /// # Example
    /// ```text
    /// resolve(["*", "!free_*"], ["paid_x", "free_y"]) == ["paid_x"]
    /// resolve(["!free_*", "*"], ["paid_x", "free_y"]) == ["free_y", "paid_x"]
    /// resolve(["a/3"], [])                            == ["a", "a", "a"]
    /// ```
    pub async fn resolve(
        &self,
        expressions: &[String],
        known_queues: &[QueueName],
    ) -> Result<Vec<QueueName>> {
        let mut work = WorkList::new(expressions, self.config.max_steps);
        let mut patterns: HashMap<String, QueuePattern> = HashMap::new();
        let mut matched: Vec<QueueName> = Vec::new();
        let mut steps = 0usize;

        while let Some(item) = work.pop() {
            steps += 1;

            match QueueExpression::parse(&item.expr) {
                QueueExpression::Repeat { inner, count } => {
                    for _ in 0..count {
                        if !work.push(inner.to_string(), item.depth) {
                            break;
                        }
                    }
                }
                QueueExpression::Reference { key, negated } => {
                    if item.depth >= self.config.max_indirection_depth {
                        warn!(
                            expr = %item.expr,
                            depth = item.depth,
                            "Indirection too deep (cyclic assignment?), skipping"
                        );
                        continue;
                    }
                    // Nothing more can be queued, skip the round trip
                    if work.exhausted {
                        continue;
                    }

                    let key = if key.is_empty() {
                        self.config.identity.as_str()
                    } else {
                        key
                    };

                    for expr in self.lookup(key).await? {
                        let expr = if negated { toggle_negation(&expr) } else { expr };
                        if !work.push(expr, item.depth + 1) {
                            break;
                        }
                    }
                }
                QueueExpression::Pattern {
                    glob,
                    negated: true,
                } => {
                    let pattern = compiled(&mut patterns, glob);
                    matched.retain(|queue| !pattern.is_match(queue));
                }
                QueueExpression::Pattern {
                    glob,
                    negated: false,
                } => {
                    let pattern = compiled(&mut patterns, glob);
                    let before = matched.len();
                    matched.extend(
                        known_queues
                            .iter()
                            .filter(|queue| pattern.is_match(queue))
                            .cloned(),
                    );

                    // Literal for a queue that does not exist yet
                    if matched.len() == before && !pattern.has_wildcard() {
                        matched.push(pattern.as_str().to_string());
                    }
                }
            }
        }

        matched.sort();

        debug!(
            expressions = ?expressions,
            resolved = matched.len(),
            steps = steps,
            "Resolved queue expressions"
        );

        Ok(matched)
    }

    /// Resolve, then collapse repeats into `name/count` for operators.
    /// Never use the result for polling.
    pub async fn expand_for_display(
        &self,
        expressions: &[String],
        known_queues: &[QueueName],
    ) -> Result<Vec<String>> {
        let resolved = self.resolve(expressions, known_queues).await?;
        Ok(collapse_repeats(&resolved))
    }

    /// Stored expressions for `key`, falling back to the `default` assignment.
    /// Absent everywhere resolves to nothing.
    async fn lookup(&self, key: &str) -> Result<Vec<String>> {
        if let Some(found) = self.store.get(key).await?.filter(|v| !v.is_empty()) {
            return Ok(found);
        }

        if key == DEFAULT_ASSIGNMENT_KEY {
            return Ok(Vec::new());
        }

        debug!(key = %key, "No assignment stored, using default");
        Ok(self
            .store
            .get(DEFAULT_ASSIGNMENT_KEY)
            .await?
            .unwrap_or_default())
    }
}
