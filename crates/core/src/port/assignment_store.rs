// Assignment Store Port (Interface)

use crate::domain::{AssignmentMap, DEFAULT_ASSIGNMENT_KEY};
use crate::error::Result;
use async_trait::async_trait;

/// Shared key-value table of per-worker-group queue expressions
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// Stored expressions for `key` (None if absent)
    async fn get(&self, key: &str) -> Result<Option<Vec<String>>>;

    /// Replace the entry for `key`; an empty `values` deletes it
    async fn set(&self, key: &str, values: &[String]) -> Result<()>;

    /// Clear the whole table and write `assignments`, atomically.
    ///
    /// Concurrent readers observe either the previous table or the new one,
    /// never an empty intermediate state.
    async fn replace_all(&self, assignments: &AssignmentMap) -> Result<()>;

    /// Raw table contents, without the synthesized `default` entry
    async fn entries(&self) -> Result<AssignmentMap>;

    /// Every stored assignment. Always contains `default`.
    async fn list_all(&self) -> Result<AssignmentMap> {
        let mut all = self.entries().await?;
        all.entry(DEFAULT_ASSIGNMENT_KEY.to_string())
            .or_insert_with(crate::domain::default_assignment);
        Ok(all)
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::RwLock;

    /// In-memory AssignmentStore. `replace_all` swaps under one write lock.
    #[derive(Default)]
    pub struct InMemoryAssignmentStore {
        table: RwLock<AssignmentMap>,
        lookups: AtomicUsize,
        unavailable: AtomicBool,
    }

    impl InMemoryAssignmentStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_entries<I, K, V>(entries: I) -> Self
        where
            I: IntoIterator<Item = (K, V)>,
            K: Into<String>,
            V: IntoIterator,
            V::Item: Into<String>,
        {
            let table = entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
                .collect();
            Self {
                table: RwLock::new(table),
                ..Self::default()
            }
        }

        /// Number of `get` calls served so far
        pub fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }

        /// Make every subsequent call fail as if the store were down
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        fn check_available(&self) -> Result<()> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(AppError::Store("connection refused".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl AssignmentStore for InMemoryAssignmentStore {
        async fn get(&self, key: &str) -> Result<Option<Vec<String>>> {
            self.check_available()?;
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.table.read().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, values: &[String]) -> Result<()> {
            self.check_available()?;
            let mut table = self.table.write().unwrap();
            if values.is_empty() {
                table.remove(key);
            } else {
                table.insert(key.to_string(), values.to_vec());
            }
            Ok(())
        }

        async fn replace_all(&self, assignments: &AssignmentMap) -> Result<()> {
            self.check_available()?;
            let fresh = assignments
                .iter()
                .filter(|(_, v)| !v.is_empty())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            *self.table.write().unwrap() = fresh;
            Ok(())
        }

        async fn entries(&self) -> Result<AssignmentMap> {
            self.check_available()?;
            Ok(self.table.read().unwrap().clone())
        }
    }
}
