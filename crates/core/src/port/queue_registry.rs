// Queue Registry Port (Interface)
// The host job framework's view of which queues exist

use crate::domain::QueueName;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait QueueRegistry: Send + Sync {
    /// All known queue names, ascending
    async fn known_queues(&self) -> Result<Vec<QueueName>>;

    /// Record a queue name (idempotent)
    async fn register(&self, name: &str) -> Result<()>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::BTreeSet;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct InMemoryQueueRegistry {
        names: Mutex<BTreeSet<QueueName>>,
    }

    impl InMemoryQueueRegistry {
        pub fn new<I, S>(names: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                names: Mutex::new(names.into_iter().map(Into::into).collect()),
            }
        }
    }

    #[async_trait]
    impl QueueRegistry for InMemoryQueueRegistry {
        async fn known_queues(&self) -> Result<Vec<QueueName>> {
            Ok(self.names.lock().unwrap().iter().cloned().collect())
        }

        async fn register(&self, name: &str) -> Result<()> {
            self.names.lock().unwrap().insert(name.to_string());
            Ok(())
        }
    }
}
