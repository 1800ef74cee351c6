// SQLite QueueRegistry Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use dynaq_core::domain::QueueName;
use dynaq_core::error::Result;
use dynaq_core::port::{QueueRegistry, TimeProvider};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct SqliteQueueRegistry {
    pool: SqlitePool,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteQueueRegistry {
    pub fn new(pool: SqlitePool, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            pool,
            time_provider,
        }
    }
}

#[async_trait]
impl QueueRegistry for SqliteQueueRegistry {
    async fn known_queues(&self) -> Result<Vec<QueueName>> {
        sqlx::query_scalar("SELECT name FROM queues ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn register(&self, name: &str) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO queues (name, registered_at) VALUES (?, ?)")
            .bind(name)
            .bind(self.time_provider.now_millis())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}
