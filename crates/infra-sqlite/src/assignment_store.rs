// SQLite AssignmentStore Implementation
//
// Table `dynamic_queues(key, value, updated_at)`; `value` is the JSON array
// of expressions, which keeps order and content intact.

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use dynaq_core::domain::AssignmentMap;
use dynaq_core::error::Result;
use dynaq_core::port::{AssignmentStore, TimeProvider};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct SqliteAssignmentStore {
    pool: SqlitePool,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteAssignmentStore {
    pub fn new(pool: SqlitePool, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            pool,
            time_provider,
        }
    }

    async fn upsert(
        tx: &mut Transaction<'_, Sqlite>,
        key: &str,
        values: &[String],
        now: i64,
    ) -> Result<()> {
        let encoded = serde_json::to_string(values)?;
        sqlx::query(
            r#"
            INSERT INTO dynamic_queues (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(encoded)
        .bind(now)
        .execute(&mut **tx)
        .await
        .map_err(map_sqlx_error)?;
        Ok(())
    }
}

/// Decode a stored value. Corrupt rows are reported and treated as absent.
fn decode(key: &str, raw: &str) -> Option<Vec<String>> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(values) => Some(values),
        Err(e) => {
            warn!(key = %key, error = %e, "Ignoring malformed assignment row");
            None
        }
    }
}

#[async_trait]
impl AssignmentStore for SqliteAssignmentStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<String>>> {
        let raw: Option<String> = sqlx::query_scalar("SELECT value FROM dynamic_queues WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(raw.and_then(|raw| decode(key, &raw)))
    }

    async fn set(&self, key: &str, values: &[String]) -> Result<()> {
        if values.is_empty() {
            sqlx::query("DELETE FROM dynamic_queues WHERE key = ?")
                .bind(key)
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
            debug!(key = %key, "Assignment deleted");
            return Ok(());
        }

        let now = self.time_provider.now_millis();
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Self::upsert(&mut tx, key, values, now).await?;
        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn replace_all(&self, assignments: &AssignmentMap) -> Result<()> {
        let now = self.time_provider.now_millis();

        // Clear + rewrite commit together; on error the transaction is
        // rolled back when dropped and readers keep the old table
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query("DELETE FROM dynamic_queues")
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        for (key, values) in assignments.iter().filter(|(_, v)| !v.is_empty()) {
            Self::upsert(&mut tx, key, values, now).await?;
        }

        tx.commit().await.map_err(map_sqlx_error)?;

        debug!(keys = assignments.len(), "Assignment table replaced");
        Ok(())
    }

    async fn entries(&self) -> Result<AssignmentMap> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT key, value FROM dynamic_queues ORDER BY key")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .filter_map(|(key, raw)| decode(&key, &raw).map(|values| (key, values)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations};
    use dynaq_core::port::time_provider::FixedTimeProvider;

    async fn store() -> SqliteAssignmentStore {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteAssignmentStore::new(pool, Arc::new(FixedTimeProvider(1_700_000_000_000)))
    }

    fn v(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = store().await;
        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_preserves_order() {
        let store = store().await;
        let values = v(&["zeta", "!alpha", "@other", "mid/3"]);
        store.set("w1", &values).await.unwrap();
        assert_eq!(store.get("w1").await.unwrap(), Some(values));
    }

    #[tokio::test]
    async fn test_set_overwrites_and_empty_deletes() {
        let store = store().await;
        store.set("w1", &v(&["a"])).await.unwrap();
        store.set("w1", &v(&["b", "c"])).await.unwrap();
        assert_eq!(store.get("w1").await.unwrap(), Some(v(&["b", "c"])));

        store.set("w1", &[]).await.unwrap();
        assert_eq!(store.get("w1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_all_synthesizes_default() {
        let store = store().await;
        store.set("w1", &v(&["a"])).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all.get("default"), Some(&v(&["*"])));
        assert_eq!(all.get("w1"), Some(&v(&["a"])));
    }

    #[tokio::test]
    async fn test_replace_all() {
        let store = store().await;
        store.set("old", &v(&["a"])).await.unwrap();

        let mut next = AssignmentMap::new();
        next.insert("default".to_string(), v(&["mail"]));
        next.insert("w2".to_string(), v(&["b/2"]));
        next.insert("skipped".to_string(), vec![]);
        store.replace_all(&next).await.unwrap();

        let entries = store.entries().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.get("default"), Some(&v(&["mail"])));
        assert_eq!(entries.get("w2"), Some(&v(&["b/2"])));
        assert!(!entries.contains_key("old"));
    }

    #[tokio::test]
    async fn test_malformed_row_is_ignored() {
        let store = store().await;
        sqlx::query("INSERT INTO dynamic_queues (key, value, updated_at) VALUES ('bad', 'not json', 0)")
            .execute(&store.pool)
            .await
            .unwrap();

        assert_eq!(store.get("bad").await.unwrap(), None);
        assert!(!store.entries().await.unwrap().contains_key("bad"));
    }
}
