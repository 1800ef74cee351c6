//! End-to-end resolution against the SQLite store and registry

use std::sync::Arc;

use dynaq_core::application::{AssignmentService, QueueResolver, ResolverConfig};
use dynaq_core::domain::AssignmentMap;
use dynaq_core::port::time_provider::SystemTimeProvider;
use dynaq_core::port::{AssignmentStore, QueueRegistry};
use dynaq_infra_sqlite::{create_pool, run_migrations, SqliteAssignmentStore, SqliteQueueRegistry};

fn v(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

struct Harness {
    store: Arc<dyn AssignmentStore>,
    registry: Arc<dyn QueueRegistry>,
}

impl Harness {
    async fn new(queues: &[&str]) -> Self {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();

        let time_provider = Arc::new(SystemTimeProvider);
        let store: Arc<dyn AssignmentStore> =
            Arc::new(SqliteAssignmentStore::new(pool.clone(), time_provider.clone()));
        let registry: Arc<dyn QueueRegistry> =
            Arc::new(SqliteQueueRegistry::new(pool, time_provider));

        for q in queues {
            registry.register(q).await.unwrap();
        }

        Self { store, registry }
    }

    fn resolver(&self, identity: &str) -> QueueResolver {
        QueueResolver::new(self.store.clone(), ResolverConfig::new(identity))
    }

    fn service(&self, identity: &str) -> AssignmentService {
        AssignmentService::new(
            self.store.clone(),
            self.registry.clone(),
            Arc::new(self.resolver(identity)),
        )
    }
}

#[tokio::test]
async fn test_splat_returns_all_known_queues() {
    let h = Harness::new(&["c", "a", "b"]).await;
    let svc = h.service("host");
    assert_eq!(svc.resolve(&v(&["*"])).await.unwrap(), v(&["a", "b", "c"]));
}

#[tokio::test]
async fn test_repeat_without_known_queues() {
    let h = Harness::new(&[]).await;
    let out = h.resolver("host").resolve(&v(&["a/3"]), &[]).await.unwrap();
    assert_eq!(out, v(&["a", "a", "a"]));
}

#[tokio::test]
async fn test_identity_reference() {
    let h = Harness::new(&["q1", "q2", "q3"]).await;
    h.store.set("worker1", &v(&["q1", "q2"])).await.unwrap();

    let svc = h.service("worker1");
    assert_eq!(svc.resolve(&v(&["@"])).await.unwrap(), v(&["q1", "q2"]));
    assert_eq!(svc.resolve(&v(&["@worker1"])).await.unwrap(), v(&["q1", "q2"]));
}

#[tokio::test]
async fn test_negation_is_order_sensitive() {
    let h = Harness::new(&["paid_x", "free_y"]).await;
    let svc = h.service("host");

    assert_eq!(
        svc.resolve(&v(&["*", "!free_*"])).await.unwrap(),
        v(&["paid_x"])
    );
    assert_eq!(
        svc.resolve(&v(&["!free_*", "*"])).await.unwrap(),
        v(&["free_y", "paid_x"])
    );
}

#[tokio::test]
async fn test_unknown_key_resolves_to_nothing() {
    let h = Harness::new(&["x"]).await;
    let svc = h.service("host");
    assert!(svc.resolve(&v(&["@nope"])).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_default_assignment_applies_to_unassigned_hosts() {
    let h = Harness::new(&["mail", "reports", "sms"]).await;
    let mut table = AssignmentMap::new();
    table.insert("default".to_string(), v(&["*", "!reports"]));
    table.insert("reporting-box".to_string(), v(&["reports/3", "@default"]));
    h.store.replace_all(&table).await.unwrap();

    let plain = h.service("web-7");
    assert_eq!(plain.resolve(&v(&["@"])).await.unwrap(), v(&["mail", "sms"]));

    let reporting = h.service("reporting-box");
    // "!reports" from the default runs after "reports/3" was expanded
    assert_eq!(
        reporting.expand(&v(&["@"])).await.unwrap(),
        v(&["mail", "sms"])
    );
}

#[tokio::test]
async fn test_priority_weighting_display() {
    let h = Harness::new(&["paid_a", "paid_b", "free_a"]).await;
    h.store
        .set("web", &v(&["paid_*/3", "free_*"]))
        .await
        .unwrap();

    let svc = h.service("web");
    assert_eq!(
        svc.expand(&v(&["@"])).await.unwrap(),
        v(&["free_a", "paid_a/3", "paid_b/3"])
    );

    let rows = svc.overview().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "web");
    assert_eq!(rows[0].value, "paid_*/3, free_*");
    assert_eq!(rows[1].name, "default");
    assert_eq!(rows[1].expanded, "free_a, paid_a, paid_b");
}

#[tokio::test]
async fn test_cycle_through_store_terminates() {
    let h = Harness::new(&[]).await;
    h.store.set("a", &v(&["@b", "qa"])).await.unwrap();
    h.store.set("b", &v(&["@a", "qb"])).await.unwrap();

    let resolver = QueueResolver::new(
        h.store.clone(),
        ResolverConfig::new("host").with_max_indirection_depth(2),
    );
    let out = resolver.resolve(&v(&["@a"]), &[]).await.unwrap();
    assert_eq!(out, v(&["qa", "qb"]));
}
