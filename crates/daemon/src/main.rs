//! Dynaq - Main Entry Point
//! Serves the assignment store and queue resolution over JSON-RPC

mod config;

use anyhow::{Context, Result};
use config::{DaemonConfig, LogFormat};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Import workspace crates
use dynaq_api_rpc::server::RpcServerConfig;
use dynaq_api_rpc::RpcServer;
use dynaq_core::application::{AssignmentService, QueueResolver, ResolverConfig};
use dynaq_core::port::time_provider::SystemTimeProvider;
use dynaq_core::port::{AssignmentStore, IdentityProvider, QueueRegistry};
use dynaq_infra_sqlite::{create_pool, run_migrations, SqliteAssignmentStore, SqliteQueueRegistry};
use dynaq_infra_system::HostIdentityProvider;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_logging(format: &LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("dynaq=info"))
        .context("Failed to create env filter")?;

    match format {
        // Production: JSON structured logging
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .init(),
        // Development: Pretty formatting with colors
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty())
            .init(),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration and initialize logging
    let config = DaemonConfig::from_env();
    init_logging(&config.log_format)?;

    info!("Dynaq v{} starting...", VERSION);

    // 2. Initialize database
    if let Some(parent) = std::path::Path::new(&config.db_path).parent() {
        if !config.db_path.starts_with("sqlite:") && !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    info!(db_path = %config.db_path, "Initializing database...");
    let pool = create_pool(&config.database_url())
        .await
        .context("DB pool creation failed")?;
    run_migrations(&pool).await.context("Migration failed")?;

    // 3. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let store: Arc<dyn AssignmentStore> =
        Arc::new(SqliteAssignmentStore::new(pool.clone(), time_provider.clone()));
    let registry: Arc<dyn QueueRegistry> =
        Arc::new(SqliteQueueRegistry::new(pool.clone(), time_provider));

    let identity = HostIdentityProvider::from_env().identity();
    let resolver_config =
        ResolverConfig::new(identity.clone()).with_max_indirection_depth(config.max_indirection_depth);
    let resolver = Arc::new(QueueResolver::new(store.clone(), resolver_config));
    let service = Arc::new(AssignmentService::new(store, registry, resolver));

    // 4. Seed known queues
    for name in &config.seed_queues {
        service
            .register_queue(name)
            .await
            .with_context(|| format!("Failed to register queue {}", name))?;
    }

    // 5. Report what this worker resolves to
    let own = service
        .expand(&["@".to_string()])
        .await
        .context("Initial resolution failed")?;
    info!(identity = %identity, queues = ?own, "Resolved own assignment");

    // 6. Start JSON-RPC server
    info!("Starting JSON-RPC server...");
    let rpc_config = RpcServerConfig {
        host: config.rpc_host.clone(),
        port: config.rpc_port,
    };
    let (rpc_handle, addr) = RpcServer::new(rpc_config, service)
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!(addr = %addr, "System ready");
    info!("Press Ctrl+C to shutdown");

    // 7. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;
    pool.close().await;

    info!("Shutdown complete.");
    Ok(())
}
