//! JSON-RPC Server
//!
//! Serves the management API over HTTP on localhost.

use crate::handler::RpcHandler;
use crate::types::{
    ExpressionsRequest, RegisterQueueRequest, SetAllAssignmentsRequest, SetAssignmentRequest,
};
use dynaq_core::application::AssignmentService;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
pub const DEFAULT_RPC_PORT: u16 = 9640;

/// RPC Server Configuration
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

/// Register a method whose params deserialize into `$req`
macro_rules! register_with_params {
    ($module:expr, $handler:expr, $name:literal, $req:ty, $method:ident) => {{
        let handler = $handler.clone();
        $module
            .register_async_method($name, move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: $req = params.parse()?;
                    handler.$method(req).await
                }
            })
            .map_err(|e| e.to_string())?;
    }};
}

/// Register a method that takes no params
macro_rules! register_without_params {
    ($module:expr, $handler:expr, $name:literal, $method:ident) => {{
        let handler = $handler.clone();
        $module
            .register_async_method($name, move |_, _, _| {
                let handler = handler.clone();
                async move { handler.$method().await }
            })
            .map_err(|e| e.to_string())?;
    }};
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, service: Arc<AssignmentService>) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(service)),
        }
    }

    /// Start the JSON-RPC server. Returns the handle and the bound address
    /// (port 0 binds an ephemeral port).
    ///
    /// Security: binds to localhost by default (no external access)
    pub async fn start(self) -> Result<(ServerHandle, SocketAddr), String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;
        let local_addr = server
            .local_addr()
            .map_err(|e| format!("Failed to read bound address: {}", e))?;

        let mut module = RpcModule::new(());

        register_without_params!(module, self.handler, "assignments.list.v1", list_assignments);
        register_without_params!(module, self.handler, "assignments.overview.v1", overview);
        register_with_params!(
            module,
            self.handler,
            "assignments.set.v1",
            SetAssignmentRequest,
            set_assignment
        );
        register_with_params!(
            module,
            self.handler,
            "assignments.set_all.v1",
            SetAllAssignmentsRequest,
            set_all_assignments
        );
        register_with_params!(
            module,
            self.handler,
            "queues.resolve.v1",
            ExpressionsRequest,
            resolve
        );
        register_with_params!(
            module,
            self.handler,
            "queues.expand.v1",
            ExpressionsRequest,
            expand
        );
        register_with_params!(
            module,
            self.handler,
            "queues.register.v1",
            RegisterQueueRequest,
            register_queue
        );
        register_without_params!(module, self.handler, "queues.list.v1", list_queues);

        info!(addr = %local_addr, "JSON-RPC server started");

        let handle = server.start(module);
        Ok((handle, local_addr))
    }
}
