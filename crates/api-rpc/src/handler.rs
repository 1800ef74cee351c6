//! RPC Method Handlers
//!
//! Thin adapters from JSON-RPC parameters to AssignmentService calls.

use crate::error::to_rpc_error;
use crate::types::{
    ExpressionsRequest, ListAssignmentsResponse, OverviewResponse, QueuesResponse,
    RegisterQueueRequest, RegisterQueueResponse, SetAllAssignmentsRequest,
    SetAllAssignmentsResponse, SetAssignmentRequest, SetAssignmentResponse,
};
use dynaq_core::application::assignment::parse_expression_list;
use dynaq_core::application::AssignmentService;
use dynaq_core::domain::AssignmentMap;
use jsonrpsee::types::ErrorObjectOwned;
use std::sync::Arc;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    service: Arc<AssignmentService>,
}

impl RpcHandler {
    pub fn new(service: Arc<AssignmentService>) -> Self {
        Self { service }
    }

    /// assignments.list.v1
    pub async fn list_assignments(&self) -> Result<ListAssignmentsResponse, ErrorObjectOwned> {
        let assignments = self.service.list().await.map_err(to_rpc_error)?;
        Ok(ListAssignmentsResponse { assignments })
    }

    /// assignments.overview.v1
    pub async fn overview(&self) -> Result<OverviewResponse, ErrorObjectOwned> {
        let rows = self.service.overview().await.map_err(to_rpc_error)?;
        Ok(OverviewResponse { rows })
    }

    /// assignments.set.v1
    pub async fn set_assignment(
        &self,
        params: SetAssignmentRequest,
    ) -> Result<SetAssignmentResponse, ErrorObjectOwned> {
        let deleted = params.values.is_empty();
        self.service
            .set(&params.key, params.values)
            .await
            .map_err(to_rpc_error)?;

        Ok(SetAssignmentResponse {
            key: params.key,
            deleted,
        })
    }

    /// assignments.set_all.v1
    pub async fn set_all_assignments(
        &self,
        params: SetAllAssignmentsRequest,
    ) -> Result<SetAllAssignmentsResponse, ErrorObjectOwned> {
        let assignments: AssignmentMap = params
            .assignments
            .into_iter()
            .map(|row| (row.name, parse_expression_list(&row.value)))
            .collect();
        let keys = assignments.values().filter(|v| !v.is_empty()).count();

        self.service
            .set_all(assignments)
            .await
            .map_err(to_rpc_error)?;

        Ok(SetAllAssignmentsResponse { keys })
    }

    /// queues.resolve.v1
    pub async fn resolve(
        &self,
        params: ExpressionsRequest,
    ) -> Result<QueuesResponse, ErrorObjectOwned> {
        let queues = self
            .service
            .resolve(&params.expressions)
            .await
            .map_err(to_rpc_error)?;
        Ok(QueuesResponse { queues })
    }

    /// queues.expand.v1
    pub async fn expand(
        &self,
        params: ExpressionsRequest,
    ) -> Result<QueuesResponse, ErrorObjectOwned> {
        let queues = self
            .service
            .expand(&params.expressions)
            .await
            .map_err(to_rpc_error)?;
        Ok(QueuesResponse { queues })
    }

    /// queues.register.v1
    pub async fn register_queue(
        &self,
        params: RegisterQueueRequest,
    ) -> Result<RegisterQueueResponse, ErrorObjectOwned> {
        self.service
            .register_queue(&params.name)
            .await
            .map_err(to_rpc_error)?;

        Ok(RegisterQueueResponse {
            name: params.name,
            registered: true,
        })
    }

    /// queues.list.v1
    pub async fn list_queues(&self) -> Result<QueuesResponse, ErrorObjectOwned> {
        let queues = self.service.known_queues().await.map_err(to_rpc_error)?;
        Ok(QueuesResponse { queues })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AssignmentInput;
    use dynaq_core::application::{QueueResolver, ResolverConfig};
    use dynaq_core::port::assignment_store::mocks::InMemoryAssignmentStore;
    use dynaq_core::port::queue_registry::mocks::InMemoryQueueRegistry;
    use dynaq_core::port::{AssignmentStore, QueueRegistry};

    fn handler() -> RpcHandler {
        let store: Arc<dyn AssignmentStore> = Arc::new(InMemoryAssignmentStore::new());
        let registry: Arc<dyn QueueRegistry> =
            Arc::new(InMemoryQueueRegistry::new(["free_y", "paid_x"]));
        let resolver = Arc::new(QueueResolver::new(
            store.clone(),
            ResolverConfig::new("web.1"),
        ));
        RpcHandler::new(Arc::new(AssignmentService::new(store, registry, resolver)))
    }

    #[tokio::test]
    async fn test_set_all_parses_form_values() {
        let h = handler();
        let resp = h
            .set_all_assignments(SetAllAssignmentsRequest {
                assignments: vec![
                    AssignmentInput {
                        name: "web.1".to_string(),
                        value: "paid_* /2, free_*".to_string(),
                    },
                    AssignmentInput {
                        name: "gone".to_string(),
                        value: " ".to_string(),
                    },
                ],
            })
            .await
            .unwrap();
        assert_eq!(resp.keys, 1);

        let listed = h.list_assignments().await.unwrap().assignments;
        assert_eq!(
            listed.get("web.1"),
            Some(&vec!["paid_*/2".to_string(), "free_*".to_string()])
        );
        assert!(!listed.contains_key("gone"));

        let resolved = h
            .resolve(ExpressionsRequest {
                expressions: vec!["@".to_string()],
            })
            .await
            .unwrap();
        assert_eq!(resolved.queues, vec!["free_y", "paid_x", "paid_x"]);
    }

    #[tokio::test]
    async fn test_set_empty_reports_deleted() {
        let h = handler();
        let resp = h
            .set_assignment(SetAssignmentRequest {
                key: "w".to_string(),
                values: vec![],
            })
            .await
            .unwrap();
        assert!(resp.deleted);
    }

    #[tokio::test]
    async fn test_register_rejects_glob() {
        let h = handler();
        let err = h
            .register_queue(RegisterQueueRequest {
                name: "bad*".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), crate::error::code::VALIDATION_ERROR);
    }
}
