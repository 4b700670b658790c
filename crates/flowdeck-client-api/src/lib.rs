//! Client API trait for the flowdeck dashboard UI

pub mod op;

pub use op::OpState;

use async_trait::async_trait;
use flowdeck_api_contract::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientApiError {
    #[error("server error: {0}")]
    Server(String),
    #[error("unexpected: {0}")]
    Unexpected(String),
}

pub type ClientApiResult<T> = Result<T, ClientApiError>;

/// The full endpoint surface the dashboard UI codes against.
///
/// Every method performs exactly one backend call. Mutating operations
/// return `()` on success and signal failure only through the error.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn get_status(&self) -> ClientApiResult<Vec<ProcessStatus>>;

    async fn get_outbox(
        &self,
        status: Option<OutboxStatus>,
        limit: u32,
    ) -> ClientApiResult<Vec<OutboxEvent>>;
    async fn get_outbox_stats(&self) -> ClientApiResult<OutboxStats>;
    async fn retry_event(&self, event_id: &str) -> ClientApiResult<()>;

    async fn get_events(&self, limit: u32, after_id: Option<i64>)
        -> ClientApiResult<Vec<EventLog>>;

    async fn get_queues(&self) -> ClientApiResult<Vec<QueueInfo>>;
    async fn purge_queue(&self, name: &str) -> ClientApiResult<()>;

    async fn worker_command(&self, name: &str, command: WorkerCommand) -> ClientApiResult<()>;

    async fn get_workflows(&self) -> ClientApiResult<Vec<WorkflowDef>>;
    async fn get_workflow(&self, name: &str) -> ClientApiResult<WorkflowDef>;
    async fn get_workflow_instances(
        &self,
        name: &str,
        status: Option<InstanceStatus>,
        limit: u32,
    ) -> ClientApiResult<Vec<WorkflowInstance>>;
    async fn get_instance(&self, id: &str) -> ClientApiResult<WorkflowInstance>;
    async fn get_instance_steps(&self, id: &str) -> ClientApiResult<Vec<WorkflowStepLog>>;
    async fn retry_instance(&self, id: &str, from_step: Option<&str>) -> ClientApiResult<()>;
    async fn get_workflow_stats(&self) -> ClientApiResult<GlobalWorkflowStats>;
}
