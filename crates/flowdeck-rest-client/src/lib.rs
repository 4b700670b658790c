//! REST API client for the flowdeck dashboard service
//!
//! This crate provides the HTTP client for the workflow-monitoring
//! dashboard backend: the typed request/response gateway, one method per
//! backend operation, and SSE streaming of the live event log.

pub mod auth;
pub mod client;
pub mod error;
pub mod sse;

pub use auth::*;
pub use client::*;
pub use error::*;
pub use sse::{decode_frame, Decoded, LiveEventStream, STREAM_DISCONNECTED};

use async_trait::async_trait;
use flowdeck_api_contract::*;
use flowdeck_client_api::{ClientApiError, ClientApiResult, DashboardApi};

#[async_trait]
impl DashboardApi for client::RestClient {
    async fn get_status(&self) -> ClientApiResult<Vec<ProcessStatus>> {
        self.get_status().await.map_err(|e| ClientApiError::Server(e.to_string()))
    }

    async fn get_outbox(
        &self,
        status: Option<OutboxStatus>,
        limit: u32,
    ) -> ClientApiResult<Vec<OutboxEvent>> {
        self.get_outbox(status, limit)
            .await
            .map_err(|e| ClientApiError::Server(e.to_string()))
    }

    async fn get_outbox_stats(&self) -> ClientApiResult<OutboxStats> {
        self.get_outbox_stats()
            .await
            .map_err(|e| ClientApiError::Server(e.to_string()))
    }

    async fn retry_event(&self, event_id: &str) -> ClientApiResult<()> {
        self.retry_event(event_id)
            .await
            .map_err(|e| ClientApiError::Server(e.to_string()))
    }

    async fn get_events(
        &self,
        limit: u32,
        after_id: Option<i64>,
    ) -> ClientApiResult<Vec<EventLog>> {
        self.get_events(limit, after_id)
            .await
            .map_err(|e| ClientApiError::Server(e.to_string()))
    }

    async fn get_queues(&self) -> ClientApiResult<Vec<QueueInfo>> {
        self.get_queues().await.map_err(|e| ClientApiError::Server(e.to_string()))
    }

    async fn purge_queue(&self, name: &str) -> ClientApiResult<()> {
        self.purge_queue(name)
            .await
            .map_err(|e| ClientApiError::Server(e.to_string()))
    }

    async fn worker_command(&self, name: &str, command: WorkerCommand) -> ClientApiResult<()> {
        self.worker_command(name, command)
            .await
            .map_err(|e| ClientApiError::Server(e.to_string()))
    }

    async fn get_workflows(&self) -> ClientApiResult<Vec<WorkflowDef>> {
        self.get_workflows().await.map_err(|e| ClientApiError::Server(e.to_string()))
    }

    async fn get_workflow(&self, name: &str) -> ClientApiResult<WorkflowDef> {
        self.get_workflow(name)
            .await
            .map_err(|e| ClientApiError::Server(e.to_string()))
    }

    async fn get_workflow_instances(
        &self,
        name: &str,
        status: Option<InstanceStatus>,
        limit: u32,
    ) -> ClientApiResult<Vec<WorkflowInstance>> {
        self.get_workflow_instances(name, status, limit)
            .await
            .map_err(|e| ClientApiError::Server(e.to_string()))
    }

    async fn get_instance(&self, id: &str) -> ClientApiResult<WorkflowInstance> {
        self.get_instance(id)
            .await
            .map_err(|e| ClientApiError::Server(e.to_string()))
    }

    async fn get_instance_steps(&self, id: &str) -> ClientApiResult<Vec<WorkflowStepLog>> {
        self.get_instance_steps(id)
            .await
            .map_err(|e| ClientApiError::Server(e.to_string()))
    }

    async fn retry_instance(&self, id: &str, from_step: Option<&str>) -> ClientApiResult<()> {
        self.retry_instance(id, from_step)
            .await
            .map_err(|e| ClientApiError::Server(e.to_string()))
    }

    async fn get_workflow_stats(&self) -> ClientApiResult<GlobalWorkflowStats> {
        self.get_workflow_stats()
            .await
            .map_err(|e| ClientApiError::Server(e.to_string()))
    }
}
