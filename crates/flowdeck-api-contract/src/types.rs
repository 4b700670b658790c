//! API contract types for the flowdeck dashboard service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Delivery states of a transactional-outbox record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutboxStatus {
    Pending,
    Published,
    Failed,
}

impl OutboxStatus {
    /// Wire form, as used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            OutboxStatus::Pending => "pending",
            OutboxStatus::Published => "published",
            OutboxStatus::Failed => "failed",
        }
    }
}

/// Lifecycle states of a workflow instance
///
/// `Unknown` absorbs states introduced by a newer backend; the client never
/// sends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceStatus {
    Running,
    Completed,
    Failed,
    Paused,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl InstanceStatus {
    /// Wire form, as used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Running => "running",
            InstanceStatus::Completed => "completed",
            InstanceStatus::Failed => "failed",
            InstanceStatus::Paused => "paused",
            InstanceStatus::Cancelled => "cancelled",
            InstanceStatus::Unknown => "unknown",
        }
    }
}

/// Lifecycle commands accepted by the worker control endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerCommand {
    Start,
    Stop,
    Restart,
}

impl WorkerCommand {
    /// Path segment for `POST /api/workers/{name}/{command}`
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerCommand::Start => "start",
            WorkerCommand::Stop => "stop",
            WorkerCommand::Restart => "restart",
        }
    }
}

/// Resource usage reported alongside a process heartbeat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_mb: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
}

/// Health snapshot of one monitored process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStatus {
    pub process_name: String,
    pub status: String,
    pub last_heartbeat: DateTime<Utc>,
    pub errors: u64,
    pub events_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ProcessMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<DateTime<Utc>>,
}

/// One transactional-outbox record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboxEvent {
    pub event_id: String,
    pub event_type: String,
    pub source: String,
    pub status: OutboxStatus,
    pub attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Null until the record has been delivered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

/// Server-side aggregate counters over the outbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxStats {
    pub pending: u64,
    pub published: u64,
    pub failed: u64,
}

/// Point-in-time snapshot of one message queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueInfo {
    pub name: String,
    pub messages: u64,
    pub messages_ready: u64,
    pub messages_unacked: u64,
    pub consumers: u32,
    pub state: String,
}

/// One entry in the event audit trail, ordered by `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub direction: String,
    pub process_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Retry behavior attached to a workflow step definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub strategy: String,
}

/// One step in a workflow template
///
/// `on_ok` and `on_nok` name the next steps and form a directed step graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStepDef {
    pub name: String,
    #[serde(rename = "type")]
    pub step_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_ok: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_nok: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub retry_policy: RetryPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for: Option<Vec<String>>,
}

/// Run-state counters for one workflow template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStats {
    pub running: u64,
    pub completed: u64,
    pub failed: u64,
    pub paused: u64,
}

/// A workflow template
///
/// Summary listings omit `steps`; the single-template endpoint includes the
/// full step graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDef {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<WorkflowStepDef>>,
    pub stats: WorkflowStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One execution of a workflow template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowInstance {
    pub id: String,
    pub workflow_name: String,
    pub status: InstanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_step: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_params: Option<HashMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_data: Option<HashMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<WorkflowStepLog>>,
}

/// The record of one attempt to execute one workflow step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStepLog {
    pub id: i64,
    pub step_name: String,
    pub step_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub attempt: u32,
    pub max_retries: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_data: Option<HashMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_data: Option<HashMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_step: Option<String>,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiting_for: Option<Vec<String>>,
}

/// Cross-workflow counters, including cancelled runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStatusCounts {
    pub running: u64,
    pub completed: u64,
    pub failed: u64,
    pub paused: u64,
    pub cancelled: u64,
}

/// Cross-workflow aggregate computed server-side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalWorkflowStats {
    pub global: GlobalStatusCounts,
    pub last_24h: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_duration_ms: Option<f64>,
}

// Response envelopes. Every read endpoint wraps its payload in a single
// named field.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessListResponse {
    pub processes: Vec<ProcessStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboxListResponse {
    pub events: Vec<OutboxEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboxStatsResponse {
    pub stats: OutboxStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventListResponse {
    pub events: Vec<EventLog>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueListResponse {
    pub queues: Vec<QueueInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowListResponse {
    pub workflows: Vec<WorkflowDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowResponse {
    pub workflow: WorkflowDef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceListResponse {
    pub instances: Vec<WorkflowInstance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceResponse {
    pub instance: WorkflowInstance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepLogListResponse {
    pub steps: Vec<WorkflowStepLog>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStatsResponse {
    pub stats: GlobalWorkflowStats,
}

/// Body for `POST /api/instances/{id}/retry`
///
/// The field is always present on the wire; `null` means resume from the
/// failed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryInstanceRequest {
    pub from_step: Option<String>,
}

/// Error envelope returned by the backend on non-success responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_status_decodes_with_null_metadata() {
        let json = r#"{
            "process_name": "outbox-publisher",
            "status": "running",
            "last_heartbeat": "2025-06-01T12:00:00Z",
            "errors": 0,
            "events_count": 1520,
            "metadata": null,
            "started_at": "2025-06-01T08:00:00Z",
            "stopped_at": null
        }"#;

        let status: ProcessStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.process_name, "outbox-publisher");
        assert!(status.metadata.is_none());
        assert!(status.started_at.is_some());
        assert!(status.stopped_at.is_none());
    }

    #[test]
    fn process_status_decodes_with_metadata() {
        let json = r#"{
            "process_name": "queue-consumer",
            "status": "running",
            "last_heartbeat": "2025-06-01T12:00:05Z",
            "errors": 2,
            "events_count": 87,
            "metadata": {"memory_mb": 96, "pid": 4412}
        }"#;

        let status: ProcessStatus = serde_json::from_str(json).unwrap();
        let metadata = status.metadata.unwrap();
        assert_eq!(metadata.memory_mb, Some(96));
        assert_eq!(metadata.pid, Some(4412));
    }

    #[test]
    fn outbox_event_decodes_pending_record() {
        let json = r#"{
            "event_id": "evt-9f2c",
            "event_type": "order.created",
            "source": "orders-service",
            "status": "pending",
            "attempts": 0,
            "last_error": null,
            "created_at": "2025-06-01T11:59:58Z",
            "published_at": null
        }"#;

        let event: OutboxEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.status, OutboxStatus::Pending);
        assert!(event.published_at.is_none());
    }

    #[test]
    fn event_log_decodes() {
        let json = r#"{
            "id": 4211,
            "event_id": "evt-9f2c",
            "event_type": "order.created",
            "direction": "outbound",
            "process_name": "outbox-publisher",
            "source": "orders-service",
            "payload_summary": "order #1882",
            "created_at": "2025-06-01T12:00:00Z"
        }"#;

        let entry: EventLog = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, 4211);
        assert_eq!(entry.payload_summary.as_deref(), Some("order #1882"));
    }

    #[test]
    fn workflow_summary_omits_steps() {
        let json = r#"{
            "workflows": [{
                "name": "order_fulfillment",
                "description": "Pick, pack, ship",
                "is_active": true,
                "stats": {"running": 3, "completed": 120, "failed": 2, "paused": 0},
                "created_at": "2025-05-01T00:00:00Z",
                "updated_at": "2025-05-20T00:00:00Z"
            }]
        }"#;

        let response: WorkflowListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.workflows.len(), 1);
        assert!(response.workflows[0].steps.is_none());
    }

    #[test]
    fn workflow_detail_carries_step_graph() {
        let json = r#"{
            "name": "order_fulfillment",
            "description": null,
            "is_active": true,
            "steps": [{
                "name": "reserve_stock",
                "type": "task",
                "on_ok": "charge_payment",
                "on_nok": null,
                "description": null,
                "retry_policy": {"max_retries": 3, "base_delay_ms": 500, "strategy": "exponential"},
                "queue_name": "inventory",
                "timeout_ms": 30000,
                "wait_for": ["validate_order"]
            }],
            "stats": {"running": 0, "completed": 0, "failed": 0, "paused": 0},
            "created_at": "2025-05-01T00:00:00Z",
            "updated_at": "2025-05-01T00:00:00Z"
        }"#;

        let workflow: WorkflowDef = serde_json::from_str(json).unwrap();
        let steps = workflow.steps.unwrap();
        assert_eq!(steps[0].on_ok.as_deref(), Some("charge_payment"));
        assert_eq!(steps[0].retry_policy.max_retries, 3);
        assert_eq!(steps[0].wait_for.as_deref(), Some(&["validate_order".to_string()][..]));
    }

    #[test]
    fn instance_status_unknown_variant_absorbs_new_states() {
        let status: InstanceStatus = serde_json::from_str(r#""archived""#).unwrap();
        assert_eq!(status, InstanceStatus::Unknown);

        let status: InstanceStatus = serde_json::from_str(r#""cancelled""#).unwrap();
        assert_eq!(status, InstanceStatus::Cancelled);
    }

    #[test]
    fn global_stats_decode_with_missing_average() {
        let json = r#"{
            "global": {"running": 4, "completed": 310, "failed": 9, "paused": 1, "cancelled": 5},
            "last_24h": 42,
            "avg_duration_ms": null
        }"#;

        let stats: GlobalWorkflowStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.global.cancelled, 5);
        assert_eq!(stats.last_24h, 42);
        assert!(stats.avg_duration_ms.is_none());
    }

    #[test]
    fn retry_request_always_serializes_from_step() {
        let body = RetryInstanceRequest {
            from_step: Some("step_two".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"from_step":"step_two"}"#
        );

        let body = RetryInstanceRequest { from_step: None };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"from_step":null}"#);
    }

    #[test]
    fn error_body_tolerates_missing_field() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.error.is_none());

        let body: ErrorBody = serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
        assert_eq!(body.error.as_deref(), Some("boom"));
    }
}
