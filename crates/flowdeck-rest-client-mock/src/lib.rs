//! Mock dashboard client backed by canned snapshots
//!
//! Lets dashboard views be developed and tested without a backend. Read
//! operations return a small fixed fleet; mutating operations are accepted
//! no-ops.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::json;

use flowdeck_api_contract::*;
use flowdeck_client_api::{ClientApiError, ClientApiResult, DashboardApi};

pub struct MockClient;

impl MockClient {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

fn object(value: serde_json::Value) -> std::collections::HashMap<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map.into_iter().collect(),
        _ => Default::default(),
    }
}

#[async_trait]
impl DashboardApi for MockClient {
    async fn get_status(&self) -> ClientApiResult<Vec<ProcessStatus>> {
        let now = Utc::now();
        Ok(vec![
            ProcessStatus {
                process_name: "outbox-publisher".into(),
                status: "running".into(),
                last_heartbeat: now,
                errors: 0,
                events_count: 1520,
                metadata: Some(ProcessMetadata {
                    memory_mb: Some(64),
                    pid: Some(311),
                }),
                started_at: Some(now - Duration::hours(4)),
                stopped_at: None,
            },
            ProcessStatus {
                process_name: "queue-consumer".into(),
                status: "degraded".into(),
                last_heartbeat: now - Duration::minutes(3),
                errors: 7,
                events_count: 87,
                metadata: None,
                started_at: Some(now - Duration::hours(4)),
                stopped_at: None,
            },
        ])
    }

    async fn get_outbox(
        &self,
        status: Option<OutboxStatus>,
        limit: u32,
    ) -> ClientApiResult<Vec<OutboxEvent>> {
        let now = Utc::now();
        let events = vec![
            OutboxEvent {
                event_id: "evt-9f2c".into(),
                event_type: "order.created".into(),
                source: "orders-service".into(),
                status: OutboxStatus::Pending,
                attempts: 0,
                last_error: None,
                created_at: now - Duration::seconds(5),
                published_at: None,
            },
            OutboxEvent {
                event_id: "evt-77aa".into(),
                event_type: "invoice.issued".into(),
                source: "billing-service".into(),
                status: OutboxStatus::Failed,
                attempts: 4,
                last_error: Some("connection refused".into()),
                created_at: now - Duration::minutes(10),
                published_at: None,
            },
            OutboxEvent {
                event_id: "evt-30b1".into(),
                event_type: "order.created".into(),
                source: "orders-service".into(),
                status: OutboxStatus::Published,
                attempts: 1,
                last_error: None,
                created_at: now - Duration::minutes(15),
                published_at: Some(now - Duration::minutes(14)),
            },
        ];

        Ok(events
            .into_iter()
            .filter(|e| status.map_or(true, |s| e.status == s))
            .take(limit as usize)
            .collect())
    }

    async fn get_outbox_stats(&self) -> ClientApiResult<OutboxStats> {
        Ok(OutboxStats {
            pending: 1,
            published: 120,
            failed: 1,
        })
    }

    async fn retry_event(&self, _event_id: &str) -> ClientApiResult<()> {
        Ok(())
    }

    async fn get_events(
        &self,
        limit: u32,
        after_id: Option<i64>,
    ) -> ClientApiResult<Vec<EventLog>> {
        let now = Utc::now();
        let entries = (1..=5).map(|i| EventLog {
            id: 4200 + i,
            event_id: format!("evt-{i}"),
            event_type: "order.created".into(),
            direction: if i % 2 == 0 { "inbound" } else { "outbound" }.into(),
            process_name: "outbox-publisher".into(),
            source: Some("orders-service".into()),
            payload_summary: None,
            created_at: now - Duration::seconds(60 - i),
        });

        Ok(entries
            .filter(|e| after_id.map_or(true, |cursor| e.id > cursor))
            .take(limit as usize)
            .collect())
    }

    async fn get_queues(&self) -> ClientApiResult<Vec<QueueInfo>> {
        Ok(vec![
            QueueInfo {
                name: "orders".into(),
                messages: 42,
                messages_ready: 40,
                messages_unacked: 2,
                consumers: 3,
                state: "running".into(),
            },
            QueueInfo {
                name: "inventory".into(),
                messages: 0,
                messages_ready: 0,
                messages_unacked: 0,
                consumers: 1,
                state: "idle".into(),
            },
        ])
    }

    async fn purge_queue(&self, _name: &str) -> ClientApiResult<()> {
        Ok(())
    }

    async fn worker_command(&self, _name: &str, _command: WorkerCommand) -> ClientApiResult<()> {
        Ok(())
    }

    async fn get_workflows(&self) -> ClientApiResult<Vec<WorkflowDef>> {
        let mut workflow = order_fulfillment();
        // Summary listings omit the step graph.
        workflow.steps = None;
        Ok(vec![workflow])
    }

    async fn get_workflow(&self, name: &str) -> ClientApiResult<WorkflowDef> {
        if name == "order_fulfillment" {
            Ok(order_fulfillment())
        } else {
            Err(ClientApiError::Server(format!("workflow not found: {name}")))
        }
    }

    async fn get_workflow_instances(
        &self,
        name: &str,
        status: Option<InstanceStatus>,
        limit: u32,
    ) -> ClientApiResult<Vec<WorkflowInstance>> {
        let instance = failed_instance(name);
        Ok(std::iter::once(instance)
            .filter(|i| status.map_or(true, |s| i.status == s))
            .take(limit as usize)
            .collect())
    }

    async fn get_instance(&self, id: &str) -> ClientApiResult<WorkflowInstance> {
        if id == "abc-123" {
            Ok(failed_instance("order_fulfillment"))
        } else {
            Err(ClientApiError::Server(format!("instance not found: {id}")))
        }
    }

    async fn get_instance_steps(&self, _id: &str) -> ClientApiResult<Vec<WorkflowStepLog>> {
        let now = Utc::now();
        Ok(vec![
            WorkflowStepLog {
                id: 1,
                step_name: "reserve_stock".into(),
                step_type: "task".into(),
                status: "completed".into(),
                result: Some("ok".into()),
                attempt: 1,
                max_retries: 3,
                input_data: Some(object(json!({"sku": "X-1", "qty": 2}))),
                output_data: Some(object(json!({"reservation": "rsv-88"}))),
                error_message: None,
                next_step: Some("charge_payment".into()),
                started_at: now - Duration::minutes(5),
                completed_at: Some(now - Duration::minutes(5) + Duration::seconds(2)),
                duration_ms: Some(2000),
                queue_name: Some("inventory".into()),
                waiting_for: None,
            },
            WorkflowStepLog {
                id: 2,
                step_name: "charge_payment".into(),
                step_type: "task".into(),
                status: "failed".into(),
                result: None,
                attempt: 3,
                max_retries: 3,
                input_data: None,
                output_data: None,
                error_message: Some("card declined".into()),
                next_step: None,
                started_at: now - Duration::minutes(4),
                completed_at: Some(now - Duration::minutes(3)),
                duration_ms: Some(60_000),
                queue_name: Some("payments".into()),
                waiting_for: None,
            },
        ])
    }

    async fn retry_instance(&self, _id: &str, _from_step: Option<&str>) -> ClientApiResult<()> {
        Ok(())
    }

    async fn get_workflow_stats(&self) -> ClientApiResult<GlobalWorkflowStats> {
        Ok(GlobalWorkflowStats {
            global: GlobalStatusCounts {
                running: 3,
                completed: 120,
                failed: 2,
                paused: 0,
                cancelled: 1,
            },
            last_24h: 42,
            avg_duration_ms: Some(1830.5),
        })
    }
}

fn order_fulfillment() -> WorkflowDef {
    let now = Utc::now();
    WorkflowDef {
        name: "order_fulfillment".into(),
        description: Some("Pick, pack, ship".into()),
        is_active: true,
        steps: Some(vec![
            WorkflowStepDef {
                name: "reserve_stock".into(),
                step_type: "task".into(),
                on_ok: Some("charge_payment".into()),
                on_nok: None,
                description: None,
                retry_policy: RetryPolicy {
                    max_retries: 3,
                    base_delay_ms: 500,
                    strategy: "exponential".into(),
                },
                queue_name: Some("inventory".into()),
                timeout_ms: Some(30_000),
                wait_for: None,
            },
            WorkflowStepDef {
                name: "charge_payment".into(),
                step_type: "task".into(),
                on_ok: None,
                on_nok: Some("reserve_stock".into()),
                description: Some("Capture payment for the order".into()),
                retry_policy: RetryPolicy {
                    max_retries: 3,
                    base_delay_ms: 1000,
                    strategy: "fixed".into(),
                },
                queue_name: Some("payments".into()),
                timeout_ms: None,
                wait_for: Some(vec!["reserve_stock".into()]),
            },
        ]),
        stats: WorkflowStats {
            running: 3,
            completed: 120,
            failed: 2,
            paused: 0,
        },
        created_at: now - Duration::days(30),
        updated_at: now - Duration::days(2),
    }
}

fn failed_instance(workflow_name: &str) -> WorkflowInstance {
    let now = Utc::now();
    WorkflowInstance {
        id: "abc-123".into(),
        workflow_name: workflow_name.to_string(),
        status: InstanceStatus::Failed,
        current_step: Some("charge_payment".into()),
        input_params: Some(object(json!({"order_id": 1882}))),
        context_data: None,
        error_message: Some("card declined".into()),
        started_at: now - Duration::minutes(5),
        completed_at: None,
        updated_at: now - Duration::minutes(3),
        steps: None,
    }
}
