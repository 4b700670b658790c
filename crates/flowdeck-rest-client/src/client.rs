//! Main REST API client implementation

use flowdeck_api_contract::*;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as HttpClient, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::auth::AuthConfig;
use crate::error::{RestClientError, RestClientResult};
use crate::sse::LiveEventStream;
use flowdeck_client_api::OpState;

/// Environment variable naming the backend base origin
pub const BASE_URL_ENV: &str = "FLOWDECK_API_URL";

/// Base origin used when `FLOWDECK_API_URL` is unset
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// REST API client for the flowdeck dashboard service
#[derive(Debug, Clone)]
pub struct RestClient {
    http_client: HttpClient,
    base_url: Url,
    auth: AuthConfig,
}

impl RestClient {
    /// Create a new REST client
    pub fn new(base_url: Url, auth: AuthConfig) -> Self {
        let http_client = HttpClient::builder()
            .user_agent("flowdeck/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url,
            auth,
        }
    }

    /// Create a client from a base URL string
    pub fn from_url(base_url: &str, auth: AuthConfig) -> RestClientResult<Self> {
        let base_url = Url::parse(base_url)?;
        Ok(Self::new(base_url, auth))
    }

    /// Create a client from the environment, falling back to the local
    /// development origin
    pub fn from_env() -> RestClientResult<Self> {
        let origin =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::from_url(&origin, AuthConfig::default())
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the authentication config
    pub fn auth(&self) -> &AuthConfig {
        &self.auth
    }

    // ── Status ──

    /// Get health snapshots of all monitored processes
    pub async fn get_status(&self) -> RestClientResult<Vec<ProcessStatus>> {
        let response: ProcessListResponse = self.get("/api/status").await?;
        Ok(response.processes)
    }

    // ── Outbox ──

    /// List outbox records, optionally filtered by delivery status
    pub async fn get_outbox(
        &self,
        status: Option<OutboxStatus>,
        limit: u32,
    ) -> RestClientResult<Vec<OutboxEvent>> {
        let mut params = Vec::new();
        if let Some(status) = status {
            params.push(format!("status={}", status.as_str()));
        }
        params.push(format!("limit={}", limit));

        let path = format!("/api/outbox?{}", params.join("&"));
        let response: OutboxListResponse = self.get(&path).await?;
        Ok(response.events)
    }

    /// Get aggregate outbox counters
    pub async fn get_outbox_stats(&self) -> RestClientResult<OutboxStats> {
        let response: OutboxStatsResponse = self.get("/api/outbox/stats").await?;
        Ok(response.stats)
    }

    /// Requeue one outbox record for publication
    pub async fn retry_event(&self, event_id: &str) -> RestClientResult<()> {
        let path = format!("/api/outbox/{}/retry", event_id);
        self.post_empty(&path).await
    }

    // ── Events ──

    /// Read a page of the event audit trail, forward-paged by `after_id`
    pub async fn get_events(
        &self,
        limit: u32,
        after_id: Option<i64>,
    ) -> RestClientResult<Vec<EventLog>> {
        let mut params = vec![format!("limit={}", limit)];
        if let Some(after_id) = after_id {
            params.push(format!("after_id={}", after_id));
        }

        let path = format!("/api/events?{}", params.join("&"));
        let response: EventListResponse = self.get(&path).await?;
        Ok(response.events)
    }

    /// Open the live event stream.
    ///
    /// The returned handle yields decoded `EventLog` records in transport
    /// order and must eventually be closed (or dropped) by the caller.
    /// Connection-level failure is reported into `state` as a fixed
    /// disconnection message; the handle does not reconnect.
    pub fn stream_events(&self, state: OpState) -> RestClientResult<LiveEventStream> {
        LiveEventStream::connect(&self.base_url, &self.auth, state)
    }

    // ── Queues ──

    /// Get snapshots of all message queues
    pub async fn get_queues(&self) -> RestClientResult<Vec<QueueInfo>> {
        let response: QueueListResponse = self.get("/api/queues").await?;
        Ok(response.queues)
    }

    /// Drop all messages from one named queue
    pub async fn purge_queue(&self, name: &str) -> RestClientResult<()> {
        let path = format!("/api/queues/{}/purge", name);
        self.post_empty(&path).await
    }

    // ── Workers ──

    /// Issue a lifecycle command to one named worker
    pub async fn worker_command(
        &self,
        name: &str,
        command: WorkerCommand,
    ) -> RestClientResult<()> {
        let path = format!("/api/workers/{}/{}", name, command.as_str());
        self.post_empty(&path).await
    }

    // ── Workflows ──

    /// List workflow templates (summary form, no step graphs)
    pub async fn get_workflows(&self) -> RestClientResult<Vec<WorkflowDef>> {
        let response: WorkflowListResponse = self.get("/api/workflows").await?;
        Ok(response.workflows)
    }

    /// Get one workflow template including its step graph
    pub async fn get_workflow(&self, name: &str) -> RestClientResult<WorkflowDef> {
        let path = format!("/api/workflows/{}", name);
        let response: WorkflowResponse = self.get(&path).await?;
        Ok(response.workflow)
    }

    /// List executions of one template, optionally filtered by status
    pub async fn get_workflow_instances(
        &self,
        name: &str,
        status: Option<InstanceStatus>,
        limit: u32,
    ) -> RestClientResult<Vec<WorkflowInstance>> {
        let mut params = vec![format!("limit={}", limit)];
        if let Some(status) = status {
            params.push(format!("status={}", status.as_str()));
        }

        let path = format!("/api/workflows/{}/instances?{}", name, params.join("&"));
        let response: InstanceListResponse = self.get(&path).await?;
        Ok(response.instances)
    }

    /// Get one workflow instance
    pub async fn get_instance(&self, id: &str) -> RestClientResult<WorkflowInstance> {
        let path = format!("/api/instances/{}", id);
        let response: InstanceResponse = self.get(&path).await?;
        Ok(response.instance)
    }

    /// Get the step log of one workflow instance
    pub async fn get_instance_steps(&self, id: &str) -> RestClientResult<Vec<WorkflowStepLog>> {
        let path = format!("/api/instances/{}/steps", id);
        let response: StepLogListResponse = self.get(&path).await?;
        Ok(response.steps)
    }

    /// Retry one workflow instance, optionally resuming from a named step
    pub async fn retry_instance(
        &self,
        id: &str,
        from_step: Option<&str>,
    ) -> RestClientResult<()> {
        let path = format!("/api/instances/{}/retry", id);
        let body = RetryInstanceRequest {
            from_step: from_step.map(str::to_string),
        };
        self.post(&path, &body).await
    }

    /// Get cross-workflow aggregate statistics
    pub async fn get_workflow_stats(&self) -> RestClientResult<GlobalWorkflowStats> {
        let response: WorkflowStatsResponse = self.get("/api/workflows/stats").await?;
        Ok(response.stats)
    }

    // Private helper methods

    async fn get<T: DeserializeOwned>(&self, path: &str) -> RestClientResult<T> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        self.handle_response(response).await
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> RestClientResult<()> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        self.handle_empty_response(response).await
    }

    async fn post_empty(&self, path: &str) -> RestClientResult<()> {
        let response = self.send(Method::POST, path, None::<&()>).await?;
        self.handle_empty_response(response).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> RestClientResult<Response> {
        let url = self.base_url.join(path)?;
        debug!(%method, %url, "issuing request");

        let mut request = self
            .http_client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");

        // Auth headers are merged after the default, so a configured
        // header wins on a name collision.
        let auth_headers =
            self.auth.headers().map_err(|e| RestClientError::Auth(e.to_string()))?;
        request = request.headers(auth_headers);

        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> RestClientResult<T> {
        if response.status().is_success() {
            let text = response.text().await?;
            serde_json::from_str(&text).map_err(RestClientError::from)
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    async fn handle_empty_response(&self, response: Response) -> RestClientResult<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    /// Build the uniform failure for a non-success response: the server's
    /// `error` field when the body parses, otherwise `HTTP <status>`.
    async fn error_from_response(response: Response) -> RestClientError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(ErrorBody { error: Some(message) }) => message,
            _ => format!("HTTP {}", status.as_u16()),
        };

        warn!(%status, %message, "request failed");
        RestClientError::Api { status, message }
    }
}
