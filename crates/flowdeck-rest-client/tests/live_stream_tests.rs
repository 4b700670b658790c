//! End-to-end tests for the live event stream over a mock SSE backend.

use std::time::Duration;

use flowdeck_client_api::OpState;
use flowdeck_rest_client::{AuthConfig, RestClient};
use futures::StreamExt;
use tokio::time::timeout;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RECORD_FRAME: &str = concat!(
    "data: {\"id\":1,\"event_id\":\"evt-1\",\"event_type\":\"order.created\",",
    "\"direction\":\"inbound\",\"process_name\":\"ingestor\",\"source\":null,",
    "\"payload_summary\":null,\"created_at\":\"2025-06-01T12:00:00Z\"}\n\n",
);

fn sse_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "text/event-stream")
}

#[tokio::test]
async fn stream_yields_records_and_skips_heartbeats() {
    let server = MockServer::start().await;
    let body = format!("data: heartbeat-not-json\n\n{}", RECORD_FRAME);
    Mock::given(method("GET"))
        .and(path("/api/events/live"))
        .respond_with(sse_response(body))
        .mount(&server)
        .await;

    let client = RestClient::from_url(&server.uri(), AuthConfig::default()).unwrap();
    let state = OpState::new();
    let mut stream = client.stream_events(state.clone()).unwrap();

    let first = timeout(Duration::from_secs(5), stream.next())
        .await
        .expect("stream did not produce a record in time");

    let record = first.expect("stream ended before yielding the record");
    assert_eq!(record.id, 1);
    assert_eq!(record.event_id, "evt-1");
    assert_eq!(record.process_name, "ingestor");

    // The heartbeat produced no item; after the server closes, the stream
    // terminates instead of reconnecting.
    let rest = timeout(Duration::from_secs(5), stream.next())
        .await
        .expect("stream did not terminate in time");
    assert!(rest.is_none());
}

#[tokio::test]
async fn closed_stream_terminates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events/live"))
        .respond_with(sse_response(RECORD_FRAME.to_string()))
        .mount(&server)
        .await;

    let client = RestClient::from_url(&server.uri(), AuthConfig::default()).unwrap();
    let state = OpState::new();
    let mut stream = client.stream_events(state).unwrap();

    stream.close();

    let end = timeout(Duration::from_secs(5), async {
        // Drain anything already buffered; the stream must then end.
        while let Some(_record) = stream.next().await {}
    })
    .await;
    assert!(end.is_ok(), "closed stream kept yielding");
}
