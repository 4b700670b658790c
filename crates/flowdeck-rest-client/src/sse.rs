//! Live event stream over Server-Sent Events

use std::pin::Pin;
use std::task::{Context, Poll};

use eventsource_client as es;
use es::Client as _;
use futures::stream::Stream;
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::warn;
use url::Url;

use crate::auth::AuthConfig;
use crate::error::{RestClientError, RestClientResult};
use flowdeck_api_contract::EventLog;
use flowdeck_client_api::OpState;

/// Message recorded into the shared error slot when the connection fails
pub const STREAM_DISCONNECTED: &str = "Event stream disconnected";

/// Outcome of decoding one inbound frame.
///
/// The backend interleaves non-JSON heartbeats with `EventLog` records on
/// the same channel; heartbeats decode to `Ignored` and are not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Record(EventLog),
    Ignored,
}

/// Decode one frame payload from the live stream
pub fn decode_frame(data: &str) -> Decoded {
    match serde_json::from_str::<EventLog>(data) {
        Ok(record) => Decoded::Record(record),
        Err(_) => Decoded::Ignored,
    }
}

/// Caller-owned handle on the live event stream.
///
/// Yields decoded records in transport order, with no deduplication or
/// reordering by the embedded event id. The stream ends when the caller
/// closes the handle or when the connection fails; a connection failure is
/// also reported into the `OpState` given to `connect` and is terminal for
/// the handle.
pub struct LiveEventStream {
    receiver: mpsc::Receiver<EventLog>,
    task: tokio::task::JoinHandle<()>,
}

impl LiveEventStream {
    /// Connect to `GET /api/events/live` and start decoding frames
    pub(crate) fn connect(
        base_url: &Url,
        auth: &AuthConfig,
        state: OpState,
    ) -> RestClientResult<Self> {
        let url = base_url.join("/api/events/live")?;

        let mut builder = es::ClientBuilder::for_url(url.as_str())
            .map_err(|e| RestClientError::Sse(e.to_string()))?;

        let auth_headers = auth.headers().map_err(|e| RestClientError::Auth(e.to_string()))?;
        for (name, value) in auth_headers.iter() {
            let value = value.to_str().map_err(|e| RestClientError::Auth(e.to_string()))?;
            builder = builder
                .header(name.as_str(), value)
                .map_err(|e| RestClientError::Sse(e.to_string()))?;
        }

        // No reconnect state exists: a dropped connection is terminal for
        // this handle.
        let client = builder
            .reconnect(es::ReconnectOptions::reconnect(false).build())
            .build();

        let (sender, receiver) = mpsc::channel(64);
        let task = tokio::spawn(async move {
            let mut frames = client.stream();
            while let Some(frame) = frames.next().await {
                match frame {
                    Ok(es::SSE::Event(event)) => match decode_frame(&event.data) {
                        Decoded::Record(record) => {
                            if sender.send(record).await.is_err() {
                                // Receiver half dropped; caller is gone.
                                break;
                            }
                        }
                        Decoded::Ignored => {}
                    },
                    // Comments and connection notices carry no records.
                    Ok(_) => {}
                    Err(err) => {
                        warn!("live event stream disconnected: {err}");
                        state.record_error(STREAM_DISCONNECTED);
                        break;
                    }
                }
            }
        });

        Ok(Self { receiver, task })
    }

    /// Close the stream, aborting the transport task
    pub fn close(&self) {
        self.task.abort();
    }
}

impl Stream for LiveEventStream {
    type Item = EventLog;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

impl Drop for LiveEventStream {
    fn drop(&mut self) {
        self.task.abort();
    }
}
