//! Shared loading/error state for dashboard operations

use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Slots {
    busy: bool,
    last_error: Option<String>,
}

/// Busy flag and last-error slot shared between a view and the operations
/// it issues.
///
/// `run` wraps an asynchronous unit of work: the busy flag is raised and
/// the error slot cleared before the future is polled, and the busy flag is
/// lowered again on both outcomes. A failure is captured as its display
/// string and converted into `None` rather than propagated.
///
/// Cloning shares the underlying slots. Overlapping calls through one
/// shared handle interleave last-writer-wins on the two fields; views that
/// need overlap to read coherently should hold one `OpState` per logical
/// operation instead of one per screen.
#[derive(Debug, Clone, Default)]
pub struct OpState {
    slots: Arc<Mutex<Slots>>,
}

impl OpState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run an operation, tracking busy/error state around it.
    ///
    /// Returns the operation's value on success and `None` on failure, with
    /// the failure's message left in the error slot.
    pub async fn run<T, E, F>(&self, operation: F) -> Option<T>
    where
        E: Display,
        F: Future<Output = Result<T, E>>,
    {
        {
            let mut slots = self.slots.lock().unwrap();
            slots.busy = true;
            slots.last_error = None;
        }

        let outcome = operation.await;

        let mut slots = self.slots.lock().unwrap();
        slots.busy = false;
        match outcome {
            Ok(value) => Some(value),
            Err(err) => {
                slots.last_error = Some(err.to_string());
                None
            }
        }
    }

    /// Whether an operation wrapped by `run` is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.slots.lock().unwrap().busy
    }

    /// Message of the most recent failure, if any.
    pub fn last_error(&self) -> Option<String> {
        self.slots.lock().unwrap().last_error.clone()
    }

    /// Record a failure that happened outside a `run` call, such as a live
    /// stream disconnecting.
    pub fn record_error(&self, message: impl Into<String>) {
        self.slots.lock().unwrap().last_error = Some(message.into());
    }

    /// Clear the error slot.
    pub fn clear_error(&self) {
        self.slots.lock().unwrap().last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_returns_value_and_clears_busy_on_success() {
        let state = OpState::new();
        let probe = state.clone();

        let out = state
            .run(async move {
                assert!(probe.is_busy());
                Ok::<_, String>(7)
            })
            .await;

        assert_eq!(out, Some(7));
        assert!(!state.is_busy());
        assert_eq!(state.last_error(), None);
    }

    #[tokio::test]
    async fn run_captures_error_and_returns_none_on_failure() {
        let state = OpState::new();

        let out: Option<()> = state.run(async { Err("boom".to_string()) }).await;

        assert_eq!(out, None);
        assert!(!state.is_busy());
        assert_eq!(state.last_error().as_deref(), Some("boom"));
    }

    #[tokio::test]
    async fn run_clears_previous_error_before_invocation() {
        let state = OpState::new();

        let _: Option<()> = state.run(async { Err("first".to_string()) }).await;
        assert_eq!(state.last_error().as_deref(), Some("first"));

        let probe = state.clone();
        let out = state
            .run(async move {
                assert_eq!(probe.last_error(), None);
                Ok::<_, String>("fine")
            })
            .await;

        assert_eq!(out, Some("fine"));
        assert_eq!(state.last_error(), None);
    }

    #[tokio::test]
    async fn record_error_is_visible_until_cleared() {
        let state = OpState::new();

        state.record_error("Event stream disconnected");
        assert_eq!(
            state.last_error().as_deref(),
            Some("Event stream disconnected")
        );

        state.clear_error();
        assert_eq!(state.last_error(), None);
    }
}
