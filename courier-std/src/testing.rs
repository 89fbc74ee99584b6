//! Testing utilities for Courier.
//!
//! This module provides small instrumented handlers and behaviors that make
//! ordering, short-circuit and fan-out properties easy to assert.
//!
//! # Features
//!
//! - [`CallLog`]: A shared, append-only log of labels
//! - [`RecordingBehavior`]: A behavior that logs around the rest of the chain
//! - [`ShortCircuitBehavior`]: A behavior that answers without running the chain
//! - [`RecordingNotificationHandler`]: A notification handler that records what it receives
//! - [`FailingNotificationHandler`]: A notification handler that always fails

use courier_core::{
    BoxError, CancellationToken, Next, Notification, NotificationHandler, PipelineBehavior,
    Request,
};
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Call Log
// ============================================================================

/// A shared log that instrumented components append to.
///
/// Clones share the same log.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
///
/// let registry = Registry::builder()
///     .behavior::<Ping>(RecordingBehavior::new("outer", log.clone()))
///     .behavior::<Ping>(RecordingBehavior::new("inner", log.clone()))
///     .handler::<Ping>(PingHandler)
///     .build()?;
///
/// mediator.send(Ping).await?;
/// assert_eq!(log.entries(), ["outer:before", "inner:before", "inner:after", "outer:after"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.into());
    }

    /// A snapshot of all entries so far.
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

// ============================================================================
// Behaviors
// ============================================================================

/// A behavior that logs `"{label}:before"` and `"{label}:after"` around the
/// rest of the chain.
///
/// The `after` entry is written whether the chain succeeded or failed.
#[derive(Debug, Clone)]
pub struct RecordingBehavior {
    label: &'static str,
    log: CallLog,
}

impl RecordingBehavior {
    /// Create a recording behavior writing to `log`.
    pub fn new(label: &'static str, log: CallLog) -> Self {
        Self { label, log }
    }
}

impl<R: Request> PipelineBehavior<R> for RecordingBehavior {
    async fn handle(
        &self,
        _request: &R,
        _cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> Result<R::Response, BoxError> {
        self.log.push(format!("{}:before", self.label));
        let result = next.run().await;
        self.log.push(format!("{}:after", self.label));
        result
    }
}

/// A behavior that answers with a fixed response and never runs the rest of
/// the chain.
#[derive(Debug, Clone)]
pub struct ShortCircuitBehavior<T> {
    response: T,
    calls: Arc<AtomicUsize>,
}

impl<T: Clone> ShortCircuitBehavior<T> {
    /// Answer every request with `response`.
    pub fn new(response: T) -> Self {
        Self {
            response,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many requests this behavior answered.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<R, T> PipelineBehavior<R> for ShortCircuitBehavior<T>
where
    R: Request<Response = T>,
    T: Clone + Send + Sync + 'static,
{
    async fn handle(
        &self,
        _request: &R,
        _cancel: &CancellationToken,
        _next: Next<'_, R>,
    ) -> Result<R::Response, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

// ============================================================================
// Notification Handlers
// ============================================================================

/// A notification handler that records every notification it receives.
///
/// Clones share the same recording.
pub struct RecordingNotificationHandler<N> {
    received: Arc<Mutex<Vec<N>>>,
}

impl<N: Clone> RecordingNotificationHandler<N> {
    /// Create a new recording handler.
    pub fn new() -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded notifications.
    pub fn received(&self) -> Vec<N> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get the number of recorded notifications.
    pub fn count(&self) -> usize {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<N: Clone> Default for RecordingNotificationHandler<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Clone for RecordingNotificationHandler<N> {
    fn clone(&self) -> Self {
        Self {
            received: self.received.clone(),
        }
    }
}

impl<N: Notification + Clone> NotificationHandler<N> for RecordingNotificationHandler<N> {
    async fn handle(&self, notification: &N, _cancel: &CancellationToken) -> Result<(), BoxError> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
        Ok(())
    }
}

/// A notification handler that counts its invocations and always fails.
#[derive(Debug, Clone)]
pub struct FailingNotificationHandler {
    message: &'static str,
    calls: Arc<AtomicUsize>,
}

impl FailingNotificationHandler {
    /// Fail every notification with `message`.
    pub fn new(message: &'static str) -> Self {
        Self {
            message,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many notifications this handler received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<N: Notification> NotificationHandler<N> for FailingNotificationHandler {
    async fn handle(&self, _notification: &N, _cancel: &CancellationToken) -> Result<(), BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.message.into())
    }
}
