//! Logging Behavior - Observability for request handling.

use courier_core::{BoxError, CancellationToken, Next, PipelineBehavior, Request};
use std::{any::type_name, time::Instant};

/// A behavior that logs each request, its duration and its outcome.
///
/// Entry and success are logged at `debug`, failures at `warn`. The request
/// itself is never formatted, so it needs no `Debug` impl.
///
/// # Example
///
/// ```rust,ignore
/// use courier::{Registry, behaviors::LoggingBehavior};
///
/// let registry = Registry::builder()
///     .handler::<CreateUser>(CreateUserHandler)
///     .behavior::<CreateUser>(LoggingBehavior::named("users"))
///     .build()?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingBehavior {
    name: &'static str,
}

impl LoggingBehavior {
    /// Create a new `LoggingBehavior` with a default name.
    pub fn new() -> Self {
        Self { name: "request" }
    }

    /// Create a new `LoggingBehavior` with a custom name.
    ///
    /// The name is used in log messages to identify the pipeline.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name used in log messages.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Request> PipelineBehavior<R> for LoggingBehavior {
    async fn handle(
        &self,
        _request: &R,
        _cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> Result<R::Response, BoxError> {
        let request = type_name::<R>();
        tracing::debug!(name = %self.name, request, "handling request");

        let started = Instant::now();
        let result = next.run().await;
        let elapsed = started.elapsed();

        match &result {
            Ok(_) => tracing::debug!(name = %self.name, request, ?elapsed, "request handled"),
            Err(err) => {
                tracing::warn!(name = %self.name, request, ?elapsed, error = %err, "request failed")
            }
        }
        result
    }
}
