//! Tracing Behavior - runs the rest of the chain inside a span.

use courier_core::{BoxError, CancellationToken, Next, PipelineBehavior, Request};
use std::any::type_name;
use tracing::Instrument;

/// A behavior that instruments the rest of the chain with an `info` span.
///
/// The span is named `request` and records the request type and the
/// behavior's label, so events emitted by inner behaviors and the handler
/// are attributed to the request that caused them.
#[derive(Debug, Clone, Copy)]
pub struct TracingBehavior {
    name: &'static str,
}

impl TracingBehavior {
    /// Create a new `TracingBehavior` with a default label.
    pub const fn new() -> Self {
        Self { name: "request" }
    }

    /// Create a new `TracingBehavior` with a custom label.
    pub const fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for TracingBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Request> PipelineBehavior<R> for TracingBehavior {
    async fn handle(
        &self,
        _request: &R,
        _cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> Result<R::Response, BoxError> {
        let span = tracing::info_span!(
            "request",
            name = %self.name,
            request = type_name::<R>()
        );
        next.run().instrument(span).await
    }
}
