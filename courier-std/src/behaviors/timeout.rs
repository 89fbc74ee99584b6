//! Timeout Behavior - time-limited request handling.
//!
//! **Note**: This module requires the `tokio` runtime (feature `timeout`).

use courier_core::{BehaviorError, BoxError, CancellationToken, Next, PipelineBehavior, Request};
use std::{any::type_name, time::Duration};

/// A behavior that fails the request if the rest of the chain is too slow.
///
/// When the duration elapses the inner future is dropped and the request
/// fails with [`BehaviorError::Timeout`].
///
/// # Example
///
/// ```rust,ignore
/// use courier::behaviors::TimeoutBehavior;
///
/// let registry = Registry::builder()
///     .handler::<Report>(ReportHandler)
///     .behavior::<Report>(TimeoutBehavior::secs(5))
///     .build()?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimeoutBehavior {
    duration: Duration,
}

impl TimeoutBehavior {
    /// Create a new `TimeoutBehavior`.
    pub const fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Create a `TimeoutBehavior` with the timeout specified in seconds.
    pub const fn secs(seconds: u64) -> Self {
        Self::new(Duration::from_secs(seconds))
    }

    /// Create a `TimeoutBehavior` with the timeout specified in milliseconds.
    pub const fn millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Get the configured timeout duration.
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

impl<R: Request> PipelineBehavior<R> for TimeoutBehavior {
    async fn handle(
        &self,
        _request: &R,
        _cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> Result<R::Response, BoxError> {
        match tokio::time::timeout(self.duration, next.run()).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    request = type_name::<R>(),
                    timeout = ?self.duration,
                    "request timed out"
                );
                Err(BehaviorError::Timeout(self.duration).into())
            }
        }
    }
}
