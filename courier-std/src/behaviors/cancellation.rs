//! Cancellation Behavior - stops waiting once the caller cancels.

use courier_core::{BehaviorError, BoxError, CancellationToken, Next, PipelineBehavior, Request};
use futures::future::{Either, select};
use std::{any::type_name, pin::pin};

/// A behavior that honors the cancellation token on behalf of the chain.
///
/// The mediator itself never looks at the token. Registering this behavior
/// makes a request fail with [`BehaviorError::Cancelled`] if the token is
/// already cancelled, without running the rest of the chain, or as soon as
/// it fires while the rest of the chain is still running. In the latter case
/// the inner future is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancellationBehavior;

impl<R: Request> PipelineBehavior<R> for CancellationBehavior {
    async fn handle(
        &self,
        _request: &R,
        cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> Result<R::Response, BoxError> {
        if cancel.is_cancelled() {
            tracing::debug!(request = type_name::<R>(), "skipping cancelled request");
            return Err(BehaviorError::Cancelled.into());
        }

        let cancelled = pin!(cancel.cancelled());
        match select(cancelled, next.run()).await {
            Either::Left(((), _)) => {
                tracing::debug!(request = type_name::<R>(), "request cancelled in flight");
                Err(BehaviorError::Cancelled.into())
            }
            Either::Right((result, _)) => result,
        }
    }
}
