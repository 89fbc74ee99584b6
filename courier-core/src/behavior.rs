//! # Pipeline Behaviors
//!
//! Middleware that wraps the handler of a request. A behavior receives the
//! request, the cancellation token and a [`Next`] continuation standing for
//! the rest of the chain. It may inspect the request, decide whether to run
//! the continuation at all, and inspect or replace the response.
//!
//! Behaviors apply to the send path only; notification handlers are never
//! wrapped.
//!
//! # Ordering
//!
//! Behaviors run in registration order from the outside in: the first
//! registered behavior sees the request first and the response last.

use crate::{error::BoxError, message::Request};
use futures::future::BoxFuture;
use std::{fmt, future::Future};
use tokio_util::sync::CancellationToken;

type Continuation<'a, T> = Box<dyn FnOnce() -> BoxFuture<'a, Result<T, BoxError>> + Send + 'a>;

/// The rest of a request's chain, as seen from one behavior.
///
/// Running it invokes the next behavior, or the handler if this was the
/// innermost behavior. It can be run at most once and only lives for the
/// duration of one `send` call. Dropping it without running it
/// short-circuits the chain.
pub struct Next<'a, R: Request> {
    continuation: Continuation<'a, R::Response>,
}

impl<'a, R: Request> Next<'a, R> {
    /// Wrap a zero-argument continuation.
    pub fn new<F>(continuation: F) -> Self
    where
        F: FnOnce() -> BoxFuture<'a, Result<R::Response, BoxError>> + Send + 'a,
    {
        Self {
            continuation: Box::new(continuation),
        }
    }

    /// Run the rest of the chain.
    pub fn run(self) -> BoxFuture<'a, Result<R::Response, BoxError>> {
        (self.continuation)()
    }
}

impl<R: Request> fmt::Debug for Next<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("request", &std::any::type_name::<R>())
            .finish_non_exhaustive()
    }
}

/// Middleware around the handler of request type `R`.
///
/// # Example
///
/// ```rust,ignore
/// struct Audit;
///
/// impl<R: Request> PipelineBehavior<R> for Audit {
///     async fn handle(&self, req: &R, _cancel: &CancellationToken, next: Next<'_, R>) -> Result<R::Response, BoxError> {
///         let response = next.run().await?;
///         record(std::any::type_name::<R>());
///         Ok(response)
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a pipeline behavior for `{R}`",
    label = "missing `PipelineBehavior<{R}>` implementation",
    note = "Behaviors must implement `handle` for the request type `{R}`."
)]
pub trait PipelineBehavior<R: Request>: Send + Sync + 'static {
    /// Run this behavior around `next`.
    fn handle(
        &self,
        request: &R,
        cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> impl Future<Output = Result<R::Response, BoxError>> + Send;
}

/// Object-safe version of [`PipelineBehavior`].
pub trait DynBehavior<R: Request>: Send + Sync + 'static {
    /// Run this behavior around `next` (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
        next: Next<'a, R>,
    ) -> BoxFuture<'a, Result<R::Response, BoxError>>;
}

impl<R: Request, B: PipelineBehavior<R>> DynBehavior<R> for B {
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
        next: Next<'a, R>,
    ) -> BoxFuture<'a, Result<R::Response, BoxError>> {
        Box::pin(self.handle(request, cancel, next))
    }
}
