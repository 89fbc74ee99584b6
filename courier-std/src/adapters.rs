//! Closure adapters for handlers.
//!
//! Handy for tests and small applications where a dedicated handler type is
//! more ceremony than the logic deserves. The closure receives an owned
//! clone of the message and of the cancellation token.

use courier_core::{
    BoxError, CancellationToken, Notification, NotificationHandler, Request, RequestHandler,
};
use std::{future::Future, marker::PhantomData};

/// A request handler backed by a closure. See [`handler_fn`].
pub struct FnHandler<F, R> {
    f: F,
    _request: PhantomData<fn(R)>,
}

/// Build a request handler from `f`.
///
/// # Example
///
/// ```rust,ignore
/// let registry = Registry::builder()
///     .handler::<Echo>(handler_fn(|req: Echo, _cancel| async move { Ok(req.0) }))
///     .build()?;
/// ```
pub fn handler_fn<R, F, Fut>(f: F) -> FnHandler<F, R>
where
    R: Request + Clone,
    F: Fn(R, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R::Response, BoxError>> + Send,
{
    FnHandler {
        f,
        _request: PhantomData,
    }
}

impl<R, F, Fut> RequestHandler<R> for FnHandler<F, R>
where
    R: Request + Clone,
    F: Fn(R, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R::Response, BoxError>> + Send,
{
    fn handle(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<R::Response, BoxError>> + Send {
        (self.f)(request.clone(), cancel.clone())
    }
}

/// A notification handler backed by a closure. See [`notification_fn`].
pub struct FnNotificationHandler<F, N> {
    f: F,
    name: &'static str,
    _notification: PhantomData<fn(N)>,
}

impl<F, N> FnNotificationHandler<F, N> {
    /// Name this handler in aggregate publish failures.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

/// Build a notification handler from `f`.
pub fn notification_fn<N, F, Fut>(f: F) -> FnNotificationHandler<F, N>
where
    N: Notification + Clone,
    F: Fn(N, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send,
{
    FnNotificationHandler {
        f,
        name: "notification_fn",
        _notification: PhantomData,
    }
}

impl<N, F, Fut> NotificationHandler<N> for FnNotificationHandler<F, N>
where
    N: Notification + Clone,
    F: Fn(N, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send,
{
    fn handle(
        &self,
        notification: &N,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        (self.f)(notification.clone(), cancel.clone())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
