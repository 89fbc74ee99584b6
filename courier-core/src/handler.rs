//! # Handlers
//!
//! The terminal endpoints of the mediator.
//!
//! - [`RequestHandler`] - exactly one per request type, produces the response
//! - [`NotificationHandler`] - any number per notification type, side effects only
//!
//! Both traits use native `async fn` for static dispatch. The registry stores
//! their object-safe forms, [`DynRequestHandler`] and
//! [`DynNotificationHandler`], which every implementor gets for free.

use crate::{
    error::BoxError,
    message::{Notification, Request},
};
use futures::future::BoxFuture;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Handles one request type and produces its response.
///
/// The cancellation token is the one the caller passed to `send`; honoring
/// it is up to the handler.
///
/// # Example
///
/// ```rust,ignore
/// struct GetUserHandler { db: Db }
///
/// impl RequestHandler<GetUser> for GetUserHandler {
///     async fn handle(&self, req: &GetUser, _cancel: &CancellationToken) -> Result<Option<User>, BoxError> {
///         Ok(self.db.find(req.id).await?)
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle requests of type `{R}`",
    label = "missing `RequestHandler<{R}>` implementation",
    note = "Request handlers must implement `handle` for the request type `{R}`."
)]
pub trait RequestHandler<R: Request>: Send + Sync + 'static {
    /// Produce the response for `request`.
    fn handle(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<R::Response, BoxError>> + Send;
}

/// Object-safe version of [`RequestHandler`].
pub trait DynRequestHandler<R: Request>: Send + Sync + 'static {
    /// Produce the response for `request` (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<R::Response, BoxError>>;
}

impl<R: Request, H: RequestHandler<R>> DynRequestHandler<R> for H {
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<R::Response, BoxError>> {
        Box::pin(self.handle(request, cancel))
    }
}

/// Reacts to one notification type.
///
/// Handlers of the same notification run concurrently and must not depend on
/// each other's effects or order.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle notifications of type `{N}`",
    label = "missing `NotificationHandler<{N}>` implementation",
    note = "Notification handlers must implement `handle` for the notification type `{N}`."
)]
pub trait NotificationHandler<N: Notification>: Send + Sync + 'static {
    /// React to `notification`.
    fn handle(
        &self,
        notification: &N,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;

    /// Name used when reporting this handler's failures.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Object-safe version of [`NotificationHandler`].
pub trait DynNotificationHandler<N: Notification>: Send + Sync + 'static {
    /// React to `notification` (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        notification: &'a N,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), BoxError>>;

    /// Name used when reporting this handler's failures.
    fn handler_name(&self) -> &'static str;
}

impl<N: Notification, H: NotificationHandler<N>> DynNotificationHandler<N> for H {
    fn handle_dyn<'a>(
        &'a self,
        notification: &'a N,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(self.handle(notification, cancel))
    }

    fn handler_name(&self) -> &'static str {
        <H as NotificationHandler<N>>::name(self)
    }
}
