//! Caller-facing dispatch traits.
//!
//! Application code that only needs to send requests or publish
//! notifications can be generic over [`Sender`] or [`Publisher`] instead of
//! depending on a concrete mediator.

use crate::{
    error::{PublishError, SendError},
    message::{Notification, Request},
};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Something that routes a request to its single handler.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot send requests",
    label = "missing `Sender` implementation",
    note = "Implement `Sender` to route requests to their handlers."
)]
pub trait Sender: Send + Sync {
    /// Send `request`, threading `cancel` through every behavior and the handler.
    fn send_with<R: Request>(
        &self,
        request: R,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<R::Response, SendError>> + Send;

    /// Send `request` with a token that is never cancelled.
    fn send<R: Request>(
        &self,
        request: R,
    ) -> impl Future<Output = Result<R::Response, SendError>> + Send {
        async move {
            let cancel = CancellationToken::new();
            self.send_with(request, &cancel).await
        }
    }
}

/// Something that broadcasts a notification to all of its handlers.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot publish notifications",
    label = "missing `Publisher` implementation",
    note = "Implement `Publisher` to fan notifications out to their handlers."
)]
pub trait Publisher: Send + Sync {
    /// Publish `notification`, threading `cancel` through every handler.
    fn publish_with<N: Notification>(
        &self,
        notification: N,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), PublishError>> + Send;

    /// Publish `notification` with a token that is never cancelled.
    fn publish<N: Notification>(
        &self,
        notification: N,
    ) -> impl Future<Output = Result<(), PublishError>> + Send {
        async move {
            let cancel = CancellationToken::new();
            self.publish_with(notification, &cancel).await
        }
    }
}
