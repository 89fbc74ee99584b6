//! The mediator: send requests, publish notifications.
//!
//! [`Mediator`] is a thin, cloneable handle over a read-only
//! [`HandlerProvider`]. It holds no other state, so any number of tasks can
//! send and publish through clones of the same mediator at once.

use courier_core::{
    CancellationToken, HandlerFailure, HandlerProvider, Notification, PublishError, Publisher,
    Request, SendError, Sender, pipeline,
};
use futures::future::join_all;
use std::{any::type_name, fmt, sync::Arc};

use crate::registry::Registry;

/// Routes requests to their handler and notifications to all of theirs.
///
/// # Send
///
/// [`send`](Self::send) looks up the single handler for the request type,
/// wraps it in the behaviors registered for that type (first registered
/// outermost) and runs the chain. Errors from the handler or a behavior come
/// back as [`SendError::Handler`] carrying the original error.
///
/// # Publish
///
/// [`publish`](Self::publish) runs every handler of the notification type
/// concurrently and returns once all of them have finished. Failures are
/// collected into one [`PublishError`]; no handler is cut short because a
/// sibling failed.
///
/// # Example
///
/// ```rust,ignore
/// let mediator = Mediator::new(registry);
///
/// let user = mediator.send(CreateUser { name: "ada".into() }).await?;
/// mediator.publish(UserCreated { id: user.id }).await?;
/// ```
pub struct Mediator<P = Registry> {
    provider: Arc<P>,
}

impl<P: HandlerProvider> Mediator<P> {
    /// Create a mediator over `provider`.
    pub fn new(provider: P) -> Self {
        Self::from_shared(Arc::new(provider))
    }

    /// Create a mediator over an already shared provider.
    pub fn from_shared(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// The provider this mediator resolves handlers from.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Send `request` with a token that is never cancelled.
    pub async fn send<R: Request>(&self, request: R) -> Result<R::Response, SendError> {
        let cancel = CancellationToken::new();
        self.send_with(request, &cancel).await
    }

    /// Send `request`, passing `cancel` unchanged to every behavior and the
    /// handler.
    ///
    /// The mediator never checks the token itself.
    pub async fn send_with<R: Request>(
        &self,
        request: R,
        cancel: &CancellationToken,
    ) -> Result<R::Response, SendError> {
        let Some(handler) = self.provider.request_handler::<R>() else {
            tracing::debug!(request = type_name::<R>(), "no handler registered");
            return Err(SendError::handler_not_found::<R>());
        };
        let behaviors = self.provider.behaviors::<R>();

        tracing::debug!(
            request = type_name::<R>(),
            behaviors = behaviors.len(),
            "sending request"
        );

        pipeline::build(handler, behaviors, &request, cancel)
            .run()
            .await
            .map_err(SendError::Handler)
    }

    /// Publish `notification` with a token that is never cancelled.
    pub async fn publish<N: Notification>(&self, notification: N) -> Result<(), PublishError> {
        let cancel = CancellationToken::new();
        self.publish_with(notification, &cancel).await
    }

    /// Publish `notification` to every registered handler and wait for all
    /// of them.
    ///
    /// Having no handlers is not an error.
    pub async fn publish_with<N: Notification>(
        &self,
        notification: N,
        cancel: &CancellationToken,
    ) -> Result<(), PublishError> {
        let handlers = self.provider.notification_handlers::<N>();
        if handlers.is_empty() {
            tracing::debug!(notification = type_name::<N>(), "no subscribers");
            return Ok(());
        }

        tracing::debug!(
            notification = type_name::<N>(),
            handlers = handlers.len(),
            "publishing notification"
        );

        let results = join_all(
            handlers
                .iter()
                .map(|handler| handler.handle_dyn(&notification, cancel)),
        )
        .await;

        let failures: Vec<HandlerFailure> = handlers
            .iter()
            .zip(results)
            .filter_map(|(handler, result)| {
                result.err().map(|error| HandlerFailure {
                    handler: handler.handler_name(),
                    error,
                })
            })
            .collect();

        if failures.is_empty() {
            return Ok(());
        }

        tracing::warn!(
            notification = type_name::<N>(),
            failed = failures.len(),
            handlers = handlers.len(),
            "notification handlers failed"
        );
        Err(PublishError::new(type_name::<N>(), failures))
    }
}

impl<P> Clone for Mediator<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for Mediator<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mediator")
            .field("provider", &self.provider)
            .finish()
    }
}

impl<P: HandlerProvider> Sender for Mediator<P> {
    async fn send_with<R: Request>(
        &self,
        request: R,
        cancel: &CancellationToken,
    ) -> Result<R::Response, SendError> {
        Mediator::send_with(self, request, cancel).await
    }
}

impl<P: HandlerProvider> Publisher for Mediator<P> {
    async fn publish_with<N: Notification>(
        &self,
        notification: N,
        cancel: &CancellationToken,
    ) -> Result<(), PublishError> {
        Mediator::publish_with(self, notification, cancel).await
    }
}
