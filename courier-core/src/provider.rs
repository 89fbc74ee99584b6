//! Lookup contract between the mediator and wherever handlers live.

use crate::{
    behavior::DynBehavior,
    handler::{DynNotificationHandler, DynRequestHandler},
    message::{Notification, Request},
};
use std::sync::Arc;

/// A source of handlers and behaviors, keyed by message type.
///
/// The mediator only reads from a provider. Implementations are expected to
/// be populated once at startup and be safe to read concurrently afterwards.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid HandlerProvider",
    label = "missing `HandlerProvider` implementation",
    note = "Implement `HandlerProvider` to let a Mediator resolve handlers from this type."
)]
pub trait HandlerProvider: Send + Sync + 'static {
    /// The handler registered for request type `R`, if any.
    fn request_handler<R: Request>(&self) -> Option<&dyn DynRequestHandler<R>>;

    /// Behaviors registered for request type `R`, in registration order.
    fn behaviors<R: Request>(&self) -> &[Arc<dyn DynBehavior<R>>];

    /// Handlers registered for notification type `N`. Order carries no meaning.
    fn notification_handlers<N: Notification>(&self) -> &[Arc<dyn DynNotificationHandler<N>>];
}
