//! # courier-core
//!
//! Core contracts for the Courier in-process mediator.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that defines requests, notifications, handlers or behaviors without
//! needing the registry and mediator from `courier-std`.
//!
//! # Two Paths
//!
//! ## Send
//!
//! A [`Request`] is routed to exactly one [`RequestHandler`]. On the way it
//! passes through every [`PipelineBehavior`] registered for its type, first
//! registered outermost:
//!
//! ```text
//! send(request) -> B1 -> B2 -> ... -> Bn -> handler
//!                                          |
//! response     <- B1 <- B2 <- ... <- Bn <--+
//! ```
//!
//! The chain is assembled per call by [`pipeline::build`].
//!
//! ## Publish
//!
//! A [`Notification`] is fanned out to every [`NotificationHandler`]
//! registered for its type. Zero handlers is fine. Behaviors do not apply.
//!
//! # Cancellation
//!
//! A single [`CancellationToken`] is threaded unchanged through every
//! behavior and handler. Honoring it is their business.
//!
//! # Error Types
//!
//! - [`CourierError`] - Top-level error type
//! - [`SendError`] - Routing failure or the handler's own error
//! - [`PublishError`] - Aggregate of failed notification handlers

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod behavior;
mod dispatcher;
mod error;
mod handler;
mod message;
pub mod pipeline;
mod provider;

// Re-exports
pub use behavior::{DynBehavior, Next, PipelineBehavior};
pub use dispatcher::{Publisher, Sender};
pub use error::{
    BehaviorError, BoxError, CourierError, HandlerFailure, PublishError, RegistryError, SendError,
    ValidationError,
};
pub use handler::{DynNotificationHandler, DynRequestHandler, NotificationHandler, RequestHandler};
pub use message::{Message, Notification, Request, Unit};
pub use provider::HandlerProvider;
pub use tokio_util::sync::CancellationToken;
