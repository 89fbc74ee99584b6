//! # courier - In-Process Request/Notification Mediator
//!
//! `courier` decouples the code that asks for something from the code that
//! does it. Callers hand a message to a [`Mediator`]; the mediator finds the
//! right handler by the message's type.
//!
//! - **Send**: a [`Request`] goes to exactly one [`RequestHandler`], wrapped
//!   in the [`PipelineBehavior`]s registered for its type.
//! - **Publish**: a [`Notification`] goes to every [`NotificationHandler`]
//!   registered for its type, concurrently.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier::prelude::*;
//!
//! struct Ping;
//! impl Request for Ping { type Response = &'static str; }
//!
//! struct PingHandler;
//! impl RequestHandler<Ping> for PingHandler {
//!     async fn handle(&self, _: &Ping, _: &CancellationToken) -> Result<&'static str, BoxError> {
//!         Ok("pong")
//!     }
//! }
//!
//! let registry = Registry::builder()
//!     .behavior::<Ping>(LoggingBehavior::new())
//!     .handler::<Ping>(PingHandler)
//!     .build()?;
//!
//! let mediator = Mediator::new(registry);
//! assert_eq!(mediator.send(Ping).await?, "pong");
//! ```
//!
//! ## Features
//!
//! - `macros`: `#[derive(Request)]` and `#[derive(Notification)]`
//! - `timeout`: [`behaviors::TimeoutBehavior`], backed by tokio's timer

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use courier_core::{
    // Errors
    BehaviorError,
    BoxError,
    // Cancellation
    CancellationToken,
    CourierError,
    // Pipeline
    DynBehavior,
    // Handlers
    DynNotificationHandler,
    DynRequestHandler,
    HandlerFailure,
    // Provider
    HandlerProvider,
    // Messages
    Message,
    Next,
    Notification,
    NotificationHandler,
    PipelineBehavior,
    PublishError,
    // Dispatch
    Publisher,
    RegistryError,
    Request,
    RequestHandler,
    SendError,
    Sender,
    Unit,
    ValidationError,
    pipeline,
};

pub use courier_std::{Mediator, Registry, RegistryBuilder};

/// Standard pipeline behaviors.
pub mod behaviors {
    #[cfg(feature = "timeout")]
    pub use courier_std::behaviors::TimeoutBehavior;
    pub use courier_std::behaviors::{
        CachingBehavior, CancellationBehavior, LoggingBehavior, TracingBehavior, Validate,
        ValidationBehavior,
    };
}

/// Closure adapters for handlers.
pub mod adapters {
    pub use courier_std::adapters::{
        FnHandler, FnNotificationHandler, handler_fn, notification_fn,
    };
}

pub use adapters::{handler_fn, notification_fn};

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use courier_std::testing::*;
}

/// Prelude module - common imports for Courier.
///
/// # Usage
///
/// ```rust,ignore
/// use courier::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, CancellationToken, Mediator, Next, Notification, NotificationHandler,
        PipelineBehavior, PublishError, Publisher, Registry, Request, RequestHandler, SendError,
        Sender, Unit,
        behaviors::{LoggingBehavior, TracingBehavior, Validate, ValidationBehavior},
        handler_fn, notification_fn,
    };
}

#[cfg(feature = "macros")]
pub use courier_macros::{Notification, Request};
