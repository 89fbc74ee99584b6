//! Error types for Courier.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`CourierError`] - Top-level error type for all Courier operations
//! - [`SendError`] - Errors from sending a request
//! - [`PublishError`] - Aggregate error from publishing a notification
//! - [`BehaviorError`] - Errors raised by the standard pipeline behaviors
//! - [`RegistryError`] - Errors from building a registry

use std::{error::Error as StdError, fmt, time::Duration};
use thiserror::Error;

/// A boxed error type for dynamic error handling.
///
/// Handlers and behaviors report failures in this currency; the mediator
/// hands them back to the caller without translating them.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Top-level error type for all Courier operations.
#[derive(Error, Debug)]
pub enum CourierError {
    /// Sending a request failed.
    #[error(transparent)]
    Send(#[from] SendError),

    /// Publishing a notification failed.
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// Building a registry failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors that can occur when sending a request.
#[derive(Error, Debug)]
pub enum SendError {
    /// No handler is registered for the request type.
    #[error("no handler registered for request `{request}` (response `{response}`)")]
    HandlerNotFound {
        /// Type name of the request.
        request: &'static str,
        /// Type name of the expected response.
        response: &'static str,
    },

    /// The handler or one of the behaviors failed. The error is the one they
    /// returned, untouched.
    #[error(transparent)]
    Handler(BoxError),
}

impl SendError {
    /// Routing failure for the request type `R`.
    pub fn handler_not_found<R: crate::Request>() -> Self {
        SendError::HandlerNotFound {
            request: std::any::type_name::<R>(),
            response: std::any::type_name::<R::Response>(),
        }
    }

    /// Returns `true` if no handler was registered for the request.
    pub fn is_handler_not_found(&self) -> bool {
        matches!(self, SendError::HandlerNotFound { .. })
    }

    /// The error raised by the handler or a behavior, if that is what failed.
    pub fn handler_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            SendError::Handler(err) => Some(err.as_ref()),
            SendError::HandlerNotFound { .. } => None,
        }
    }

    /// Consumes the error, returning the handler's or behavior's error.
    pub fn into_handler_error(self) -> Option<BoxError> {
        match self {
            SendError::Handler(err) => Some(err),
            SendError::HandlerNotFound { .. } => None,
        }
    }
}

/// One failed notification handler inside a [`PublishError`].
#[derive(Debug)]
pub struct HandlerFailure {
    /// Diagnostic name of the handler.
    pub handler: &'static str,
    /// The error it returned.
    pub error: BoxError,
}

impl fmt::Display for HandlerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.handler, self.error)
    }
}

/// Aggregate failure of a publish call.
///
/// Every handler runs to completion before this is reported; it carries one
/// [`HandlerFailure`] per handler that failed, in registration order.
#[derive(Debug)]
pub struct PublishError {
    notification: &'static str,
    failures: Vec<HandlerFailure>,
}

impl PublishError {
    /// Create an aggregate error for the given notification type name.
    pub fn new(notification: &'static str, failures: Vec<HandlerFailure>) -> Self {
        Self {
            notification,
            failures,
        }
    }

    /// Type name of the published notification.
    pub fn notification(&self) -> &'static str {
        self.notification
    }

    /// All handler failures.
    pub fn failures(&self) -> &[HandlerFailure] {
        &self.failures
    }

    /// Consumes the error, returning the handler failures.
    pub fn into_failures(self) -> Vec<HandlerFailure> {
        self.failures
    }
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} handler(s) failed for notification `{}`",
            self.failures.len(),
            self.notification
        )?;
        for failure in &self.failures {
            write!(f, "; {failure}")?;
        }
        Ok(())
    }
}

impl StdError for PublishError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.failures
            .first()
            .map(|failure| failure.error.as_ref() as &(dyn StdError + 'static))
    }
}

/// Errors raised by the standard pipeline behaviors.
#[derive(Error, Debug)]
pub enum BehaviorError {
    /// The rest of the chain did not finish in time.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The cancellation signal fired.
    #[error("request was cancelled")]
    Cancelled,

    /// The request failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A request that failed validation, with every violation found.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation failed for `{request}`: {}", .violations.join(", "))]
pub struct ValidationError {
    /// Type name of the rejected request.
    pub request: &'static str,
    /// Human-readable violations.
    pub violations: Vec<String>,
}

impl ValidationError {
    /// Create a validation error for the request type `R`.
    pub fn new<R>(violations: Vec<String>) -> Self {
        Self {
            request: std::any::type_name::<R>(),
            violations,
        }
    }
}

/// Errors that can occur while building a registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// More than one handler was registered for a request type.
    #[error("a handler is already registered for request `{request}`")]
    DuplicateHandler {
        /// Type name of the request.
        request: &'static str,
    },
}
