//! # courier-std
//!
//! Standard implementations for the Courier mediator.
//!
//! This crate provides:
//! - **Registry**: [`Registry`], [`RegistryBuilder`] - explicit registration, frozen after build
//! - **Mediator**: [`Mediator`] - `send` and `publish` over any [`HandlerProvider`]
//! - **Standard behaviors**: Logging, Tracing, Validation, Cancellation, Caching, Timeout
//! - **Closure adapters**: [`handler_fn`], [`notification_fn`]
//! - **Testing utilities**: recording behaviors and notification handlers
//!
//! [`HandlerProvider`]: courier_core::HandlerProvider
//! [`handler_fn`]: adapters::handler_fn
//! [`notification_fn`]: adapters::notification_fn

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use courier_core;

// Modules
pub mod adapters;
pub mod behaviors;
pub mod mediator;
pub mod registry;
pub mod testing;

pub use mediator::Mediator;
pub use registry::{Registry, RegistryBuilder};
