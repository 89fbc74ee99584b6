//! Standard pipeline behaviors.
//!
//! Every behavior here is generic over the request type, so one value can be
//! registered for as many request types as needed (it is cheap to clone or
//! share through `behavior_shared`).

pub mod cache;
pub mod cancellation;
pub mod instrument;
pub mod logging;
#[cfg(feature = "timeout")]
pub mod timeout;
pub mod validation;

pub use cache::CachingBehavior;
pub use cancellation::CancellationBehavior;
pub use instrument::TracingBehavior;
pub use logging::LoggingBehavior;
#[cfg(feature = "timeout")]
pub use timeout::TimeoutBehavior;
pub use validation::{Validate, ValidationBehavior};
