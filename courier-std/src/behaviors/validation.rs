//! Validation Behavior - rejects invalid requests before they reach the handler.

use courier_core::{
    BehaviorError, BoxError, CancellationToken, Next, PipelineBehavior, Request, ValidationError,
};
use std::any::type_name;

/// Requests that can check their own invariants.
pub trait Validate {
    /// Return every violation found, or `Ok(())` if the request is valid.
    fn validate(&self) -> Result<(), Vec<String>>;
}

/// A behavior that short-circuits invalid requests.
///
/// Fails with [`BehaviorError::Validation`] without running the rest of the
/// chain when [`Validate::validate`] reports violations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationBehavior;

impl<R: Request + Validate> PipelineBehavior<R> for ValidationBehavior {
    async fn handle(
        &self,
        request: &R,
        _cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> Result<R::Response, BoxError> {
        if let Err(violations) = request.validate() {
            tracing::debug!(
                request = type_name::<R>(),
                violations = violations.len(),
                "request rejected"
            );
            return Err(BehaviorError::from(ValidationError::new::<R>(violations)).into());
        }
        next.run().await
    }
}
