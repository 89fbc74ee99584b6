//! Message contracts: requests, notifications and the [`Unit`] response.

use std::fmt;

/// A marker trait for anything that travels through the mediator.
///
/// Messages must be `Send + Sync + 'static` so they can be lent to handlers
/// and behaviors across `.await` points. Every such type is a message.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "All messages in Courier must be thread-safe and static."
)]
pub trait Message: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Message for T {}

/// A message routed to exactly one handler, producing one response.
///
/// The response type is fixed by the request type, so the pair
/// `(Self, Self::Response)` is identified by `Self` alone.
///
/// # Example
///
/// ```rust,ignore
/// struct GetUser { id: u64 }
///
/// impl Request for GetUser {
///     type Response = Option<User>;
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a Request",
    label = "missing `Request` implementation",
    note = "Implement `Request` (or derive it) and name the `Response` type."
)]
pub trait Request: Message {
    /// The value produced by the handler of this request.
    type Response: Send + 'static;
}

/// A message broadcast to zero or more handlers, with no response.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a Notification",
    label = "missing `Notification` implementation",
    note = "Implement `Notification` (or derive it) to publish this type."
)]
pub trait Notification: Message {}

/// The response of requests that produce nothing meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Unit;

impl Unit {
    /// The single value of this type.
    pub const VALUE: Unit = Unit;
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("()")
    }
}

impl From<()> for Unit {
    fn from((): ()) -> Self {
        Unit
    }
}

impl From<Unit> for () {
    fn from(_: Unit) -> Self {}
}

#[cfg(test)]
mod tests {
    use super::Unit;

    #[test]
    fn unit_is_a_value_equal_singleton() {
        assert_eq!(Unit, Unit::default());
        assert_eq!(Unit::VALUE, Unit::from(()));
        assert_eq!(Unit.to_string(), "()");
    }
}
