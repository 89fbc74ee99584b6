//! Assembly of the behavior chain around a handler.
//!
//! [`build`] turns a handler, the behaviors registered for its request type
//! and one request into a single [`Next`] that runs everything. The chain is
//! built per call and borrows everything it touches, so nothing outlives the
//! `send` that created it.

use crate::{
    behavior::{DynBehavior, Next},
    handler::DynRequestHandler,
    message::Request,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Build the onion of `behaviors` around `handler` for one request.
///
/// Behaviors are wrapped from last to first, so `behaviors[0]` ends up
/// outermost: it runs first on the way in and last on the way out. With no
/// behaviors the result is the bare handler call.
pub fn build<'a, R: Request>(
    handler: &'a dyn DynRequestHandler<R>,
    behaviors: &'a [Arc<dyn DynBehavior<R>>],
    request: &'a R,
    cancel: &'a CancellationToken,
) -> Next<'a, R> {
    let terminal = Next::new(move || handler.handle_dyn(request, cancel));

    behaviors.iter().rev().fold(terminal, |next, behavior| {
        Next::new(move || behavior.handle_dyn(request, cancel, next))
    })
}
