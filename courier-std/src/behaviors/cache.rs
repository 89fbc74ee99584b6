//! Caching Behavior - serves repeated requests from memory.

use courier_core::{BoxError, CancellationToken, Next, PipelineBehavior, Request};
use std::{
    any::type_name,
    collections::HashMap,
    fmt,
    hash::Hash,
    sync::{Mutex, PoisonError},
};

/// A behavior that remembers successful responses by request value.
///
/// A request equal to one already answered is served from the cache and the
/// rest of the chain does not run. Failures are never cached. The cache is
/// unbounded and lives as long as the behavior; call [`clear`](Self::clear)
/// to drop it.
pub struct CachingBehavior<R: Request> {
    entries: Mutex<HashMap<R, R::Response>>,
}

impl<R> CachingBehavior<R>
where
    R: Request + Hash + Eq + Clone,
    R::Response: Clone,
{
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of cached responses.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every cached response.
    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn get(&self, request: &R) -> Option<R::Response> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(request)
            .cloned()
    }

    fn insert(&self, request: R, response: R::Response) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(request, response);
    }
}

impl<R> Default for CachingBehavior<R>
where
    R: Request + Hash + Eq + Clone,
    R::Response: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Request> fmt::Debug for CachingBehavior<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingBehavior")
            .field("request", &type_name::<R>())
            .finish_non_exhaustive()
    }
}

impl<R> PipelineBehavior<R> for CachingBehavior<R>
where
    R: Request + Hash + Eq + Clone,
    R::Response: Clone,
{
    async fn handle(
        &self,
        request: &R,
        _cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> Result<R::Response, BoxError> {
        if let Some(hit) = self.get(request) {
            tracing::debug!(request = type_name::<R>(), "served from cache");
            return Ok(hit);
        }

        let response = next.run().await?;
        self.insert(request.clone(), response.clone());
        Ok(response)
    }
}
