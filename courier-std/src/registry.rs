//! Registry of handlers and behaviors.
//!
//! This module provides a builder for registering handlers explicitly and a
//! frozen [`Registry`] that the mediator reads from concurrently.
//!
//! Entries are keyed by the [`TypeId`] of the message. Each slot holds the
//! typed trait-object list for that message, and lookups downcast the slot
//! back to the type the key guarantees.

use courier_core::{
    DynBehavior, DynNotificationHandler, DynRequestHandler, HandlerProvider, Notification,
    NotificationHandler, PipelineBehavior, RegistryError, Request, RequestHandler,
};
use std::{
    any::{Any, TypeId, type_name},
    collections::{HashMap, hash_map::Entry},
    fmt,
    sync::Arc,
};

type Slot = Box<dyn Any + Send + Sync>;

fn lookup<T: 'static>(map: &HashMap<TypeId, Slot>, key: TypeId) -> Option<&T> {
    map.get(&key).and_then(|slot| slot.downcast_ref::<T>())
}

fn append<T: Send + Sync + 'static>(map: &mut HashMap<TypeId, Slot>, key: TypeId, item: T) {
    let slot = map.entry(key).or_insert_with(|| Box::new(Vec::<T>::new()));
    if let Some(list) = slot.downcast_mut::<Vec<T>>() {
        list.push(item);
    }
}

/// An immutable set of handlers and behaviors.
///
/// Built once with [`RegistryBuilder`], then shared read-only by any number
/// of mediators and tasks.
pub struct Registry {
    handlers: HashMap<TypeId, Slot>,
    behaviors: HashMap<TypeId, Slot>,
    notification_handlers: HashMap<TypeId, Slot>,
}

impl Registry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Whether a handler is registered for request type `R`.
    pub fn has_handler<R: Request>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<R>())
    }

    /// Number of behaviors registered for request type `R`.
    pub fn behavior_count<R: Request>(&self) -> usize {
        HandlerProvider::behaviors::<R>(self).len()
    }

    /// Number of handlers registered for notification type `N`.
    pub fn notification_handler_count<N: Notification>(&self) -> usize {
        HandlerProvider::notification_handlers::<N>(self).len()
    }

    /// Number of request types with a handler.
    pub fn request_type_count(&self) -> usize {
        self.handlers.len()
    }
}

impl HandlerProvider for Registry {
    fn request_handler<R: Request>(&self) -> Option<&dyn DynRequestHandler<R>> {
        lookup::<Arc<dyn DynRequestHandler<R>>>(&self.handlers, TypeId::of::<R>())
            .map(|handler| &**handler)
    }

    fn behaviors<R: Request>(&self) -> &[Arc<dyn DynBehavior<R>>] {
        lookup::<Vec<Arc<dyn DynBehavior<R>>>>(&self.behaviors, TypeId::of::<R>())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn notification_handlers<N: Notification>(&self) -> &[Arc<dyn DynNotificationHandler<N>>] {
        lookup::<Vec<Arc<dyn DynNotificationHandler<N>>>>(
            &self.notification_handlers,
            TypeId::of::<N>(),
        )
        .map(Vec::as_slice)
        .unwrap_or(&[])
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("request_types", &self.handlers.len())
            .field("behavior_types", &self.behaviors.len())
            .field("notification_types", &self.notification_handlers.len())
            .finish()
    }
}

/// Builder for constructing a [`Registry`].
///
/// Registration order of behaviors is their execution order, outermost
/// first. A second handler for the same request type is remembered and
/// reported by [`build`](Self::build).
///
/// # Example
///
/// ```rust,ignore
/// let registry = Registry::builder()
///     .handler::<CreateUser>(CreateUserHandler::new(db))
///     .behavior::<CreateUser>(LoggingBehavior::new())
///     .behavior::<CreateUser>(ValidationBehavior)
///     .notification_handler::<UserCreated>(SendWelcomeMail)
///     .build()?;
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    handlers: HashMap<TypeId, Slot>,
    behaviors: HashMap<TypeId, Slot>,
    notification_handlers: HashMap<TypeId, Slot>,
    errors: Vec<RegistryError>,
}

impl RegistryBuilder {
    /// Create a new empty registry builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for request type `R`.
    pub fn handler<R: Request>(self, handler: impl RequestHandler<R>) -> Self {
        self.handler_shared::<R>(Arc::new(handler))
    }

    /// Register an already shared handler for request type `R`.
    pub fn handler_shared<R: Request>(mut self, handler: Arc<dyn DynRequestHandler<R>>) -> Self {
        match self.handlers.entry(TypeId::of::<R>()) {
            Entry::Occupied(_) => self.errors.push(RegistryError::DuplicateHandler {
                request: type_name::<R>(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(Box::new(handler));
            }
        }
        self
    }

    /// Append a behavior to the chain of request type `R`.
    pub fn behavior<R: Request>(self, behavior: impl PipelineBehavior<R>) -> Self {
        self.behavior_shared::<R>(Arc::new(behavior))
    }

    /// Append an already shared behavior to the chain of request type `R`.
    pub fn behavior_shared<R: Request>(mut self, behavior: Arc<dyn DynBehavior<R>>) -> Self {
        append(&mut self.behaviors, TypeId::of::<R>(), behavior);
        self
    }

    /// Add a handler for notification type `N`.
    pub fn notification_handler<N: Notification>(
        self,
        handler: impl NotificationHandler<N>,
    ) -> Self {
        self.notification_handler_shared::<N>(Arc::new(handler))
    }

    /// Add an already shared handler for notification type `N`.
    pub fn notification_handler_shared<N: Notification>(
        mut self,
        handler: Arc<dyn DynNotificationHandler<N>>,
    ) -> Self {
        append(&mut self.notification_handlers, TypeId::of::<N>(), handler);
        self
    }

    /// Freeze the registry.
    ///
    /// Fails with the first registration error, if any.
    pub fn build(self) -> Result<Registry, RegistryError> {
        if let Some(err) = self.errors.into_iter().next() {
            tracing::warn!(error = %err, "rejecting registry");
            return Err(err);
        }

        tracing::debug!(
            request_types = self.handlers.len(),
            behavior_types = self.behaviors.len(),
            notification_types = self.notification_handlers.len(),
            "registry built"
        );

        Ok(Registry {
            handlers: self.handlers,
            behaviors: self.behaviors,
            notification_handlers: self.notification_handlers,
        })
    }
}
