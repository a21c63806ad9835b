//! Domain event publishing.
//!
//! A [`DomainEventManager`] dispatches raised events to three audiences, in
//! this order:
//! - handlers located by its [`HandlerFinder`]
//! - delegates registered globally (visible from every thread)
//! - delegates registered on the raising thread only
//!
//! Delegates receive only events of the type they were registered for.
//!
//! ```
//! use rulegraph::events::{DomainEvent, DomainEventManager};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! struct CustomerRenamed;
//! impl DomainEvent for CustomerRenamed {}
//!
//! let manager = DomainEventManager::new();
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&seen);
//! manager.register_global(move |_: &CustomerRenamed| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! manager.raise(&CustomerRenamed);
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```

use std::any::Any;
use std::cell::RefCell;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard};

use thread_local::ThreadLocal;

/// Marker for types that can be raised as domain events.
pub trait DomainEvent: 'static {}

/// Handles one type of domain event.
pub trait DomainEventHandler<E: DomainEvent>: Send + Sync {
    fn handle(&self, event: &E);
}

/// Locates the handlers for an event type.
pub trait HandlerFinder: Send + Sync {
    fn find<E: DomainEvent>(&self) -> Vec<Arc<dyn DomainEventHandler<E>>>;
}

/// A finder that never finds any handlers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHandlerFinder;

impl HandlerFinder for NullHandlerFinder {
    fn find<E: DomainEvent>(&self) -> Vec<Arc<dyn DomainEventHandler<E>>> {
        Vec::new()
    }
}

type Delegate<E> = Arc<dyn Fn(&E) + Send + Sync>;
type Registry = Vec<Box<dyn Any + Send + Sync>>;

static INSTANCE: LazyLock<DomainEventManager> = LazyLock::new(DomainEventManager::new);

/// Registry and dispatcher of domain event delegates.
///
/// Thread-local registrations live inside the manager, one slot per thread,
/// and are released together with the manager whichever thread drops it.
pub struct DomainEventManager<F: HandlerFinder = NullHandlerFinder> {
    finder: F,
    global: Mutex<Registry>,
    local: ThreadLocal<RefCell<Registry>>,
}

impl DomainEventManager<NullHandlerFinder> {
    pub fn new() -> Self {
        Self::with_finder(NullHandlerFinder)
    }

    /// The process-wide manager.
    pub fn instance() -> &'static DomainEventManager {
        &INSTANCE
    }
}

impl Default for DomainEventManager<NullHandlerFinder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: HandlerFinder> DomainEventManager<F> {
    pub fn with_finder(finder: F) -> Self {
        Self {
            finder,
            global: Mutex::new(Vec::new()),
            local: ThreadLocal::new(),
        }
    }

    pub fn finder(&self) -> &F {
        &self.finder
    }

    /// Register a delegate invoked for events raised on any thread.
    pub fn register_global<E, D>(&self, delegate: D)
    where
        E: DomainEvent,
        D: Fn(&E) + Send + Sync + 'static,
    {
        let delegate: Delegate<E> = Arc::new(delegate);
        self.lock_global().push(Box::new(delegate));
        tracing::trace!(
            event = std::any::type_name::<E>(),
            "registered global delegate"
        );
    }

    /// Register a delegate invoked only for events raised on the current thread.
    pub fn register_thread_local<E, D>(&self, delegate: D)
    where
        E: DomainEvent,
        D: Fn(&E) + Send + Sync + 'static,
    {
        let delegate: Delegate<E> = Arc::new(delegate);
        self.local.get_or_default().borrow_mut().push(Box::new(delegate));
        tracing::trace!(
            event = std::any::type_name::<E>(),
            "registered thread-local delegate"
        );
    }

    /// Remove global delegates and the current thread's delegates.
    pub fn clear_all(&self) {
        self.clear_global();
        self.clear_thread_local();
    }

    pub fn clear_global(&self) {
        self.lock_global().clear();
    }

    /// Remove the current thread's delegates.
    pub fn clear_thread_local(&self) {
        if let Some(local) = self.local.get() {
            local.borrow_mut().clear();
        }
    }

    /// Dispatch `event` to found handlers, then global delegates, then the
    /// current thread's delegates.
    ///
    /// Each registry is snapshotted before its delegates run, so a delegate
    /// may register further delegates without deadlocking.
    pub fn raise<E: DomainEvent>(&self, event: &E) {
        let handlers = self.finder.find::<E>();
        for handler in &handlers {
            handler.handle(event);
        }

        let global = matching::<E>(&self.lock_global());
        for delegate in &global {
            delegate(event);
        }

        let local = self
            .local
            .get()
            .map(|local| matching::<E>(&local.borrow()))
            .unwrap_or_default();
        for delegate in &local {
            delegate(event);
        }

        tracing::trace!(
            event = std::any::type_name::<E>(),
            handlers = handlers.len(),
            global = global.len(),
            local = local.len(),
            "raised domain event"
        );
    }

    fn lock_global(&self) -> MutexGuard<'_, Registry> {
        // Delegates run outside the lock, so a poisoned lock still holds a valid list.
        self.global
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

fn matching<E: DomainEvent>(registry: &Registry) -> Vec<Delegate<E>> {
    registry
        .iter()
        .filter_map(|delegate| delegate.downcast_ref::<Delegate<E>>())
        .cloned()
        .collect()
}

impl<F: HandlerFinder + std::fmt::Debug> std::fmt::Debug for DomainEventManager<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainEventManager")
            .field("finder", &self.finder)
            .field("global_delegates", &self.lock_global().len())
            .finish()
    }
}
