use crate::actions::{Action, RawActionError};
use crate::middleware::Middleware;
use crate::reducers::reduce;
use crate::state::AppState;
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError, Weak};

type Listener = Arc<dyn Fn(&AppState) + Send + Sync>;

struct StoreCore {
    state: Arc<AppState>,
    middleware: Vec<Box<dyn Middleware>>,
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

struct StoreInner {
    core: Mutex<StoreCore>,
    listeners: Mutex<Listeners>,
}

/// Store - holds application state and runs the dispatch loop
///
/// A cheap cloneable handle; every clone addresses the same state. Each
/// dispatch runs the middleware chain and the root reducer under one lock
/// and swaps in the new state, so a transition is never partially visible.
/// Listeners run after the lock is released.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl Store {
    pub fn new(initial_state: AppState) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                core: Mutex::new(StoreCore {
                    state: Arc::new(initial_state),
                    middleware: Vec::new(),
                }),
                listeners: Mutex::new(Listeners::default()),
            }),
        }
    }

    /// Add middleware to the end of the chain
    pub fn add_middleware(&self, middleware: impl Middleware + 'static) {
        self.inner
            .core
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .middleware
            .push(Box::new(middleware));
    }

    /// Immutable snapshot of the current state
    pub fn get_state(&self) -> Arc<AppState> {
        let core = self.inner.core.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&core.state)
    }

    /// Register a listener called after every committed transition
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// unsubscribed or dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AppState) + Send + Sync + 'static,
    {
        let mut listeners = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        listeners.next_id += 1;
        let id = listeners.next_id;
        listeners.entries.push((id, Arc::new(listener)));

        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
            active: true,
        }
    }

    /// Process an action through the middleware chain and the reducer
    pub fn dispatch(&self, action: Action) {
        let next = {
            let mut core = self.inner.core.lock().unwrap_or_else(PoisonError::into_inner);
            let current = Arc::clone(&core.state);

            // Pass through middleware chain
            let should_reduce = core
                .middleware
                .iter_mut()
                .all(|middleware| middleware.handle(&action, &current));
            if !should_reduce {
                log::debug!("Action {} swallowed by middleware", action.type_name());
                return;
            }

            let next = Arc::new(reduce((*current).clone(), &action));
            core.state = Arc::clone(&next);
            next
        };

        self.notify(&next);
    }

    /// Dispatch through the string contract `("slice/actionName", payload)`
    ///
    /// Unknown types and malformed payloads change nothing and notify nobody.
    pub fn dispatch_raw(&self, type_name: &str, payload: Value) -> Result<(), RawActionError> {
        match Action::from_raw(type_name, payload) {
            Ok(action) => {
                self.dispatch(action);
                Ok(())
            }
            Err(err) => {
                log::warn!("Ignoring action: {}", err);
                Err(err)
            }
        }
    }

    /// Run an async action with a handle to this store
    ///
    /// `f` is invoked immediately; its return value (usually a future) is
    /// handed back unchanged.
    pub fn thunk<T, F>(&self, f: F) -> T
    where
        F: FnOnce(Store) -> T,
    {
        f(self.clone())
    }

    fn notify(&self, state: &AppState) {
        // Snapshot so listeners may (un)subscribe while being called
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(state);
        }
    }
}

/// Registration handle returned by [`Store::subscribe`]
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    id: u64,
    store: Weak<StoreInner>,
    active: bool,
}

impl Subscription {
    /// Stop receiving notifications
    pub fn unsubscribe(self) {
        // Drop does the work
    }

    /// Keep the listener registered for the lifetime of the store
    pub fn detach(mut self) {
        self.active = false;
    }

    fn remove(&self) {
        if let Some(inner) = self.store.upgrade() {
            inner
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entries
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.active {
            self.remove();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
