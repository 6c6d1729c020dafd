//! List service events.
//!
//! Every successful create or remove produces one [`ListServiceEvent`] that is
//! delivered synchronously, on the mutating thread, to each registered
//! listener in registration order.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::warn;

use plm_protocols::error::ListenerError;
use plm_protocols::PersistentList;

use crate::service::ListService;

/// The kind of change an event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOperation {
    Added,
    Removed,
}

/// A change to the set of registered lists.
#[derive(Clone)]
pub enum ListChange {
    Added(Arc<dyn PersistentList>),
    Removed(Arc<dyn PersistentList>),
}

impl ListChange {
    pub fn list(&self) -> &Arc<dyn PersistentList> {
        match self {
            ListChange::Added(list) | ListChange::Removed(list) => list,
        }
    }

    pub fn operation(&self) -> ListOperation {
        match self {
            ListChange::Added(_) => ListOperation::Added,
            ListChange::Removed(_) => ListOperation::Removed,
        }
    }
}

/// Event raised by a [`ListService`] after a list was added or removed.
pub struct ListServiceEvent<'a> {
    source: &'a ListService,
    change: ListChange,
}

impl<'a> ListServiceEvent<'a> {
    pub fn new(source: &'a ListService, change: ListChange) -> Self {
        Self { source, change }
    }

    /// The service that raised the event.
    pub fn source(&self) -> &'a ListService {
        self.source
    }

    pub fn change(&self) -> &ListChange {
        &self.change
    }

    /// The list that was added or removed.
    pub fn list(&self) -> &Arc<dyn PersistentList> {
        self.change.list()
    }

    pub fn operation(&self) -> ListOperation {
        self.change.operation()
    }
}

impl fmt::Debug for ListServiceEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListServiceEvent")
            .field("key", &self.list().key())
            .field("operation", &self.operation())
            .finish()
    }
}

/// Receives list service events.
///
/// Both callbacks default to doing nothing so listeners only implement what
/// they care about. An error is logged by the dispatcher; it does not stop
/// delivery to later listeners and does not fail the operation that raised
/// the event.
pub trait ListServiceEventListener: Send + Sync {
    fn list_added(&self, _event: &ListServiceEvent<'_>) -> Result<(), ListenerError> {
        Ok(())
    }

    fn list_removed(&self, _event: &ListServiceEvent<'_>) -> Result<(), ListenerError> {
        Ok(())
    }
}

/// Ordered set of listeners with its own lock.
///
/// The lock only guards the vector: [`fire`](Self::fire) copies the current
/// listeners out and calls them unlocked, so a listener may add or remove
/// listeners from inside a callback.
#[derive(Default)]
pub struct EventListenerList {
    listeners: RwLock<Vec<Arc<dyn ListServiceEventListener>>>,
}

impl EventListenerList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener.
    pub fn add(&self, listener: Arc<dyn ListServiceEventListener>) {
        self.listeners.write().push(listener);
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove(&self, listener: &Arc<dyn ListServiceEventListener>) -> bool {
        let mut listeners = self.listeners.write();
        match listeners.iter().position(|l| same_listener(l, listener)) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    /// Deliver an event to every listener registered at the time of the call.
    ///
    /// Returns the number of listeners that reported an error.
    pub fn fire(&self, event: &ListServiceEvent<'_>) -> usize {
        let snapshot: Vec<_> = self.listeners.read().clone();
        let mut failures = 0;

        for listener in snapshot {
            let result = match event.change() {
                ListChange::Added(_) => listener.list_added(event),
                ListChange::Removed(_) => listener.list_removed(event),
            };
            if let Err(e) = result {
                failures += 1;
                warn!(
                    "Listener failed handling {:?} of list '{}': {}",
                    event.operation(),
                    event.list().key(),
                    e
                );
            }
        }

        failures
    }
}

// Compares data pointers only; vtable pointers of the same type may differ
// between codegen units.
fn same_listener(a: &Arc<dyn ListServiceEventListener>, b: &Arc<dyn ListServiceEventListener>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
