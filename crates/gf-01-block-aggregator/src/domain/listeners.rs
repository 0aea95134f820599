//! # Listener Registry
//!
//! Completed blocks are published to every registered listener.

use std::fmt;
use std::sync::Arc;

use shared_types::BlockEnvelope;
use tracing::debug;
use uuid::Uuid;

use crate::ports::BlockListener;

/// Handle returned on registration, used to remove the listener later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered set of block listeners.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<(ListenerId, Arc<dyn BlockListener>)>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. Listeners are notified in registration order.
    pub fn add(&mut self, listener: Arc<dyn BlockListener>) -> ListenerId {
        let id = ListenerId::new();
        self.listeners.push((id, listener));
        debug!(listener = %id, total = self.listeners.len(), "Block listener added");
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        let removed = self.listeners.len() < before;
        if removed {
            debug!(listener = %id, total = self.listeners.len(), "Block listener removed");
        }
        removed
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// True when no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Publishes a completed block to every listener.
    pub fn notify_block(&self, envelope: &BlockEnvelope) {
        for (_, listener) in &self.listeners {
            listener.on_block(envelope.clone());
        }
    }

    /// Forwards the live marker to every listener.
    pub fn notify_live_marker(&self) {
        for (_, listener) in &self.listeners {
            listener.on_live_marker();
        }
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
