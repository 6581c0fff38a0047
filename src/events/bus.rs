//! Event bus registry

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::{Event, EventKind, Payload};

/// A subscribed handler
///
/// Handlers receive the event and the payload by shared reference and
/// return a partial result map. They cannot mutate the payload.
pub type Handler = Arc<dyn Fn(&Event, &Payload) -> Payload + Send + Sync>;

/// Token returned by [`EventBus::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Registry of handlers per event kind
#[derive(Default)]
pub struct EventBus {
    subscribers: HashMap<EventKind, Vec<(SubscriptionId, Handler)>>,
    next_id: u64,
}

impl EventBus {
    /// Create a bus with no handlers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind`, after any existing handlers
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: Fn(&Event, &Payload) -> Payload + Send + Sync + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers
            .entry(kind)
            .or_default()
            .push((id, Arc::new(handler)));
        debug!(event = %kind, subscription = id.0, "handler subscribed");
        id
    }

    /// Remove a subscription; returns whether anything was removed
    pub fn unsubscribe(&mut self, kind: EventKind, id: SubscriptionId) -> bool {
        let Some(handlers) = self.subscribers.get_mut(&kind) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(sub, _)| *sub != id);
        before != handlers.len()
    }

    /// Run every handler for `kind` and collect their results in order
    ///
    /// With no handlers registered the result is empty and no event is
    /// created.
    pub fn publish(&self, kind: EventKind, payload: Payload) -> Vec<Payload> {
        let handlers = match self.subscribers.get(&kind) {
            Some(handlers) if !handlers.is_empty() => handlers,
            _ => return Vec::new(),
        };

        let event = Event::new(kind, payload);
        debug!(event = %kind, id = %event.id, handlers = handlers.len(), "publishing");
        handlers
            .iter()
            .map(|(_, handler)| handler(&event, &event.payload))
            .collect()
    }

    /// Number of handlers subscribed to `kind`
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.subscribers.get(&kind).map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<(&EventKind, usize)> = self
            .subscribers
            .iter()
            .map(|(kind, handlers)| (kind, handlers.len()))
            .collect();
        counts.sort_by_key(|(kind, _)| kind.as_str());
        f.debug_struct("EventBus").field("handlers", &counts).finish()
    }
}
