//! Aggregate root behavior and its pending-event queue.

use common::UniqueEntityId;

use crate::event::DomainEvent;

/// Ordered buffer of events an aggregate recorded since its last dispatch.
///
/// Owned by the aggregate as a plain field. Only the dispatcher drains it.
#[derive(Debug, Clone, PartialEq)]
pub struct EventQueue<E> {
    events: Vec<E>,
}

impl<E> EventQueue<E> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an event to the back of the queue.
    pub fn record(&mut self, event: E) {
        self.events.push(event);
    }

    /// Returns the pending events in recording order.
    pub fn pending(&self) -> &[E] {
        &self.events
    }

    /// Removes and returns every pending event, leaving the queue empty.
    pub fn take(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }

    /// Empties the queue.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Returns the number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// An entity that is the unit of consistency and owns an event queue.
///
/// Implementors expose their composed [`EventQueue`]; the recording and
/// inspection behavior comes from the provided methods.
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate records.
    type Event: DomainEvent;

    /// Returns the aggregate type name, used in logs.
    fn aggregate_type() -> &'static str;

    /// Returns the aggregate identity.
    fn id(&self) -> UniqueEntityId;

    /// Returns the pending-event queue.
    fn events(&self) -> &EventQueue<Self::Event>;

    /// Returns the pending-event queue mutably.
    fn events_mut(&mut self) -> &mut EventQueue<Self::Event>;

    /// Buffers an event for the next dispatch. No other side effects.
    fn record(&mut self, event: Self::Event) {
        self.events_mut().record(event);
    }

    /// Read-only view of the pending events.
    fn pending_events(&self) -> &[Self::Event] {
        self.events().pending()
    }

    /// Drops every pending event. Calling it on an empty queue is a no-op.
    fn clear_events(&mut self) {
        self.events_mut().clear();
    }
}
