//! In-process, ordered domain event dispatch.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::Result;
use crate::aggregate::AggregateRoot;
use crate::error::DispatchError;
use crate::event::DomainEvent;
use crate::handler::EventHandler;

type Registry<E> = HashMap<&'static str, Vec<Arc<dyn EventHandler<E>>>>;

/// Delivers an aggregate's pending events to the handlers registered for
/// each event kind.
///
/// The dispatcher is constructed once at start-up (or per test fixture) and
/// shared by `Arc` with every repository. Delivery is synchronous with
/// respect to the write path: events go out one at a time in recording
/// order, and for each event the handlers run one at a time in registration
/// order, each awaited to completion.
///
/// Dispatch is disabled by default so code that merely builds aggregates
/// (fixtures, seeding) stays free of side effects. In that state pending
/// events are drained and discarded.
pub struct EventDispatcher<E: DomainEvent> {
    handlers: RwLock<Registry<E>>,
    enabled: AtomicBool,
}

impl<E: DomainEvent> EventDispatcher<E> {
    /// Creates a dispatcher with no handlers and dispatch disabled.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            enabled: AtomicBool::new(false),
        }
    }

    /// Creates a dispatcher with no handlers and dispatch enabled.
    pub fn enabled() -> Self {
        let dispatcher = Self::new();
        dispatcher.set_enabled(true);
        dispatcher
    }

    /// Turns delivery on or off.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Returns whether delivery is on.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Appends a handler to the list for `kind`.
    ///
    /// Registering the same handler twice makes it run twice.
    pub fn register(&self, kind: &'static str, handler: Arc<dyn EventHandler<E>>) {
        tracing::debug!(kind, handler = handler.name(), "registering event handler");
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(kind)
            .or_default()
            .push(handler);
    }

    /// Returns how many handlers are registered for `kind`.
    pub fn handler_count(&self, kind: &str) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(kind)
            .map_or(0, Vec::len)
    }

    /// Drains the aggregate's pending events and delivers them.
    ///
    /// Only events pending when the call starts are delivered. Events that
    /// handlers record on other aggregates wait for those aggregates' own
    /// dispatch. A failing handler stops delivery and the error is returned;
    /// the remaining drained events are dropped.
    #[tracing::instrument(
        skip_all,
        fields(aggregate_type = A::aggregate_type(), aggregate_id = %aggregate.id())
    )]
    pub async fn dispatch<A>(&self, aggregate: &mut A) -> Result<()>
    where
        A: AggregateRoot<Event = E>,
    {
        let events = aggregate.events_mut().take();
        self.dispatch_events(events).await
    }

    /// Delivers events that were already drained from their aggregate.
    pub async fn dispatch_events(&self, events: Vec<E>) -> Result<()> {
        if events.is_empty() {
            return Ok(());
        }

        if !self.is_enabled() {
            tracing::debug!(count = events.len(), "dispatch disabled, discarding events");
            metrics::counter!("domain_events_discarded_total").increment(events.len() as u64);
            return Ok(());
        }

        for event in events {
            let kind = event.event_kind();
            let handlers = self.handlers_for(kind);

            tracing::debug!(kind, handlers = handlers.len(), "dispatching event");

            for handler in handlers {
                if let Err(source) = handler.handle(&event).await {
                    metrics::counter!("domain_event_handler_failures_total", "kind" => kind)
                        .increment(1);
                    tracing::error!(
                        kind,
                        handler = handler.name(),
                        error = %source,
                        "event handler failed"
                    );
                    return Err(DispatchError::HandlerFailed {
                        handler: handler.name(),
                        event_kind: kind,
                        source,
                    });
                }
            }

            metrics::counter!("domain_events_dispatched_total", "kind" => kind).increment(1);
        }

        Ok(())
    }

    fn handlers_for(&self, kind: &str) -> Vec<Arc<dyn EventHandler<E>>> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(kind)
            .cloned()
            .unwrap_or_default()
    }
}

impl<E: DomainEvent> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DomainEvent> std::fmt::Debug for EventDispatcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        let kinds: HashMap<&str, usize> = registry.iter().map(|(k, v)| (*k, v.len())).collect();
        f.debug_struct("EventDispatcher")
            .field("enabled", &self.is_enabled())
            .field("handlers", &kinds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{DateTime, Utc};
    use common::UniqueEntityId;

    use super::*;
    use crate::aggregate::EventQueue;
    use crate::error::HandlerError;
    use crate::handler::handler_fn;

    #[derive(Debug, Clone)]
    enum TestEvent {
        Created { id: UniqueEntityId, label: &'static str },
        Renamed { id: UniqueEntityId, label: &'static str },
    }

    impl TestEvent {
        fn label(&self) -> &'static str {
            match self {
                TestEvent::Created { label, .. } | TestEvent::Renamed { label, .. } => label,
            }
        }
    }

    impl DomainEvent for TestEvent {
        fn event_kind(&self) -> &'static str {
            match self {
                TestEvent::Created { .. } => "Created",
                TestEvent::Renamed { .. } => "Renamed",
            }
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            Utc::now()
        }

        fn aggregate_id(&self) -> UniqueEntityId {
            match self {
                TestEvent::Created { id, .. } | TestEvent::Renamed { id, .. } => *id,
            }
        }
    }

    #[derive(Debug, Default)]
    struct TestAggregate {
        id: UniqueEntityId,
        events: EventQueue<TestEvent>,
    }

    impl AggregateRoot for TestAggregate {
        type Event = TestEvent;

        fn aggregate_type() -> &'static str {
            "TestAggregate"
        }

        fn id(&self) -> UniqueEntityId {
            self.id
        }

        fn events(&self) -> &EventQueue<TestEvent> {
            &self.events
        }

        fn events_mut(&mut self) -> &mut EventQueue<TestEvent> {
            &mut self.events
        }
    }

    type Log = Arc<Mutex<Vec<String>>>;

    fn recording_handler(name: &'static str, log: &Log) -> Arc<dyn EventHandler<TestEvent>> {
        let log = Arc::clone(log);
        Arc::new(handler_fn(name, move |event: TestEvent| {
            let log = Arc::clone(&log);
            async move {
                log.lock().unwrap().push(format!("{name}:{}", event.label()));
                Ok::<(), HandlerError>(())
            }
        }))
    }

    fn aggregate_with_two_events() -> TestAggregate {
        let mut aggregate = TestAggregate::default();
        let id = aggregate.id;
        aggregate.record(TestEvent::Created { id, label: "e1" });
        aggregate.record(TestEvent::Renamed { id, label: "e2" });
        aggregate
    }

    #[tokio::test]
    async fn disabled_dispatch_discards_events_without_invoking_handlers() {
        let dispatcher = EventDispatcher::new();
        let log: Log = Arc::default();
        dispatcher.register("Created", recording_handler("h1", &log));
        dispatcher.register("Renamed", recording_handler("h2", &log));

        let mut aggregate = aggregate_with_two_events();
        dispatcher.dispatch(&mut aggregate).await.unwrap();

        assert!(aggregate.pending_events().is_empty());
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn enabled_dispatch_runs_handlers_per_event_in_registration_order() {
        let dispatcher = EventDispatcher::enabled();
        let log: Log = Arc::default();
        dispatcher.register("Created", recording_handler("h1", &log));
        dispatcher.register("Renamed", recording_handler("h3", &log));
        dispatcher.register("Created", recording_handler("h2", &log));

        let mut aggregate = aggregate_with_two_events();
        dispatcher.dispatch(&mut aggregate).await.unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["h1:e1".to_string(), "h2:e1".to_string(), "h3:e2".to_string()]
        );
        assert!(aggregate.pending_events().is_empty());
    }

    #[tokio::test]
    async fn events_without_handlers_are_drained() {
        let dispatcher = EventDispatcher::enabled();
        let mut aggregate = aggregate_with_two_events();

        dispatcher.dispatch(&mut aggregate).await.unwrap();

        assert!(aggregate.pending_events().is_empty());
    }

    #[tokio::test]
    async fn double_registration_runs_handler_twice() {
        let dispatcher = EventDispatcher::enabled();
        let log: Log = Arc::default();
        let handler = recording_handler("h1", &log);
        dispatcher.register("Created", Arc::clone(&handler));
        dispatcher.register("Created", handler);

        let mut aggregate = TestAggregate::default();
        let id = aggregate.id;
        aggregate.record(TestEvent::Created { id, label: "e1" });
        dispatcher.dispatch(&mut aggregate).await.unwrap();

        assert_eq!(dispatcher.handler_count("Created"), 2);
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn failing_handler_surfaces_error_and_stops_delivery() {
        let dispatcher = EventDispatcher::enabled();
        let log: Log = Arc::default();
        dispatcher.register(
            "Created",
            Arc::new(handler_fn("broken", |_event: TestEvent| async {
                Err::<(), HandlerError>("mailbox full".into())
            })),
        );
        dispatcher.register("Created", recording_handler("after", &log));
        dispatcher.register("Renamed", recording_handler("renamed", &log));

        let mut aggregate = aggregate_with_two_events();
        let err = dispatcher.dispatch(&mut aggregate).await.unwrap_err();

        match err {
            DispatchError::HandlerFailed {
                handler,
                event_kind,
                source,
            } => {
                assert_eq!(handler, "broken");
                assert_eq!(event_kind, "Created");
                assert_eq!(source.to_string(), "mailbox full");
            }
        }
        assert!(log.lock().unwrap().is_empty());
        assert!(aggregate.pending_events().is_empty());
    }

    #[tokio::test]
    async fn events_recorded_during_dispatch_wait_for_their_own_dispatch() {
        let dispatcher = EventDispatcher::enabled();
        let other = Arc::new(Mutex::new(TestAggregate::default()));
        let calls = Arc::new(Mutex::new(0));

        let other_ref = Arc::clone(&other);
        let calls_ref = Arc::clone(&calls);
        dispatcher.register(
            "Created",
            Arc::new(handler_fn("cascade", move |_event: TestEvent| {
                let other = Arc::clone(&other_ref);
                let calls = Arc::clone(&calls_ref);
                async move {
                    *calls.lock().unwrap() += 1;
                    let mut other = other.lock().unwrap();
                    let id = other.id;
                    other.record(TestEvent::Created { id, label: "cascaded" });
                    Ok::<(), HandlerError>(())
                }
            })),
        );

        let mut aggregate = TestAggregate::default();
        let id = aggregate.id;
        aggregate.record(TestEvent::Created { id, label: "e1" });
        dispatcher.dispatch(&mut aggregate).await.unwrap();

        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(other.lock().unwrap().pending_events().len(), 1);
    }

    #[tokio::test]
    async fn toggling_enable_flag() {
        let dispatcher: EventDispatcher<TestEvent> = EventDispatcher::default();
        assert!(!dispatcher.is_enabled());

        dispatcher.set_enabled(true);
        assert!(dispatcher.is_enabled());
    }
}
