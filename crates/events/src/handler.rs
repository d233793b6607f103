//! Subscriber callbacks.

use std::future::Future;

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::event::DomainEvent;

/// A subscriber invoked by the dispatcher for each event of the kinds it was
/// registered under.
///
/// Handlers run after the triggering write was committed and may be invoked
/// again for the same transition on a retried write, so they must be
/// idempotent.
#[async_trait]
pub trait EventHandler<E: DomainEvent>: Send + Sync {
    /// Returns the handler name, used in logs and dispatch errors.
    fn name(&self) -> &'static str;

    /// Handles a single event.
    async fn handle(&self, event: &E) -> Result<(), HandlerError>;
}

/// Adapter turning an async closure into an [`EventHandler`].
pub struct HandlerFn<F> {
    name: &'static str,
    f: F,
}

/// Wraps `f` as a named handler. The closure receives its own copy of the event.
pub fn handler_fn<F>(name: &'static str, f: F) -> HandlerFn<F> {
    HandlerFn { name, f }
}

#[async_trait]
impl<E, F, Fut> EventHandler<E> for HandlerFn<F>
where
    E: DomainEvent,
    F: Fn(E) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), HandlerError>> + Send,
{
    fn name(&self) -> &'static str {
        self.name
    }

    async fn handle(&self, event: &E) -> Result<(), HandlerError> {
        (self.f)(event.clone()).await
    }
}
