//! Domain event plumbing.
//!
//! - [`DomainEvent`] describes an immutable record of a state transition
//! - [`EventQueue`] buffers an aggregate's pending events (FIFO)
//! - [`AggregateRoot`] gives aggregates record/inspect/clear behavior by composition
//! - [`EventDispatcher`] delivers pending events to registered [`EventHandler`]s
//!   after a repository has committed the aggregate

pub mod aggregate;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod handler;

pub use aggregate::{AggregateRoot, EventQueue};
pub use dispatcher::EventDispatcher;
pub use error::{DispatchError, HandlerError, Result};
pub use event::DomainEvent;
pub use handler::{EventHandler, HandlerFn, handler_fn};
