//! Domain event trait.

use chrono::{DateTime, Utc};
use common::UniqueEntityId;

/// An immutable record of a state transition that already happened.
///
/// Events are named in past tense and never mutate after construction. The
/// `event_kind` string is the routing key used by the dispatcher to find
/// registered handlers.
pub trait DomainEvent: std::fmt::Debug + Clone + Send + Sync + 'static {
    /// Returns the routing kind, e.g. `"AnswerCreated"`.
    fn event_kind(&self) -> &'static str;

    /// Returns when the transition happened.
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Returns the id of the aggregate that recorded the event.
    fn aggregate_id(&self) -> UniqueEntityId;
}
