//! Notification aggregate.

use chrono::{DateTime, Utc};
use common::UniqueEntityId;
use events::{AggregateRoot, EventQueue};

use crate::events::ForumEvent;

/// Stored state of a notification.
#[derive(Debug, Clone)]
pub struct NotificationProps {
    pub recipient_id: UniqueEntityId,
    pub title: String,
    pub content: String,
    pub idempotency_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

/// A message delivered to a student.
///
/// Notifications sent by subscribers carry an idempotency key derived from
/// the triggering event, so a redelivered event does not notify twice.
#[derive(Debug, Clone)]
pub struct Notification {
    id: UniqueEntityId,
    recipient_id: UniqueEntityId,
    title: String,
    content: String,
    idempotency_key: Option<String>,
    created_at: DateTime<Utc>,
    read_at: Option<DateTime<Utc>>,
    events: EventQueue<ForumEvent>,
}

impl AggregateRoot for Notification {
    type Event = ForumEvent;

    fn aggregate_type() -> &'static str {
        "Notification"
    }

    fn id(&self) -> UniqueEntityId {
        self.id
    }

    fn events(&self) -> &EventQueue<ForumEvent> {
        &self.events
    }

    fn events_mut(&mut self) -> &mut EventQueue<ForumEvent> {
        &mut self.events
    }
}

impl Notification {
    pub fn create(
        recipient_id: UniqueEntityId,
        title: impl Into<String>,
        content: impl Into<String>,
        idempotency_key: Option<String>,
    ) -> Self {
        Self::restore(
            UniqueEntityId::new(),
            NotificationProps {
                recipient_id,
                title: title.into(),
                content: content.into(),
                idempotency_key,
                created_at: Utc::now(),
                read_at: None,
            },
        )
    }

    pub fn restore(id: UniqueEntityId, props: NotificationProps) -> Self {
        Self {
            id,
            recipient_id: props.recipient_id,
            title: props.title,
            content: props.content,
            idempotency_key: props.idempotency_key,
            created_at: props.created_at,
            read_at: props.read_at,
            events: EventQueue::new(),
        }
    }

    pub fn recipient_id(&self) -> UniqueEntityId {
        self.recipient_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn read_at(&self) -> Option<DateTime<Utc>> {
        self.read_at
    }

    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    /// Marks the notification as read. Reading it again keeps the first timestamp.
    pub fn read(&mut self) {
        if self.read_at.is_none() {
            self.read_at = Some(Utc::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_is_sticky() {
        let mut notification =
            Notification::create(UniqueEntityId::new(), "Hello", "World", None);
        assert!(!notification.is_read());

        notification.read();
        let first = notification.read_at();
        notification.read();

        assert!(notification.is_read());
        assert_eq!(notification.read_at(), first);
        assert!(notification.pending_events().is_empty());
    }
}
