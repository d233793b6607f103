use std::sync::Arc;

use async_trait::async_trait;
use common::UniqueEntityId;
use domain::{DomainError, DomainResult, ForumEvent, Notification, NotificationsRepository};
use events::{AggregateRoot, EventDispatcher};

use crate::database::InMemoryDatabase;
use crate::mappers::{notification_from_record, notification_to_record};

/// Notifications repository. Idempotency keys are unique.
#[derive(Clone)]
pub struct InMemoryNotificationsRepository {
    db: InMemoryDatabase,
    dispatcher: Arc<EventDispatcher<ForumEvent>>,
}

impl InMemoryNotificationsRepository {
    pub fn new(db: InMemoryDatabase, dispatcher: Arc<EventDispatcher<ForumEvent>>) -> Self {
        Self { db, dispatcher }
    }
}

#[async_trait]
impl NotificationsRepository for InMemoryNotificationsRepository {
    async fn find_by_id(&self, id: UniqueEntityId) -> DomainResult<Option<Notification>> {
        self.db.ensure_available()?;
        let notifications = self.db.notifications.read().await;
        Ok(notifications
            .iter()
            .find(|row| row.id == id)
            .map(notification_from_record))
    }

    async fn find_by_idempotency_key(&self, key: &str) -> DomainResult<Option<Notification>> {
        self.db.ensure_available()?;
        let notifications = self.db.notifications.read().await;
        Ok(notifications
            .iter()
            .find(|row| row.idempotency_key.as_deref() == Some(key))
            .map(notification_from_record))
    }

    async fn find_many_by_recipient_id(
        &self,
        recipient_id: UniqueEntityId,
    ) -> DomainResult<Vec<Notification>> {
        self.db.ensure_available()?;
        let notifications = self.db.notifications.read().await;
        let mut found: Vec<_> = notifications
            .iter()
            .rev()
            .filter(|row| row.recipient_id == recipient_id)
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found.into_iter().map(notification_from_record).collect())
    }

    #[tracing::instrument(skip_all, fields(notification_id = %notification.id()))]
    async fn create(&self, notification: &mut Notification) -> DomainResult<()> {
        self.db.ensure_available()?;
        {
            let mut notifications = self.db.notifications.write().await;
            if let Some(key) = notification.idempotency_key()
                && notifications
                    .iter()
                    .any(|row| row.idempotency_key.as_deref() == Some(key))
            {
                return Err(DomainError::conflict("Notification", "idempotency_key", key));
            }
            notifications.push(notification_to_record(notification));
        }

        self.dispatcher.dispatch(notification).await?;
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(notification_id = %notification.id()))]
    async fn save(&self, notification: &mut Notification) -> DomainResult<()> {
        self.db.ensure_available()?;
        let record = notification_to_record(notification);
        {
            let mut notifications = self.db.notifications.write().await;
            match notifications.iter_mut().find(|row| row.id == record.id) {
                Some(row) => *row = record,
                None => notifications.push(record),
            }
        }

        self.dispatcher.dispatch(notification).await?;
        Ok(())
    }
}
