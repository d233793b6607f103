use std::sync::Arc;

use common::UniqueEntityId;
use events::AggregateRoot;

use crate::commands::{ReadNotification, SendNotification};
use crate::entities::Notification;
use crate::error::{DomainError, DomainResult, ErrorKind};
use crate::repositories::NotificationsRepository;

/// Service for notifications.
pub struct NotificationService {
    notifications: Arc<dyn NotificationsRepository>,
}

impl NotificationService {
    pub fn new(notifications: Arc<dyn NotificationsRepository>) -> Self {
        Self { notifications }
    }

    /// Sends a notification.
    ///
    /// With an idempotency key, an existing notification under the same key
    /// is returned unchanged and nothing new is stored.
    #[tracing::instrument(skip(self))]
    pub async fn send_notification(&self, cmd: SendNotification) -> DomainResult<Notification> {
        if let Some(key) = cmd.idempotency_key.as_deref()
            && let Some(existing) = self.notifications.find_by_idempotency_key(key).await?
        {
            tracing::debug!(key, notification_id = %existing.id(), "notification already sent");
            return Ok(existing);
        }

        let mut notification =
            Notification::create(cmd.recipient_id, cmd.title, cmd.content, cmd.idempotency_key);
        match self.notifications.create(&mut notification).await {
            Ok(()) => Ok(notification),
            Err(err) if err.kind() == ErrorKind::Conflict => {
                let Some(key) = notification.idempotency_key() else {
                    return Err(err);
                };
                // A concurrent send with the same key won the insert.
                let existing = self
                    .notifications
                    .find_by_idempotency_key(key)
                    .await?
                    .ok_or(err)?;
                tracing::debug!(key, notification_id = %existing.id(), "notification already sent");
                Ok(existing)
            }
            Err(err) => Err(err),
        }
    }

    /// Marks a notification as read. Only its recipient may read it.
    #[tracing::instrument(skip(self))]
    pub async fn read_notification(&self, cmd: ReadNotification) -> DomainResult<Notification> {
        let mut notification = self
            .notifications
            .find_by_id(cmd.notification_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Notification", cmd.notification_id))?;

        if notification.recipient_id() != cmd.recipient_id {
            return Err(DomainError::NotAllowed(
                "only the recipient can read a notification".into(),
            ));
        }

        notification.read();
        self.notifications.save(&mut notification).await?;

        Ok(notification)
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch_recipient_notifications(
        &self,
        recipient_id: UniqueEntityId,
    ) -> DomainResult<Vec<Notification>> {
        self.notifications
            .find_many_by_recipient_id(recipient_id)
            .await
    }
}
