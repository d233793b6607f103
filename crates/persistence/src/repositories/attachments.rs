use async_trait::async_trait;
use common::UniqueEntityId;
use domain::{Attachment, AttachmentsRepository, DomainResult};

use crate::database::InMemoryDatabase;
use crate::mappers::{attachment_from_record, attachment_to_record};

#[derive(Clone)]
pub struct InMemoryAttachmentsRepository {
    db: InMemoryDatabase,
}

impl InMemoryAttachmentsRepository {
    pub fn new(db: InMemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AttachmentsRepository for InMemoryAttachmentsRepository {
    async fn find_by_id(&self, id: UniqueEntityId) -> DomainResult<Option<Attachment>> {
        self.db.ensure_available()?;
        let attachments = self.db.attachments.read().await;
        Ok(attachments.get(&id).map(attachment_from_record))
    }

    async fn create(&self, attachment: &Attachment) -> DomainResult<()> {
        self.db.ensure_available()?;
        self.db
            .attachments
            .write()
            .await
            .insert(attachment.id(), attachment_to_record(attachment));
        Ok(())
    }
}
