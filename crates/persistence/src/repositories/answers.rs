use std::sync::Arc;

use async_trait::async_trait;
use common::UniqueEntityId;
use domain::{Answer, AnswersRepository, DomainResult, ForumEvent, PaginationParams};
use events::{AggregateRoot, EventDispatcher};

use crate::database::{InMemoryDatabase, apply_link_diff, linked_attachment_ids};
use crate::mappers::{answer_from_record, answer_link_to_record, answer_to_record};
use crate::repositories::newest_first_page;

/// Answers repository. Writes persist the answer and its attachment links,
/// then dispatch pending events.
#[derive(Clone)]
pub struct InMemoryAnswersRepository {
    db: InMemoryDatabase,
    dispatcher: Arc<EventDispatcher<ForumEvent>>,
}

impl InMemoryAnswersRepository {
    pub fn new(db: InMemoryDatabase, dispatcher: Arc<EventDispatcher<ForumEvent>>) -> Self {
        Self { db, dispatcher }
    }

    async fn persist(&self, answer: &mut Answer) -> DomainResult<()> {
        self.db.ensure_available()?;

        let record = answer_to_record(answer);
        {
            let mut answers = self.db.answers.write().await;
            match answers.iter_mut().find(|row| row.id == record.id) {
                Some(row) => *row = record,
                None => answers.push(record),
            }
        }

        let attachments = answer.attachments();
        if attachments.has_changes() {
            let added = attachments.new_items().iter().map(answer_link_to_record);
            let removed: Vec<_> = attachments
                .removed_items()
                .iter()
                .map(answer_link_to_record)
                .collect();
            let mut links = self.db.answer_attachments.write().await;
            apply_link_diff(&mut links, added, &removed);
        }
        answer.commit_attachments();

        Ok(())
    }
}

#[async_trait]
impl AnswersRepository for InMemoryAnswersRepository {
    async fn find_by_id(&self, id: UniqueEntityId) -> DomainResult<Option<Answer>> {
        self.db.ensure_available()?;
        let Some(record) = self
            .db
            .answers
            .read()
            .await
            .iter()
            .find(|row| row.id == id)
            .cloned()
        else {
            return Ok(None);
        };

        let links = self.db.answer_attachments.read().await;
        Ok(Some(answer_from_record(
            &record,
            &linked_attachment_ids(&links, record.id),
        )))
    }

    async fn find_many_by_question_id(
        &self,
        question_id: UniqueEntityId,
        params: PaginationParams,
    ) -> DomainResult<Vec<Answer>> {
        self.db.ensure_available()?;
        let records: Vec<_> = self
            .db
            .answers
            .read()
            .await
            .iter()
            .filter(|row| row.question_id == question_id)
            .cloned()
            .collect();
        let page = newest_first_page(records, params, |record| record.created_at);

        let links = self.db.answer_attachments.read().await;
        Ok(page
            .iter()
            .map(|record| answer_from_record(record, &linked_attachment_ids(&links, record.id)))
            .collect())
    }

    #[tracing::instrument(skip_all, fields(answer_id = %answer.id()))]
    async fn create(&self, answer: &mut Answer) -> DomainResult<()> {
        self.persist(answer).await?;
        self.dispatcher.dispatch(answer).await?;
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(answer_id = %answer.id()))]
    async fn save(&self, answer: &mut Answer) -> DomainResult<()> {
        self.persist(answer).await?;
        self.dispatcher.dispatch(answer).await?;
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(answer_id = %answer.id()))]
    async fn delete(&self, answer: &mut Answer) -> DomainResult<()> {
        self.db.ensure_available()?;
        let id = answer.id();
        self.db.answers.write().await.retain(|row| row.id != id);
        self.db
            .answer_attachments
            .write()
            .await
            .retain(|link| link.owner_id != id);

        self.dispatcher.dispatch(answer).await?;
        Ok(())
    }
}
