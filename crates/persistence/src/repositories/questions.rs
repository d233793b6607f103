//! Cache-consistent questions repository.

use std::sync::Arc;

use async_trait::async_trait;
use cache::{CacheKey, CacheRepository, CacheRepositoryExt};
use common::{Slug, UniqueEntityId};
use domain::{
    Attachment, DomainError, DomainResult, ForumEvent, PaginationParams, Question,
    QuestionDetails, QuestionsRepository, StorageError,
};
use events::{AggregateRoot, EventDispatcher};

use crate::database::{InMemoryDatabase, apply_link_diff, linked_attachment_ids};
use crate::mappers::{
    attachment_from_record, question_from_record, question_link_to_record, question_to_record,
    student_from_record,
};
use crate::records::QuestionRecord;
use crate::repositories::newest_first_page;

const ENTITY: &str = "question";
const DETAILS_VIEW: &str = "details";

/// Questions repository serving the details view read-through from a cache.
///
/// Every write runs persist, then invalidate, then dispatch. The details
/// entry is deleted on every write whether or not the cached fields changed.
/// Cache faults never fail a read or a write: reads fall back to the primary
/// store and failed invalidations are logged and counted.
#[derive(Clone)]
pub struct InMemoryQuestionsRepository {
    db: InMemoryDatabase,
    cache: Arc<dyn CacheRepository>,
    dispatcher: Arc<EventDispatcher<ForumEvent>>,
}

impl InMemoryQuestionsRepository {
    pub fn new(
        db: InMemoryDatabase,
        cache: Arc<dyn CacheRepository>,
        dispatcher: Arc<EventDispatcher<ForumEvent>>,
    ) -> Self {
        Self {
            db,
            cache,
            dispatcher,
        }
    }

    /// Key of the cached details view for `slug`.
    pub fn details_key(slug: &Slug) -> CacheKey {
        CacheKey::new(ENTITY, slug.as_str(), DETAILS_VIEW)
    }

    async fn load(
        &self,
        predicate: impl Fn(&QuestionRecord) -> bool,
    ) -> DomainResult<Option<Question>> {
        self.db.ensure_available()?;
        let record = {
            let questions = self.db.questions.read().await;
            match questions.iter().find(|record| predicate(record)) {
                Some(record) => record.clone(),
                None => return Ok(None),
            }
        };
        let links = self.db.question_attachments.read().await;
        let attachment_ids = linked_attachment_ids(&links, record.id);
        Ok(Some(question_from_record(&record, &attachment_ids)))
    }

    /// Joins a question with its author and attachments from the primary store.
    async fn compose_details(&self, slug: &Slug) -> DomainResult<Option<QuestionDetails>> {
        let Some(question) = self.load(|record| record.slug == slug.as_str()).await? else {
            return Ok(None);
        };

        let author = {
            let students = self.db.students.read().await;
            students
                .get(&question.author_id())
                .map(student_from_record)
                .ok_or_else(|| {
                    StorageError::Corrupted(format!(
                        "question {} references missing author {}",
                        question.id(),
                        question.author_id()
                    ))
                })?
        };

        let attachments = {
            let table = self.db.attachments.read().await;
            question
                .attachment_ids()
                .into_iter()
                .map(|id| {
                    table.get(&id).map(attachment_from_record).ok_or_else(|| {
                        StorageError::Corrupted(format!(
                            "question {} references missing attachment {id}",
                            question.id()
                        ))
                    })
                })
                .collect::<Result<Vec<Attachment>, StorageError>>()?
        };

        Ok(Some(QuestionDetails::compose(&question, &author, &attachments)))
    }

    async fn persist(&self, question: &mut Question) -> DomainResult<()> {
        self.db.ensure_available()?;

        let record = question_to_record(question);
        {
            let mut questions = self.db.questions.write().await;
            match questions.iter_mut().find(|row| row.id == record.id) {
                Some(row) => *row = record,
                None => questions.push(record),
            }
        }

        self.persist_links(question).await;
        Ok(())
    }

    async fn persist_links(&self, question: &mut Question) {
        let attachments = question.attachments();
        if attachments.has_changes() {
            let added = attachments.new_items().iter().map(question_link_to_record);
            let removed: Vec<_> = attachments
                .removed_items()
                .iter()
                .map(question_link_to_record)
                .collect();
            let mut links = self.db.question_attachments.write().await;
            apply_link_diff(&mut links, added, &removed);
        }
        question.commit_attachments();
    }

    /// Deletes every cached view of `slug`. Failures are logged, never returned.
    async fn invalidate(&self, slug: &Slug) {
        let prefix = CacheKey::prefix(ENTITY, slug.as_str());
        match self.cache.delete_prefix(&prefix).await {
            Ok(removed) => tracing::debug!(%slug, removed, "invalidated cached question views"),
            Err(error) => {
                metrics::counter!("cache_invalidation_failures_total", "entity" => ENTITY)
                    .increment(1);
                tracing::warn!(%slug, %error, "failed to invalidate cached question views");
            }
        }
    }

    async fn dispatch(&self, question: &mut Question) -> DomainResult<()> {
        self.dispatcher.dispatch(question).await?;
        Ok(())
    }
}

#[async_trait]
impl QuestionsRepository for InMemoryQuestionsRepository {
    async fn find_by_id(&self, id: UniqueEntityId) -> DomainResult<Option<Question>> {
        self.load(|record| record.id == id).await
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Question>> {
        self.load(|record| record.slug == slug.as_str()).await
    }

    #[tracing::instrument(skip_all, fields(%slug))]
    async fn find_details_by_slug(&self, slug: &Slug) -> DomainResult<Option<QuestionDetails>> {
        let key = Self::details_key(slug);

        match self.cache.get_json::<QuestionDetails>(key.as_str()).await {
            Ok(Some(details)) => {
                metrics::counter!("question_details_cache_hits_total").increment(1);
                tracing::debug!(%key, "question details cache hit");
                return Ok(Some(details));
            }
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(%key, %error, "unreadable cached question details, recomputing");
            }
        }

        metrics::counter!("question_details_cache_misses_total").increment(1);
        let Some(details) = self.compose_details(slug).await? else {
            return Ok(None);
        };

        if let Err(error) = self.cache.set_json(key.as_str(), &details, None).await {
            tracing::warn!(%key, %error, "failed to cache question details");
        }

        Ok(Some(details))
    }

    async fn find_many_recent(&self, params: PaginationParams) -> DomainResult<Vec<Question>> {
        self.db.ensure_available()?;
        let records = self.db.questions.read().await.clone();
        let page = newest_first_page(records, params, |record| record.created_at);

        let links = self.db.question_attachments.read().await;
        Ok(page
            .iter()
            .map(|record| question_from_record(record, &linked_attachment_ids(&links, record.id)))
            .collect())
    }

    #[tracing::instrument(skip_all, fields(question_id = %question.id(), slug = %question.slug()))]
    async fn create(&self, question: &mut Question) -> DomainResult<()> {
        self.db.ensure_available()?;
        {
            let mut questions = self.db.questions.write().await;
            if questions
                .iter()
                .any(|row| row.slug == question.slug().as_str())
            {
                return Err(DomainError::conflict("Question", "slug", question.slug()));
            }
            questions.push(question_to_record(question));
        }

        self.persist_links(question).await;
        self.invalidate(question.slug()).await;
        self.dispatch(question).await
    }

    #[tracing::instrument(skip_all, fields(question_id = %question.id(), slug = %question.slug()))]
    async fn save(&self, question: &mut Question) -> DomainResult<()> {
        self.persist(question).await?;
        self.invalidate(question.slug()).await;
        self.dispatch(question).await
    }

    #[tracing::instrument(skip_all, fields(question_id = %question.id(), slug = %question.slug()))]
    async fn delete(&self, question: &mut Question) -> DomainResult<()> {
        self.db.ensure_available()?;
        let id = question.id();
        self.db.questions.write().await.retain(|row| row.id != id);
        self.db
            .question_attachments
            .write()
            .await
            .retain(|link| link.owner_id != id);

        self.invalidate(question.slug()).await;
        self.dispatch(question).await
    }
}
