//! Primary store contracts.
//!
//! Write operations follow the same pipeline in every implementation:
//! persist the aggregate, then invalidate affected cache entries (where a
//! cache is involved), then dispatch the aggregate's pending events. A store
//! failure aborts before invalidation and dispatch.

use async_trait::async_trait;
use common::{Slug, UniqueEntityId};

use crate::entities::{
    Answer, AnswerComment, Attachment, Notification, Question, QuestionComment, Student,
};
use crate::error::DomainResult;
use crate::views::{CommentWithAuthor, QuestionDetails};

/// One-based page selector for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u32,
}

impl PaginationParams {
    pub const PAGE_SIZE: usize = 20;

    pub fn new(page: u32) -> Self {
        Self { page: page.max(1) }
    }

    /// Number of items to skip.
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1) * Self::PAGE_SIZE
    }

    pub fn limit(&self) -> usize {
        Self::PAGE_SIZE
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(1)
    }
}

#[async_trait]
pub trait StudentsRepository: Send + Sync {
    async fn find_by_id(&self, id: UniqueEntityId) -> DomainResult<Option<Student>>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Student>>;

    async fn create(&self, student: &Student) -> DomainResult<()>;
}

#[async_trait]
pub trait AttachmentsRepository: Send + Sync {
    async fn find_by_id(&self, id: UniqueEntityId) -> DomainResult<Option<Attachment>>;

    async fn create(&self, attachment: &Attachment) -> DomainResult<()>;
}

/// Questions store with a cached details view.
#[async_trait]
pub trait QuestionsRepository: Send + Sync {
    async fn find_by_id(&self, id: UniqueEntityId) -> DomainResult<Option<Question>>;

    /// Loads the aggregate straight from the primary store.
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Question>>;

    /// Returns the details view, served from the cache when present.
    async fn find_details_by_slug(&self, slug: &Slug) -> DomainResult<Option<QuestionDetails>>;

    /// Newest questions first.
    async fn find_many_recent(&self, params: PaginationParams) -> DomainResult<Vec<Question>>;

    async fn create(&self, question: &mut Question) -> DomainResult<()>;

    async fn save(&self, question: &mut Question) -> DomainResult<()>;

    async fn delete(&self, question: &mut Question) -> DomainResult<()>;
}

#[async_trait]
pub trait AnswersRepository: Send + Sync {
    async fn find_by_id(&self, id: UniqueEntityId) -> DomainResult<Option<Answer>>;

    /// Answers of a question, newest first.
    async fn find_many_by_question_id(
        &self,
        question_id: UniqueEntityId,
        params: PaginationParams,
    ) -> DomainResult<Vec<Answer>>;

    async fn create(&self, answer: &mut Answer) -> DomainResult<()>;

    async fn save(&self, answer: &mut Answer) -> DomainResult<()>;

    async fn delete(&self, answer: &mut Answer) -> DomainResult<()>;
}

#[async_trait]
pub trait QuestionCommentsRepository: Send + Sync {
    async fn find_by_id(&self, id: UniqueEntityId) -> DomainResult<Option<QuestionComment>>;

    /// Comments of a question, newest first.
    async fn find_many_by_question_id(
        &self,
        question_id: UniqueEntityId,
        params: PaginationParams,
    ) -> DomainResult<Vec<QuestionComment>>;

    /// Same page as [`Self::find_many_by_question_id`], joined with authors.
    async fn find_many_by_question_id_with_author(
        &self,
        question_id: UniqueEntityId,
        params: PaginationParams,
    ) -> DomainResult<Vec<CommentWithAuthor>>;

    async fn create(&self, comment: &mut QuestionComment) -> DomainResult<()>;

    async fn delete(&self, comment: &mut QuestionComment) -> DomainResult<()>;
}

#[async_trait]
pub trait AnswerCommentsRepository: Send + Sync {
    async fn find_by_id(&self, id: UniqueEntityId) -> DomainResult<Option<AnswerComment>>;

    /// Comments of an answer, newest first.
    async fn find_many_by_answer_id(
        &self,
        answer_id: UniqueEntityId,
        params: PaginationParams,
    ) -> DomainResult<Vec<AnswerComment>>;

    async fn find_many_by_answer_id_with_author(
        &self,
        answer_id: UniqueEntityId,
        params: PaginationParams,
    ) -> DomainResult<Vec<CommentWithAuthor>>;

    async fn create(&self, comment: &mut AnswerComment) -> DomainResult<()>;

    async fn delete(&self, comment: &mut AnswerComment) -> DomainResult<()>;
}

#[async_trait]
pub trait NotificationsRepository: Send + Sync {
    async fn find_by_id(&self, id: UniqueEntityId) -> DomainResult<Option<Notification>>;

    async fn find_by_idempotency_key(&self, key: &str) -> DomainResult<Option<Notification>>;

    /// Notifications of a recipient, newest first.
    async fn find_many_by_recipient_id(
        &self,
        recipient_id: UniqueEntityId,
    ) -> DomainResult<Vec<Notification>>;

    async fn create(&self, notification: &mut Notification) -> DomainResult<()>;

    async fn save(&self, notification: &mut Notification) -> DomainResult<()>;
}
