use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::UniqueEntityId;
use domain::{
    AnswerComment, AnswerCommentsRepository, CommentWithAuthor, DomainResult, ForumEvent,
    PaginationParams, QuestionComment, QuestionCommentsRepository, StorageError, Student,
};
use events::{AggregateRoot, EventDispatcher};

use crate::database::InMemoryDatabase;
use crate::mappers::{
    answer_comment_from_record, answer_comment_to_record, question_comment_from_record,
    question_comment_to_record, student_from_record,
};
use crate::records::{CommentRecord, StudentRecord};
use crate::repositories::newest_first_page;

fn comment_page(
    table: &[CommentRecord],
    parent_id: UniqueEntityId,
    params: PaginationParams,
) -> Vec<CommentRecord> {
    let rows = table
        .iter()
        .filter(|row| row.parent_id == parent_id)
        .cloned()
        .collect();
    newest_first_page(rows, params, |row| row.created_at)
}

fn author_of(
    students: &HashMap<UniqueEntityId, StudentRecord>,
    record: &CommentRecord,
) -> Result<Student, StorageError> {
    students
        .get(&record.author_id)
        .map(student_from_record)
        .ok_or_else(|| {
            StorageError::Corrupted(format!(
                "comment {} references missing author {}",
                record.id, record.author_id
            ))
        })
}

/// Question comments repository.
#[derive(Clone)]
pub struct InMemoryQuestionCommentsRepository {
    db: InMemoryDatabase,
    dispatcher: Arc<EventDispatcher<ForumEvent>>,
}

impl InMemoryQuestionCommentsRepository {
    pub fn new(db: InMemoryDatabase, dispatcher: Arc<EventDispatcher<ForumEvent>>) -> Self {
        Self { db, dispatcher }
    }
}

#[async_trait]
impl QuestionCommentsRepository for InMemoryQuestionCommentsRepository {
    async fn find_by_id(&self, id: UniqueEntityId) -> DomainResult<Option<QuestionComment>> {
        self.db.ensure_available()?;
        let comments = self.db.question_comments.read().await;
        Ok(comments
            .iter()
            .find(|row| row.id == id)
            .map(question_comment_from_record))
    }

    async fn find_many_by_question_id(
        &self,
        question_id: UniqueEntityId,
        params: PaginationParams,
    ) -> DomainResult<Vec<QuestionComment>> {
        self.db.ensure_available()?;
        let page = comment_page(&self.db.question_comments.read().await, question_id, params);
        Ok(page.iter().map(question_comment_from_record).collect())
    }

    async fn find_many_by_question_id_with_author(
        &self,
        question_id: UniqueEntityId,
        params: PaginationParams,
    ) -> DomainResult<Vec<CommentWithAuthor>> {
        self.db.ensure_available()?;
        let page = comment_page(&self.db.question_comments.read().await, question_id, params);

        let students = self.db.students.read().await;
        let views = page
            .iter()
            .map(|record| {
                let author = author_of(&students, record)?;
                let comment = question_comment_from_record(record);
                Ok(CommentWithAuthor::from_question_comment(&comment, &author))
            })
            .collect::<Result<Vec<_>, StorageError>>()?;
        Ok(views)
    }

    #[tracing::instrument(skip_all, fields(comment_id = %comment.id()))]
    async fn create(&self, comment: &mut QuestionComment) -> DomainResult<()> {
        self.db.ensure_available()?;
        self.db
            .question_comments
            .write()
            .await
            .push(question_comment_to_record(comment));

        self.dispatcher.dispatch(comment).await?;
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(comment_id = %comment.id()))]
    async fn delete(&self, comment: &mut QuestionComment) -> DomainResult<()> {
        self.db.ensure_available()?;
        let id = comment.id();
        self.db
            .question_comments
            .write()
            .await
            .retain(|row| row.id != id);

        self.dispatcher.dispatch(comment).await?;
        Ok(())
    }
}

/// Answer comments repository.
#[derive(Clone)]
pub struct InMemoryAnswerCommentsRepository {
    db: InMemoryDatabase,
    dispatcher: Arc<EventDispatcher<ForumEvent>>,
}

impl InMemoryAnswerCommentsRepository {
    pub fn new(db: InMemoryDatabase, dispatcher: Arc<EventDispatcher<ForumEvent>>) -> Self {
        Self { db, dispatcher }
    }
}

#[async_trait]
impl AnswerCommentsRepository for InMemoryAnswerCommentsRepository {
    async fn find_by_id(&self, id: UniqueEntityId) -> DomainResult<Option<AnswerComment>> {
        self.db.ensure_available()?;
        let comments = self.db.answer_comments.read().await;
        Ok(comments
            .iter()
            .find(|row| row.id == id)
            .map(answer_comment_from_record))
    }

    async fn find_many_by_answer_id(
        &self,
        answer_id: UniqueEntityId,
        params: PaginationParams,
    ) -> DomainResult<Vec<AnswerComment>> {
        self.db.ensure_available()?;
        let page = comment_page(&self.db.answer_comments.read().await, answer_id, params);
        Ok(page.iter().map(answer_comment_from_record).collect())
    }

    async fn find_many_by_answer_id_with_author(
        &self,
        answer_id: UniqueEntityId,
        params: PaginationParams,
    ) -> DomainResult<Vec<CommentWithAuthor>> {
        self.db.ensure_available()?;
        let page = comment_page(&self.db.answer_comments.read().await, answer_id, params);

        let students = self.db.students.read().await;
        let views = page
            .iter()
            .map(|record| {
                let author = author_of(&students, record)?;
                let comment = answer_comment_from_record(record);
                Ok(CommentWithAuthor::from_answer_comment(&comment, &author))
            })
            .collect::<Result<Vec<_>, StorageError>>()?;
        Ok(views)
    }

    #[tracing::instrument(skip_all, fields(comment_id = %comment.id()))]
    async fn create(&self, comment: &mut AnswerComment) -> DomainResult<()> {
        self.db.ensure_available()?;
        self.db
            .answer_comments
            .write()
            .await
            .push(answer_comment_to_record(comment));

        self.dispatcher.dispatch(comment).await?;
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(comment_id = %comment.id()))]
    async fn delete(&self, comment: &mut AnswerComment) -> DomainResult<()> {
        self.db.ensure_available()?;
        let id = comment.id();
        self.db
            .answer_comments
            .write()
            .await
            .retain(|row| row.id != id);

        self.dispatcher.dispatch(comment).await?;
        Ok(())
    }
}
