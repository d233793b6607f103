use std::sync::Arc;

use common::UniqueEntityId;
use events::AggregateRoot;

use crate::commands::{
    CommentOnAnswer, CommentOnQuestion, DeleteAnswerComment, DeleteQuestionComment,
};
use crate::entities::{AnswerComment, QuestionComment};
use crate::error::{DomainError, DomainResult};
use crate::repositories::{
    AnswerCommentsRepository, AnswersRepository, PaginationParams, QuestionCommentsRepository,
    QuestionsRepository,
};
use crate::views::CommentWithAuthor;

use super::require_non_blank;

/// Service for comments on questions and answers.
pub struct CommentService {
    question_comments: Arc<dyn QuestionCommentsRepository>,
    answer_comments: Arc<dyn AnswerCommentsRepository>,
    questions: Arc<dyn QuestionsRepository>,
    answers: Arc<dyn AnswersRepository>,
}

impl CommentService {
    pub fn new(
        question_comments: Arc<dyn QuestionCommentsRepository>,
        answer_comments: Arc<dyn AnswerCommentsRepository>,
        questions: Arc<dyn QuestionsRepository>,
        answers: Arc<dyn AnswersRepository>,
    ) -> Self {
        Self {
            question_comments,
            answer_comments,
            questions,
            answers,
        }
    }

    /// Comments on an existing question.
    #[tracing::instrument(skip(self))]
    pub async fn comment_on_question(
        &self,
        cmd: CommentOnQuestion,
    ) -> DomainResult<QuestionComment> {
        require_non_blank("content", &cmd.content)?;

        if self.questions.find_by_id(cmd.question_id).await?.is_none() {
            return Err(DomainError::not_found("Question", cmd.question_id));
        }

        let mut comment = QuestionComment::create(cmd.author_id, cmd.question_id, cmd.content);
        self.question_comments.create(&mut comment).await?;

        tracing::info!(comment_id = %comment.id(), "question comment created");
        Ok(comment)
    }

    /// Comments on an existing answer.
    #[tracing::instrument(skip(self))]
    pub async fn comment_on_answer(&self, cmd: CommentOnAnswer) -> DomainResult<AnswerComment> {
        require_non_blank("content", &cmd.content)?;

        if self.answers.find_by_id(cmd.answer_id).await?.is_none() {
            return Err(DomainError::not_found("Answer", cmd.answer_id));
        }

        let mut comment = AnswerComment::create(cmd.author_id, cmd.answer_id, cmd.content);
        self.answer_comments.create(&mut comment).await?;

        tracing::info!(comment_id = %comment.id(), "answer comment created");
        Ok(comment)
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch_question_comments(
        &self,
        question_id: UniqueEntityId,
        params: PaginationParams,
    ) -> DomainResult<Vec<CommentWithAuthor>> {
        self.question_comments
            .find_many_by_question_id_with_author(question_id, params)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch_answer_comments(
        &self,
        answer_id: UniqueEntityId,
        params: PaginationParams,
    ) -> DomainResult<Vec<CommentWithAuthor>> {
        self.answer_comments
            .find_many_by_answer_id_with_author(answer_id, params)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_question_comment(&self, cmd: DeleteQuestionComment) -> DomainResult<()> {
        let mut comment = self
            .question_comments
            .find_by_id(cmd.question_comment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("QuestionComment", cmd.question_comment_id))?;

        if !comment.is_authored_by(cmd.author_id) {
            return Err(DomainError::NotAllowed(
                "only the author can delete a comment".into(),
            ));
        }

        self.question_comments.delete(&mut comment).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_answer_comment(&self, cmd: DeleteAnswerComment) -> DomainResult<()> {
        let mut comment = self
            .answer_comments
            .find_by_id(cmd.answer_comment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("AnswerComment", cmd.answer_comment_id))?;

        if !comment.is_authored_by(cmd.author_id) {
            return Err(DomainError::NotAllowed(
                "only the author can delete a comment".into(),
            ));
        }

        self.answer_comments.delete(&mut comment).await
    }
}
