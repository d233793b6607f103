use std::sync::Arc;

use common::UniqueEntityId;
use events::AggregateRoot;

use crate::commands::{AnswerQuestion, DeleteAnswer, EditAnswer};
use crate::entities::Answer;
use crate::error::{DomainError, DomainResult};
use crate::repositories::{
    AnswersRepository, AttachmentsRepository, PaginationParams, QuestionsRepository,
};

use super::{ensure_attachments_exist, require_non_blank};

/// Service for answers.
pub struct AnswerService {
    answers: Arc<dyn AnswersRepository>,
    questions: Arc<dyn QuestionsRepository>,
    attachments: Arc<dyn AttachmentsRepository>,
}

impl AnswerService {
    pub fn new(
        answers: Arc<dyn AnswersRepository>,
        questions: Arc<dyn QuestionsRepository>,
        attachments: Arc<dyn AttachmentsRepository>,
    ) -> Self {
        Self {
            answers,
            questions,
            attachments,
        }
    }

    /// Posts an answer. Persisting it dispatches `AnswerCreated`.
    #[tracing::instrument(skip(self))]
    pub async fn answer_question(&self, cmd: AnswerQuestion) -> DomainResult<Answer> {
        require_non_blank("content", &cmd.content)?;

        if self.questions.find_by_id(cmd.question_id).await?.is_none() {
            return Err(DomainError::not_found("Question", cmd.question_id));
        }
        ensure_attachments_exist(self.attachments.as_ref(), &cmd.attachment_ids).await?;

        let mut answer = Answer::create(
            cmd.author_id,
            cmd.question_id,
            cmd.content,
            &cmd.attachment_ids,
        );
        self.answers.create(&mut answer).await?;

        tracing::info!(answer_id = %answer.id(), "answer created");
        Ok(answer)
    }

    #[tracing::instrument(skip(self))]
    pub async fn edit_answer(&self, cmd: EditAnswer) -> DomainResult<Answer> {
        require_non_blank("content", &cmd.content)?;

        let mut answer = self.load(cmd.answer_id).await?;
        if !answer.is_authored_by(cmd.author_id) {
            return Err(DomainError::NotAllowed(
                "only the author can edit an answer".into(),
            ));
        }
        ensure_attachments_exist(self.attachments.as_ref(), &cmd.attachment_ids).await?;

        answer.set_content(cmd.content);
        answer.set_attachments(&cmd.attachment_ids);
        self.answers.save(&mut answer).await?;

        Ok(answer)
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch_question_answers(
        &self,
        question_id: UniqueEntityId,
        params: PaginationParams,
    ) -> DomainResult<Vec<Answer>> {
        self.answers
            .find_many_by_question_id(question_id, params)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_answer(&self, cmd: DeleteAnswer) -> DomainResult<()> {
        let mut answer = self.load(cmd.answer_id).await?;
        if !answer.is_authored_by(cmd.author_id) {
            return Err(DomainError::NotAllowed(
                "only the author can delete an answer".into(),
            ));
        }

        self.answers.delete(&mut answer).await
    }

    async fn load(&self, id: UniqueEntityId) -> DomainResult<Answer> {
        self.answers
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Answer", id))
    }
}
