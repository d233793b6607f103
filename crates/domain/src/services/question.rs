use std::sync::Arc;

use common::{Slug, UniqueEntityId};
use events::AggregateRoot;

use crate::commands::{ChooseBestAnswer, CreateQuestion, DeleteQuestion, EditQuestion};
use crate::entities::Question;
use crate::error::{DomainError, DomainResult};
use crate::repositories::{
    AnswersRepository, AttachmentsRepository, PaginationParams, QuestionsRepository,
};
use crate::views::QuestionDetails;

use super::{ensure_attachments_exist, require_non_blank};

/// Service for questions.
pub struct QuestionService {
    questions: Arc<dyn QuestionsRepository>,
    answers: Arc<dyn AnswersRepository>,
    attachments: Arc<dyn AttachmentsRepository>,
}

impl QuestionService {
    pub fn new(
        questions: Arc<dyn QuestionsRepository>,
        answers: Arc<dyn AnswersRepository>,
        attachments: Arc<dyn AttachmentsRepository>,
    ) -> Self {
        Self {
            questions,
            answers,
            attachments,
        }
    }

    /// Posts a question. The slug is derived from the title.
    #[tracing::instrument(skip(self))]
    pub async fn create_question(&self, cmd: CreateQuestion) -> DomainResult<Question> {
        require_non_blank("title", &cmd.title)?;
        require_non_blank("content", &cmd.content)?;

        let slug = Slug::from_text(&cmd.title);
        if slug.is_empty() {
            return Err(DomainError::Validation(
                "title must contain at least one letter or digit".into(),
            ));
        }

        ensure_attachments_exist(self.attachments.as_ref(), &cmd.attachment_ids).await?;

        let mut question = Question::create(cmd.author_id, cmd.title, cmd.content, Some(slug))
            .with_attachments(&cmd.attachment_ids);
        self.questions.create(&mut question).await?;

        tracing::info!(question_id = %question.id(), slug = %question.slug(), "question created");
        Ok(question)
    }

    /// Edits title, content and attachments. Only the author may edit.
    #[tracing::instrument(skip(self))]
    pub async fn edit_question(&self, cmd: EditQuestion) -> DomainResult<Question> {
        require_non_blank("title", &cmd.title)?;
        require_non_blank("content", &cmd.content)?;

        let mut question = self.load(cmd.question_id).await?;
        if !question.is_authored_by(cmd.author_id) {
            return Err(DomainError::NotAllowed(
                "only the author can edit a question".into(),
            ));
        }

        ensure_attachments_exist(self.attachments.as_ref(), &cmd.attachment_ids).await?;

        question.set_title(cmd.title);
        question.set_content(cmd.content);
        question.set_attachments(&cmd.attachment_ids);
        self.questions.save(&mut question).await?;

        Ok(question)
    }

    /// Returns the details view of the question with `slug`.
    #[tracing::instrument(skip(self))]
    pub async fn get_question_by_slug(&self, slug: &str) -> DomainResult<QuestionDetails> {
        let slug = Slug::new(slug);
        self.questions
            .find_details_by_slug(&slug)
            .await?
            .ok_or_else(|| DomainError::not_found("Question", &slug))
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch_recent_questions(
        &self,
        params: PaginationParams,
    ) -> DomainResult<Vec<Question>> {
        self.questions.find_many_recent(params).await
    }

    /// Marks an answer as the best one. Only the question's author may choose.
    #[tracing::instrument(skip(self))]
    pub async fn choose_best_answer(&self, cmd: ChooseBestAnswer) -> DomainResult<Question> {
        let answer = self
            .answers
            .find_by_id(cmd.answer_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Answer", cmd.answer_id))?;

        let mut question = self.load(answer.question_id()).await?;
        if !question.is_authored_by(cmd.author_id) {
            return Err(DomainError::NotAllowed(
                "only the question author can choose the best answer".into(),
            ));
        }

        question.choose_best_answer(answer.id());
        self.questions.save(&mut question).await?;

        Ok(question)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_question(&self, cmd: DeleteQuestion) -> DomainResult<()> {
        let mut question = self.load(cmd.question_id).await?;
        if !question.is_authored_by(cmd.author_id) {
            return Err(DomainError::NotAllowed(
                "only the author can delete a question".into(),
            ));
        }

        self.questions.delete(&mut question).await
    }

    async fn load(&self, id: UniqueEntityId) -> DomainResult<Question> {
        self.questions
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Question", id))
    }
}
