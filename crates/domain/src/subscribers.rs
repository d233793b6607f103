//! Event subscribers that turn forum events into notifications.
//!
//! Both subscribers send with an idempotency key derived from the event, so
//! a retried write that dispatches the same transition again does not notify
//! twice.

use std::sync::Arc;

use async_trait::async_trait;
use events::{EventDispatcher, EventHandler, HandlerError};

use crate::commands::SendNotification;
use crate::events::{AnswerCreated, ForumEvent, QuestionBestAnswerChosen};
use crate::repositories::{AnswersRepository, QuestionsRepository};
use crate::services::NotificationService;

fn truncated(text: &str, max_chars: usize) -> String {
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}...")
}

/// Notifies a question's author when someone answers it.
pub struct OnAnswerCreated {
    questions: Arc<dyn QuestionsRepository>,
    notifications: Arc<NotificationService>,
}

impl OnAnswerCreated {
    pub fn new(
        questions: Arc<dyn QuestionsRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            questions,
            notifications,
        }
    }

    pub fn idempotency_key(event: &AnswerCreated) -> String {
        format!("{}:{}", AnswerCreated::KIND, event.answer_id)
    }
}

#[async_trait]
impl EventHandler<ForumEvent> for OnAnswerCreated {
    fn name(&self) -> &'static str {
        "OnAnswerCreated"
    }

    async fn handle(&self, event: &ForumEvent) -> Result<(), HandlerError> {
        let ForumEvent::AnswerCreated(data) = event else {
            return Ok(());
        };

        let Some(question) = self.questions.find_by_id(data.question_id).await? else {
            tracing::warn!(question_id = %data.question_id, "answered question no longer exists");
            return Ok(());
        };

        let cmd = SendNotification::new(
            question.author_id(),
            format!("New answer on \"{}\"", truncated(question.title(), 40)),
            data.excerpt.clone(),
        )
        .idempotent(Self::idempotency_key(data));
        self.notifications.send_notification(cmd).await?;

        Ok(())
    }
}

/// Notifies an answer's author when it is chosen as the best answer.
pub struct OnQuestionBestAnswerChosen {
    questions: Arc<dyn QuestionsRepository>,
    answers: Arc<dyn AnswersRepository>,
    notifications: Arc<NotificationService>,
}

impl OnQuestionBestAnswerChosen {
    pub fn new(
        questions: Arc<dyn QuestionsRepository>,
        answers: Arc<dyn AnswersRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            questions,
            answers,
            notifications,
        }
    }

    pub fn idempotency_key(event: &QuestionBestAnswerChosen) -> String {
        format!(
            "{}:{}:{}",
            QuestionBestAnswerChosen::KIND,
            event.question_id,
            event.best_answer_id
        )
    }
}

#[async_trait]
impl EventHandler<ForumEvent> for OnQuestionBestAnswerChosen {
    fn name(&self) -> &'static str {
        "OnQuestionBestAnswerChosen"
    }

    async fn handle(&self, event: &ForumEvent) -> Result<(), HandlerError> {
        let ForumEvent::QuestionBestAnswerChosen(data) = event else {
            return Ok(());
        };

        let Some(answer) = self.answers.find_by_id(data.best_answer_id).await? else {
            tracing::warn!(answer_id = %data.best_answer_id, "chosen answer no longer exists");
            return Ok(());
        };
        let Some(question) = self.questions.find_by_id(data.question_id).await? else {
            tracing::warn!(question_id = %data.question_id, "question no longer exists");
            return Ok(());
        };

        let cmd = SendNotification::new(
            answer.author_id(),
            "Your answer was chosen!",
            format!(
                "The answer you sent on \"{}\" was chosen by the author!",
                truncated(question.title(), 20)
            ),
        )
        .idempotent(Self::idempotency_key(data));
        self.notifications.send_notification(cmd).await?;

        Ok(())
    }
}

/// Registers every forum subscriber. Call once at start-up.
pub fn register_subscribers(
    dispatcher: &EventDispatcher<ForumEvent>,
    questions: Arc<dyn QuestionsRepository>,
    answers: Arc<dyn AnswersRepository>,
    notifications: Arc<NotificationService>,
) {
    dispatcher.register(
        AnswerCreated::KIND,
        Arc::new(OnAnswerCreated::new(
            Arc::clone(&questions),
            Arc::clone(&notifications),
        )),
    );
    dispatcher.register(
        QuestionBestAnswerChosen::KIND,
        Arc::new(OnQuestionBestAnswerChosen::new(
            questions,
            answers,
            notifications,
        )),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_keeps_first_chars_and_appends_ellipsis() {
        assert_eq!(truncated("How do I share state?", 6), "How do...");
        assert_eq!(truncated("Short", 40), "Short...");
    }
}
