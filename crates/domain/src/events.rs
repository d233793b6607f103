//! Forum domain events.

use chrono::{DateTime, Utc};
use common::UniqueEntityId;
use events::DomainEvent;
use serde::{Deserialize, Serialize};

/// Events recorded by forum aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ForumEvent {
    /// An answer was posted on a question.
    AnswerCreated(AnswerCreated),

    /// A question's author picked a best answer.
    QuestionBestAnswerChosen(QuestionBestAnswerChosen),
}

impl DomainEvent for ForumEvent {
    fn event_kind(&self) -> &'static str {
        match self {
            ForumEvent::AnswerCreated(_) => AnswerCreated::KIND,
            ForumEvent::QuestionBestAnswerChosen(_) => QuestionBestAnswerChosen::KIND,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ForumEvent::AnswerCreated(data) => data.occurred_at,
            ForumEvent::QuestionBestAnswerChosen(data) => data.occurred_at,
        }
    }

    fn aggregate_id(&self) -> UniqueEntityId {
        match self {
            ForumEvent::AnswerCreated(data) => data.answer_id,
            ForumEvent::QuestionBestAnswerChosen(data) => data.question_id,
        }
    }
}

/// Data for the AnswerCreated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerCreated {
    pub answer_id: UniqueEntityId,
    pub question_id: UniqueEntityId,
    pub author_id: UniqueEntityId,

    /// Answer excerpt at creation time.
    pub excerpt: String,

    pub occurred_at: DateTime<Utc>,
}

impl AnswerCreated {
    pub const KIND: &'static str = "AnswerCreated";
}

/// Data for the QuestionBestAnswerChosen event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBestAnswerChosen {
    pub question_id: UniqueEntityId,
    pub best_answer_id: UniqueEntityId,
    pub occurred_at: DateTime<Utc>,
}

impl QuestionBestAnswerChosen {
    pub const KIND: &'static str = "QuestionBestAnswerChosen";
}
