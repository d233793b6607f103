//! Row shapes stored in the in-memory tables.

use chrono::{DateTime, Utc};
use common::UniqueEntityId;

#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    pub id: UniqueEntityId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentRecord {
    pub id: UniqueEntityId,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionRecord {
    pub id: UniqueEntityId,
    pub author_id: UniqueEntityId,
    pub best_answer_id: Option<UniqueEntityId>,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRecord {
    pub id: UniqueEntityId,
    pub author_id: UniqueEntityId,
    pub question_id: UniqueEntityId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Link row owned by either a question or an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentLinkRecord {
    pub owner_id: UniqueEntityId,
    pub attachment_id: UniqueEntityId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub id: UniqueEntityId,
    pub recipient_id: UniqueEntityId,
    pub title: String,
    pub content: String,
    pub idempotency_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

/// Comment row. `parent_id` is the question or answer commented on.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentRecord {
    pub id: UniqueEntityId,
    pub author_id: UniqueEntityId,
    pub parent_id: UniqueEntityId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
