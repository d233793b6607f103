//! Read views joining several aggregates.

use chrono::{DateTime, Utc};
use common::{Slug, UniqueEntityId};
use events::AggregateRoot;
use serde::{Deserialize, Serialize};

use crate::entities::{AnswerComment, Attachment, Question, QuestionComment, Student};

/// Author fields shown next to content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: UniqueEntityId,
    pub name: String,
}

impl From<&Student> for AuthorSummary {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id(),
            name: student.name().to_string(),
        }
    }
}

/// Attachment fields shown in a details view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentSummary {
    pub id: UniqueEntityId,
    pub title: String,
    pub url: String,
}

impl From<&Attachment> for AttachmentSummary {
    fn from(attachment: &Attachment) -> Self {
        Self {
            id: attachment.id(),
            title: attachment.title().to_string(),
            url: attachment.url().to_string(),
        }
    }
}

/// A question joined with its author and attachments.
///
/// This is the value cached under `question:<slug>:details`. Its JSON
/// encoding is deterministic (field order is declaration order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetails {
    pub question_id: UniqueEntityId,
    pub author: AuthorSummary,
    pub title: String,
    pub content: String,
    pub slug: Slug,
    pub attachments: Vec<AttachmentSummary>,
    pub best_answer_id: Option<UniqueEntityId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl QuestionDetails {
    /// Joins a question with its author and attachments, keeping the
    /// question's attachment order.
    pub fn compose(question: &Question, author: &Student, attachments: &[Attachment]) -> Self {
        Self {
            question_id: question.id(),
            author: AuthorSummary::from(author),
            title: question.title().to_string(),
            content: question.content().to_string(),
            slug: question.slug().clone(),
            attachments: attachments.iter().map(AttachmentSummary::from).collect(),
            best_answer_id: question.best_answer_id(),
            created_at: question.created_at(),
            updated_at: question.updated_at(),
        }
    }
}

/// A question or answer comment joined with its author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithAuthor {
    pub comment_id: UniqueEntityId,
    pub content: String,
    pub author: AuthorSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CommentWithAuthor {
    pub fn from_question_comment(comment: &QuestionComment, author: &Student) -> Self {
        Self {
            comment_id: comment.id(),
            content: comment.content().to_string(),
            author: AuthorSummary::from(author),
            created_at: comment.created_at(),
            updated_at: comment.updated_at(),
        }
    }

    pub fn from_answer_comment(comment: &AnswerComment, author: &Student) -> Self {
        Self {
            comment_id: comment.id(),
            content: comment.content().to_string(),
            author: AuthorSummary::from(author),
            created_at: comment.created_at(),
            updated_at: comment.updated_at(),
        }
    }
}
