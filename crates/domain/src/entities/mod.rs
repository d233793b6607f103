//! Forum entities and aggregates.

mod answer;
mod attachment;
mod comment;
mod notification;
mod question;
mod student;

pub use answer::{Answer, AnswerAttachment, AnswerAttachmentList, AnswerProps};
pub use attachment::Attachment;
pub use comment::{AnswerComment, CommentProps, QuestionComment};
pub use notification::{Notification, NotificationProps};
pub use question::{Question, QuestionAttachment, QuestionAttachmentList, QuestionProps};
pub use student::Student;

const EXCERPT_CHARS: usize = 120;

/// First characters of `text`, trailing whitespace trimmed, followed by `...`.
pub(crate) fn excerpt(text: &str, max_chars: usize) -> String {
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head.trim_end())
}
