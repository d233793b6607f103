//! Use cases.
//!
//! Each service method validates input, loads what it needs through the
//! repository contracts, mutates aggregates and hands them back to the
//! repositories, which persist and then dispatch recorded events.

mod answer;
mod comment;
mod notification;
mod question;
mod student;

pub use answer::AnswerService;
pub use comment::CommentService;
pub use notification::NotificationService;
pub use question::QuestionService;
pub use student::StudentService;

use common::UniqueEntityId;

use crate::error::{DomainError, DomainResult};
use crate::repositories::AttachmentsRepository;

fn require_non_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

async fn ensure_attachments_exist(
    attachments: &dyn AttachmentsRepository,
    attachment_ids: &[UniqueEntityId],
) -> DomainResult<()> {
    for &id in attachment_ids {
        if attachments.find_by_id(id).await?.is_none() {
            return Err(DomainError::Validation(format!("unknown attachment {id}")));
        }
    }
    Ok(())
}
