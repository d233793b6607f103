//! In-memory primary store.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use common::UniqueEntityId;
use domain::StorageError;
use tokio::sync::RwLock;

use crate::records::{
    AnswerRecord, AttachmentLinkRecord, AttachmentRecord, CommentRecord, NotificationRecord,
    QuestionRecord, StudentRecord,
};

/// Tables of the forum, each behind its own lock so writes to different
/// tables never contend.
///
/// Rows in the `Vec` tables are kept in insertion order. Cloning the
/// database shares the tables.
#[derive(Clone)]
pub struct InMemoryDatabase {
    pub(crate) students: Arc<RwLock<HashMap<UniqueEntityId, StudentRecord>>>,
    pub(crate) attachments: Arc<RwLock<HashMap<UniqueEntityId, AttachmentRecord>>>,
    pub(crate) questions: Arc<RwLock<Vec<QuestionRecord>>>,
    pub(crate) question_attachments: Arc<RwLock<Vec<AttachmentLinkRecord>>>,
    pub(crate) answers: Arc<RwLock<Vec<AnswerRecord>>>,
    pub(crate) answer_attachments: Arc<RwLock<Vec<AttachmentLinkRecord>>>,
    pub(crate) question_comments: Arc<RwLock<Vec<CommentRecord>>>,
    pub(crate) answer_comments: Arc<RwLock<Vec<CommentRecord>>>,
    pub(crate) notifications: Arc<RwLock<Vec<NotificationRecord>>>,
    available: Arc<AtomicBool>,
}

impl InMemoryDatabase {
    /// Creates an empty, reachable database.
    pub fn new() -> Self {
        Self {
            students: Arc::default(),
            attachments: Arc::default(),
            questions: Arc::default(),
            question_attachments: Arc::default(),
            answers: Arc::default(),
            answer_attachments: Arc::default(),
            question_comments: Arc::default(),
            answer_comments: Arc::default(),
            notifications: Arc::default(),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Simulates the store going offline (`false`) or coming back (`true`).
    ///
    /// While offline every repository call fails with
    /// [`StorageError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    pub(crate) fn ensure_available(&self) -> Result<(), StorageError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(StorageError::Unavailable("primary store is offline".into()))
        }
    }

    pub async fn question_count(&self) -> usize {
        self.questions.read().await.len()
    }

    pub async fn answer_count(&self) -> usize {
        self.answers.read().await.len()
    }

    pub async fn comment_count(&self) -> usize {
        self.question_comments.read().await.len() + self.answer_comments.read().await.len()
    }

    pub async fn notification_count(&self) -> usize {
        self.notifications.read().await.len()
    }
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies an attachment-link diff to a link table.
pub(crate) fn apply_link_diff(
    table: &mut Vec<AttachmentLinkRecord>,
    added: impl IntoIterator<Item = AttachmentLinkRecord>,
    removed: &[AttachmentLinkRecord],
) {
    table.retain(|link| !removed.contains(link));
    for link in added {
        if !table.contains(&link) {
            table.push(link);
        }
    }
}

/// Attachment ids linked to `owner_id`, in link order.
pub(crate) fn linked_attachment_ids(
    table: &[AttachmentLinkRecord],
    owner_id: UniqueEntityId,
) -> Vec<UniqueEntityId> {
    table
        .iter()
        .filter(|link| link.owner_id == owner_id)
        .map(|link| link.attachment_id)
        .collect()
}
