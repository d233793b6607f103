//! Answer aggregate.

use chrono::{DateTime, Utc};
use common::{UniqueEntityId, WatchedList};
use events::{AggregateRoot, EventQueue};

use crate::events::{AnswerCreated, ForumEvent};

use super::{EXCERPT_CHARS, excerpt};

/// Link between an answer and one of its attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnswerAttachment {
    pub answer_id: UniqueEntityId,
    pub attachment_id: UniqueEntityId,
}

pub type AnswerAttachmentList = WatchedList<AnswerAttachment>;

/// Stored state of an answer.
#[derive(Debug, Clone)]
pub struct AnswerProps {
    pub author_id: UniqueEntityId,
    pub question_id: UniqueEntityId,
    pub content: String,
    pub attachments: Vec<AnswerAttachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Answer aggregate root.
#[derive(Debug, Clone)]
pub struct Answer {
    id: UniqueEntityId,
    author_id: UniqueEntityId,
    question_id: UniqueEntityId,
    content: String,
    attachments: AnswerAttachmentList,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    events: EventQueue<ForumEvent>,
}

impl AggregateRoot for Answer {
    type Event = ForumEvent;

    fn aggregate_type() -> &'static str {
        "Answer"
    }

    fn id(&self) -> UniqueEntityId {
        self.id
    }

    fn events(&self) -> &EventQueue<ForumEvent> {
        &self.events
    }

    fn events_mut(&mut self) -> &mut EventQueue<ForumEvent> {
        &mut self.events
    }
}

impl Answer {
    /// Creates a new answer and records `AnswerCreated`.
    pub fn create(
        author_id: UniqueEntityId,
        question_id: UniqueEntityId,
        content: impl Into<String>,
        attachment_ids: &[UniqueEntityId],
    ) -> Self {
        let id = UniqueEntityId::new();
        let links = attachment_ids
            .iter()
            .map(|&attachment_id| AnswerAttachment {
                answer_id: id,
                attachment_id,
            })
            .collect();

        let mut answer = Self {
            id,
            author_id,
            question_id,
            content: content.into(),
            attachments: AnswerAttachmentList::default(),
            created_at: Utc::now(),
            updated_at: None,
            events: EventQueue::new(),
        };
        answer.attachments.update(links);

        let event = AnswerCreated {
            answer_id: id,
            question_id,
            author_id,
            excerpt: answer.excerpt(),
            occurred_at: answer.created_at,
        };
        answer.record(ForumEvent::AnswerCreated(event));
        answer
    }

    /// Rebuilds an answer from storage. Records no events.
    pub fn restore(id: UniqueEntityId, props: AnswerProps) -> Self {
        Self {
            id,
            author_id: props.author_id,
            question_id: props.question_id,
            content: props.content,
            attachments: AnswerAttachmentList::new(props.attachments),
            created_at: props.created_at,
            updated_at: props.updated_at,
            events: EventQueue::new(),
        }
    }

    pub fn author_id(&self) -> UniqueEntityId {
        self.author_id
    }

    pub fn question_id(&self) -> UniqueEntityId {
        self.question_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn attachments(&self) -> &AnswerAttachmentList {
        &self.attachments
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn excerpt(&self) -> String {
        excerpt(&self.content, EXCERPT_CHARS)
    }

    pub fn is_authored_by(&self, student_id: UniqueEntityId) -> bool {
        self.author_id == student_id
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.updated_at = Some(Utc::now());
    }

    pub fn set_attachments(&mut self, attachment_ids: &[UniqueEntityId]) {
        let links = attachment_ids
            .iter()
            .map(|&attachment_id| AnswerAttachment {
                answer_id: self.id,
                attachment_id,
            })
            .collect();
        self.attachments.update(links);
        self.updated_at = Some(Utc::now());
    }

    pub fn commit_attachments(&mut self) {
        self.attachments.commit();
    }
}
