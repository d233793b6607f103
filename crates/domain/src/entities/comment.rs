//! Comments on questions and answers.
//!
//! Comments carry no attachments and record no events of their own, but they
//! are aggregates so their writes go through the same persist-then-dispatch
//! pipeline as every other write.

use chrono::{DateTime, Utc};
use common::UniqueEntityId;
use events::{AggregateRoot, EventQueue};

use crate::events::ForumEvent;

/// Stored state shared by both comment kinds.
#[derive(Debug, Clone)]
pub struct CommentProps {
    pub author_id: UniqueEntityId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CommentProps {
    fn new(author_id: UniqueEntityId, content: String) -> Self {
        Self {
            author_id,
            content,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Comment posted under a question.
#[derive(Debug, Clone)]
pub struct QuestionComment {
    id: UniqueEntityId,
    question_id: UniqueEntityId,
    props: CommentProps,
    events: EventQueue<ForumEvent>,
}

impl AggregateRoot for QuestionComment {
    type Event = ForumEvent;

    fn aggregate_type() -> &'static str {
        "QuestionComment"
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

impl QuestionComment {
    pub fn create(
        author_id: UniqueEntityId,
        question_id: UniqueEntityId,
        content: impl Into<String>,
    ) -> Self {
        Self::restore(
            UniqueEntityId::new(),
            question_id,
            CommentProps::new(author_id, content.into()),
        )
    }

    /// Rebuilds a comment from storage.
    pub fn restore(id: UniqueEntityId, question_id: UniqueEntityId, props: CommentProps) -> Self {
        Self {
            id,
            question_id,
            props,
            events: EventQueue::new(),
        }
    }

    pub fn question_id(&self) -> UniqueEntityId {
        self.question_id
    }

    pub fn author_id(&self) -> UniqueEntityId {
        self.props.author_id
    }

    pub fn content(&self) -> &str {
        &self.props.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.props.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.props.updated_at
    }

    pub fn is_authored_by(&self, student_id: UniqueEntityId) -> bool {
        self.props.author_id == student_id
    }
}

/// Comment posted under an answer.
#[derive(Debug, Clone)]
pub struct AnswerComment {
    id: UniqueEntityId,
    answer_id: UniqueEntityId,
    props: CommentProps,
    events: EventQueue<ForumEvent>,
}

impl AggregateRoot for AnswerComment {
    type Event = ForumEvent;

    fn aggregate_type() -> &'static str {
        "AnswerComment"
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

impl AnswerComment {
    pub fn create(
        author_id: UniqueEntityId,
        answer_id: UniqueEntityId,
        content: impl Into<String>,
    ) -> Self {
        Self::restore(
            UniqueEntityId::new(),
            answer_id,
            CommentProps::new(author_id, content.into()),
        )
    }

    pub fn restore(id: UniqueEntityId, answer_id: UniqueEntityId, props: CommentProps) -> Self {
        Self {
            id,
            answer_id,
            props,
            events: EventQueue::new(),
        }
    }

    pub fn answer_id(&self) -> UniqueEntityId {
        self.answer_id
    }

    pub fn author_id(&self) -> UniqueEntityId {
        self.props.author_id
    }

    pub fn content(&self) -> &str {
        &self.props.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.props.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.props.updated_at
    }

    pub fn is_authored_by(&self, student_id: UniqueEntityId) -> bool {
        self.props.author_id == student_id
    }
}
