//! Question aggregate.

use chrono::{DateTime, Utc};
use common::{Slug, UniqueEntityId, WatchedList};
use events::{AggregateRoot, EventQueue};

use crate::events::{ForumEvent, QuestionBestAnswerChosen};

use super::{EXCERPT_CHARS, excerpt};

/// Link between a question and one of its attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestionAttachment {
    pub question_id: UniqueEntityId,
    pub attachment_id: UniqueEntityId,
}

/// Attachment links of a question, tracking additions and removals.
pub type QuestionAttachmentList = WatchedList<QuestionAttachment>;

/// Stored state of a question, used to rebuild the aggregate.
#[derive(Debug, Clone)]
pub struct QuestionProps {
    pub author_id: UniqueEntityId,
    pub best_answer_id: Option<UniqueEntityId>,
    pub title: String,
    pub content: String,
    pub slug: Slug,
    pub attachments: Vec<QuestionAttachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Question aggregate root.
///
/// The slug is assigned once at creation and stays stable across title
/// edits, so cached views keyed by slug can always be found and invalidated.
#[derive(Debug, Clone)]
pub struct Question {
    id: UniqueEntityId,
    author_id: UniqueEntityId,
    best_answer_id: Option<UniqueEntityId>,
    title: String,
    content: String,
    slug: Slug,
    attachments: QuestionAttachmentList,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    events: EventQueue<ForumEvent>,
}

impl AggregateRoot for Question {
    type Event = ForumEvent;

    fn aggregate_type() -> &'static str {
        "Question"
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

impl Question {
    /// Creates a new question. The slug is derived from the title unless one
    /// is supplied.
    pub fn create(
        author_id: UniqueEntityId,
        title: impl Into<String>,
        content: impl Into<String>,
        slug: Option<Slug>,
    ) -> Self {
        let title = title.into();
        let slug = slug.unwrap_or_else(|| Slug::from_text(&title));
        Self {
            id: UniqueEntityId::new(),
            author_id,
            best_answer_id: None,
            title,
            content: content.into(),
            slug,
            attachments: QuestionAttachmentList::default(),
            created_at: Utc::now(),
            updated_at: None,
            events: EventQueue::new(),
        }
    }

    /// Rebuilds a question from storage. Records no events.
    pub fn restore(id: UniqueEntityId, props: QuestionProps) -> Self {
        Self {
            id,
            author_id: props.author_id,
            best_answer_id: props.best_answer_id,
            title: props.title,
            content: props.content,
            slug: props.slug,
            attachments: QuestionAttachmentList::new(props.attachments),
            created_at: props.created_at,
            updated_at: props.updated_at,
            events: EventQueue::new(),
        }
    }
}

// Query methods
impl Question {
    pub fn author_id(&self) -> UniqueEntityId {
        self.author_id
    }

    pub fn best_answer_id(&self) -> Option<UniqueEntityId> {
        self.best_answer_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn attachments(&self) -> &QuestionAttachmentList {
        &self.attachments
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Attachment ids in list order.
    pub fn attachment_ids(&self) -> Vec<UniqueEntityId> {
        self.attachments
            .items()
            .iter()
            .map(|link| link.attachment_id)
            .collect()
    }

    pub fn excerpt(&self) -> String {
        excerpt(&self.content, EXCERPT_CHARS)
    }

    /// Returns true if the question was posted at most three whole days ago.
    pub fn is_new(&self) -> bool {
        Utc::now().signed_duration_since(self.created_at).num_days() <= 3
    }

    pub fn is_authored_by(&self, student_id: UniqueEntityId) -> bool {
        self.author_id == student_id
    }
}

// Mutations
impl Question {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.touch();
    }

    /// Replaces the attachment list with `attachment_ids`.
    pub fn set_attachments(&mut self, attachment_ids: &[UniqueEntityId]) {
        self.attachments.update(self.links_for(attachment_ids));
        self.touch();
    }

    /// Links attachments to a question that was just created.
    pub fn with_attachments(mut self, attachment_ids: &[UniqueEntityId]) -> Self {
        self.attachments.update(self.links_for(attachment_ids));
        self
    }

    /// Marks the attachment diff as persisted.
    pub fn commit_attachments(&mut self) {
        self.attachments.commit();
    }

    /// Picks the best answer. Records `QuestionBestAnswerChosen` only when
    /// the choice actually changes.
    pub fn choose_best_answer(&mut self, answer_id: UniqueEntityId) {
        if self.best_answer_id == Some(answer_id) {
            return;
        }

        self.best_answer_id = Some(answer_id);
        self.touch();
        self.record(ForumEvent::QuestionBestAnswerChosen(
            QuestionBestAnswerChosen {
                question_id: self.id,
                best_answer_id: answer_id,
                occurred_at: Utc::now(),
            },
        ));
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    fn links_for(&self, attachment_ids: &[UniqueEntityId]) -> Vec<QuestionAttachment> {
        attachment_ids
            .iter()
            .map(|&attachment_id| QuestionAttachment {
                question_id: self.id,
                attachment_id,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use events::DomainEvent;

    use super::*;

    fn question() -> Question {
        Question::create(UniqueEntityId::new(), "Example", "How do lifetimes work?", None)
    }

    #[test]
    fn create_derives_slug_from_title() {
        let q = Question::create(UniqueEntityId::new(), "An Example Title", "body", None);
        assert_eq!(q.slug().as_str(), "an-example-title");
        assert!(q.pending_events().is_empty());
    }

    #[test]
    fn create_keeps_supplied_slug() {
        let q = Question::create(
            UniqueEntityId::new(),
            "Example",
            "body",
            Some(Slug::new("custom-slug")),
        );
        assert_eq!(q.slug().as_str(), "custom-slug");
    }

    #[test]
    fn editing_title_keeps_slug_and_touches_updated_at() {
        let mut q = question();
        assert!(q.updated_at().is_none());

        q.set_title("Another title");

        assert_eq!(q.title(), "Another title");
        assert_eq!(q.slug().as_str(), "example");
        assert!(q.updated_at().is_some());
    }

    #[test]
    fn choosing_best_answer_records_event_once() {
        let mut q = question();
        let answer_id = UniqueEntityId::new();

        q.choose_best_answer(answer_id);
        q.choose_best_answer(answer_id);

        assert_eq!(q.best_answer_id(), Some(answer_id));
        assert_eq!(q.pending_events().len(), 1);
        let event = &q.pending_events()[0];
        assert_eq!(event.event_kind(), QuestionBestAnswerChosen::KIND);
        assert_eq!(event.aggregate_id(), q.id());
    }

    #[test]
    fn changing_best_answer_records_another_event() {
        let mut q = question();
        q.choose_best_answer(UniqueEntityId::new());
        q.choose_best_answer(UniqueEntityId::new());

        assert_eq!(q.pending_events().len(), 2);
    }

    #[test]
    fn set_attachments_tracks_diff() {
        let first = UniqueEntityId::new();
        let second = UniqueEntityId::new();
        let third = UniqueEntityId::new();
        let mut q = question();
        q.set_attachments(&[first, second]);
        q.commit_attachments();

        q.set_attachments(&[second, third]);

        let added: Vec<_> = q.attachments().new_items().iter().map(|l| l.attachment_id).collect();
        let removed: Vec<_> = q
            .attachments()
            .removed_items()
            .iter()
            .map(|l| l.attachment_id)
            .collect();
        assert_eq!(added, vec![third]);
        assert_eq!(removed, vec![first]);
        assert_eq!(q.attachment_ids(), vec![second, third]);
    }

    #[test]
    fn excerpt_and_is_new() {
        let long = "a".repeat(200);
        let q = Question::create(UniqueEntityId::new(), "Example", long, None);
        assert_eq!(q.excerpt().len(), 123);
        assert!(q.is_new());

        let old = Question::restore(
            UniqueEntityId::new(),
            QuestionProps {
                author_id: UniqueEntityId::new(),
                best_answer_id: None,
                title: "Old".into(),
                content: "old".into(),
                slug: Slug::new("old"),
                attachments: vec![],
                created_at: Utc::now() - Duration::days(5),
                updated_at: None,
            },
        );
        assert!(!old.is_new());
    }
}
