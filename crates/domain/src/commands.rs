//! Use-case inputs.

use common::UniqueEntityId;

/// Command to register a new student.
#[derive(Debug, Clone)]
pub struct RegisterStudent {
    pub name: String,
    pub email: String,
}

impl RegisterStudent {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Command to post a new question.
#[derive(Debug, Clone)]
pub struct CreateQuestion {
    pub author_id: UniqueEntityId,
    pub title: String,
    pub content: String,

    /// Attachments to link, in display order. Each must already exist.
    pub attachment_ids: Vec<UniqueEntityId>,
}

impl CreateQuestion {
    pub fn new(
        author_id: UniqueEntityId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author_id,
            title: title.into(),
            content: content.into(),
            attachment_ids: Vec::new(),
        }
    }

    pub fn with_attachments(mut self, attachment_ids: Vec<UniqueEntityId>) -> Self {
        self.attachment_ids = attachment_ids;
        self
    }
}

/// Command to edit a question. The attachment list is replaced wholesale.
#[derive(Debug, Clone)]
pub struct EditQuestion {
    pub author_id: UniqueEntityId,
    pub question_id: UniqueEntityId,
    pub title: String,
    pub content: String,
    pub attachment_ids: Vec<UniqueEntityId>,
}

impl EditQuestion {
    pub fn new(
        author_id: UniqueEntityId,
        question_id: UniqueEntityId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author_id,
            question_id,
            title: title.into(),
            content: content.into(),
            attachment_ids: Vec::new(),
        }
    }

    pub fn with_attachments(mut self, attachment_ids: Vec<UniqueEntityId>) -> Self {
        self.attachment_ids = attachment_ids;
        self
    }
}

/// Command issued by a question's author to pick the best answer.
#[derive(Debug, Clone, Copy)]
pub struct ChooseBestAnswer {
    pub author_id: UniqueEntityId,
    pub answer_id: UniqueEntityId,
}

impl ChooseBestAnswer {
    pub fn new(author_id: UniqueEntityId, answer_id: UniqueEntityId) -> Self {
        Self {
            author_id,
            answer_id,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteQuestion {
    pub author_id: UniqueEntityId,
    pub question_id: UniqueEntityId,
}

impl DeleteQuestion {
    pub fn new(author_id: UniqueEntityId, question_id: UniqueEntityId) -> Self {
        Self {
            author_id,
            question_id,
        }
    }
}

/// Command to post an answer on a question.
#[derive(Debug, Clone)]
pub struct AnswerQuestion {
    pub author_id: UniqueEntityId,
    pub question_id: UniqueEntityId,
    pub content: String,
    pub attachment_ids: Vec<UniqueEntityId>,
}

impl AnswerQuestion {
    pub fn new(
        author_id: UniqueEntityId,
        question_id: UniqueEntityId,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author_id,
            question_id,
            content: content.into(),
            attachment_ids: Vec::new(),
        }
    }

    pub fn with_attachments(mut self, attachment_ids: Vec<UniqueEntityId>) -> Self {
        self.attachment_ids = attachment_ids;
        self
    }
}

#[derive(Debug, Clone)]
pub struct EditAnswer {
    pub author_id: UniqueEntityId,
    pub answer_id: UniqueEntityId,
    pub content: String,
    pub attachment_ids: Vec<UniqueEntityId>,
}

impl EditAnswer {
    pub fn new(
        author_id: UniqueEntityId,
        answer_id: UniqueEntityId,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author_id,
            answer_id,
            content: content.into(),
            attachment_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteAnswer {
    pub author_id: UniqueEntityId,
    pub answer_id: UniqueEntityId,
}

impl DeleteAnswer {
    pub fn new(author_id: UniqueEntityId, answer_id: UniqueEntityId) -> Self {
        Self {
            author_id,
            answer_id,
        }
    }
}

/// Command to comment on a question.
#[derive(Debug, Clone)]
pub struct CommentOnQuestion {
    pub author_id: UniqueEntityId,
    pub question_id: UniqueEntityId,
    pub content: String,
}

impl CommentOnQuestion {
    pub fn new(
        author_id: UniqueEntityId,
        question_id: UniqueEntityId,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author_id,
            question_id,
            content: content.into(),
        }
    }
}

/// Command to comment on an answer.
#[derive(Debug, Clone)]
pub struct CommentOnAnswer {
    pub author_id: UniqueEntityId,
    pub answer_id: UniqueEntityId,
    pub content: String,
}

impl CommentOnAnswer {
    pub fn new(
        author_id: UniqueEntityId,
        answer_id: UniqueEntityId,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author_id,
            answer_id,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteQuestionComment {
    pub author_id: UniqueEntityId,
    pub question_comment_id: UniqueEntityId,
}

impl DeleteQuestionComment {
    pub fn new(author_id: UniqueEntityId, question_comment_id: UniqueEntityId) -> Self {
        Self {
            author_id,
            question_comment_id,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteAnswerComment {
    pub author_id: UniqueEntityId,
    pub answer_comment_id: UniqueEntityId,
}

impl DeleteAnswerComment {
    pub fn new(author_id: UniqueEntityId, answer_comment_id: UniqueEntityId) -> Self {
        Self {
            author_id,
            answer_comment_id,
        }
    }
}

/// Command to notify a student.
#[derive(Debug, Clone)]
pub struct SendNotification {
    pub recipient_id: UniqueEntityId,
    pub title: String,
    pub content: String,

    /// When set, a second send with the same key returns the first
    /// notification instead of creating another.
    pub idempotency_key: Option<String>,
}

impl SendNotification {
    pub fn new(
        recipient_id: UniqueEntityId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            recipient_id,
            title: title.into(),
            content: content.into(),
            idempotency_key: None,
        }
    }

    pub fn idempotent(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReadNotification {
    pub recipient_id: UniqueEntityId,
    pub notification_id: UniqueEntityId,
}

impl ReadNotification {
    pub fn new(recipient_id: UniqueEntityId, notification_id: UniqueEntityId) -> Self {
        Self {
            recipient_id,
            notification_id,
        }
    }
}
