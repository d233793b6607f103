//! Forum domain layer.
//!
//! This crate provides:
//! - Question, Answer, comment and Notification aggregates and their events
//! - The `QuestionDetails` and `CommentWithAuthor` read views
//! - Repository contracts implemented by the persistence layer
//! - Use-case services and the event subscribers wired at start-up

pub mod commands;
pub mod entities;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;
pub mod subscribers;
pub mod views;

pub use entities::{
    Answer, AnswerAttachment, AnswerAttachmentList, AnswerComment, AnswerProps, Attachment,
    CommentProps, Notification, NotificationProps, Question, QuestionAttachment,
    QuestionAttachmentList, QuestionComment, QuestionProps, Student,
};
pub use error::{DomainError, DomainResult, ErrorKind, StorageError};
pub use self::events::{AnswerCreated, ForumEvent, QuestionBestAnswerChosen};
pub use repositories::{
    AnswerCommentsRepository, AnswersRepository, AttachmentsRepository, NotificationsRepository,
    PaginationParams, QuestionCommentsRepository, QuestionsRepository, StudentsRepository,
};
pub use services::{
    AnswerService, CommentService, NotificationService, QuestionService, StudentService,
};
pub use subscribers::{OnAnswerCreated, OnQuestionBestAnswerChosen, register_subscribers};
pub use views::{AttachmentSummary, AuthorSummary, CommentWithAuthor, QuestionDetails};
