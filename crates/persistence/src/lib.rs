//! In-memory primary store and repository implementations.
//!
//! The questions repository is the cache-consistent one: it serves the
//! question details view read-through from a [`cache::CacheRepository`] and
//! invalidates it on every write before dispatching events.

pub mod database;
pub mod mappers;
pub mod records;
pub mod repositories;

pub use database::InMemoryDatabase;
pub use repositories::{
    InMemoryAnswerCommentsRepository, InMemoryAnswersRepository, InMemoryAttachmentsRepository,
    InMemoryNotificationsRepository, InMemoryQuestionCommentsRepository,
    InMemoryQuestionsRepository, InMemoryStudentsRepository,
};
