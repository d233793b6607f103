//! Shared identity and value-object types for the forum core.

pub mod slug;
pub mod types;
pub mod watched_list;

pub use slug::Slug;
pub use types::UniqueEntityId;
pub use watched_list::WatchedList;
