mod answers;
mod attachments;
mod comments;
mod notifications;
mod questions;
mod students;

pub use answers::InMemoryAnswersRepository;
pub use attachments::InMemoryAttachmentsRepository;
pub use comments::{InMemoryAnswerCommentsRepository, InMemoryQuestionCommentsRepository};
pub use notifications::InMemoryNotificationsRepository;
pub use questions::InMemoryQuestionsRepository;
pub use students::InMemoryStudentsRepository;

use domain::PaginationParams;

/// Sorts rows newest first and cuts out one page.
///
/// Rows arrive in insertion order; ties on the timestamp keep the most
/// recently inserted row first.
pub(crate) fn newest_first_page<T, K, F>(rows: Vec<T>, params: PaginationParams, key: F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut rows: Vec<T> = rows.into_iter().rev().collect();
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    rows.into_iter()
        .skip(params.offset())
        .take(params.limit())
        .collect()
}
