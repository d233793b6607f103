use std::sync::Arc;

use app::{Config, Forum};
use cache::CacheRepository;
use domain::commands::{
    AnswerQuestion, ChooseBestAnswer, CreateQuestion, DeleteQuestion, EditQuestion,
    ReadNotification, RegisterStudent,
};
use domain::{
    AnswerCreated, Attachment, AttachmentsRepository, ErrorKind, ForumEvent, QuestionDetails,
    Student,
};
use events::{AggregateRoot, HandlerError, handler_fn};

const DETAILS_KEY: &str = "question:example:details";

async fn register(forum: &Forum, name: &str) -> Student {
    forum
        .student_service
        .register_student(RegisterStudent::new(
            name,
            format!("{}@example.com", name.to_lowercase()),
        ))
        .await
        .unwrap()
}

async fn forum_with_example() -> (Forum, Student, domain::Question) {
    let forum = Forum::new(&Config::default());
    let alice = register(&forum, "Alice").await;
    let question = forum
        .question_service
        .create_question(CreateQuestion::new(
            alice.id(),
            "Example",
            "How do I share state between tasks?",
        ))
        .await
        .unwrap();
    (forum, alice, question)
}

#[tokio::test]
async fn question_details_are_served_and_cached_under_slug_key() {
    let (forum, alice, question) = forum_with_example().await;
    assert_eq!(question.slug().as_str(), "example");

    let details = forum
        .question_service
        .get_question_by_slug("example")
        .await
        .unwrap();

    assert_eq!(details.title, "Example");
    assert_eq!(details.author.name, "Alice");
    assert_eq!(details.author.id, alice.id());
    assert!(details.attachments.is_empty());

    let raw = forum.cache.get(DETAILS_KEY).await.unwrap().unwrap();
    let cached: QuestionDetails = serde_json::from_str(&raw).unwrap();
    assert_eq!(cached, details);
}

#[tokio::test]
async fn answering_notifies_question_author_exactly_once() {
    let (forum, alice, question) = forum_with_example().await;
    let bob = register(&forum, "Bob").await;

    let answer = forum
        .answer_service
        .answer_question(AnswerQuestion::new(
            bob.id(),
            question.id(),
            "Wrap it in an Arc<Mutex<_>>.",
        ))
        .await
        .unwrap();
    assert!(answer.pending_events().is_empty());

    let inbox = forum
        .notification_service
        .fetch_recipient_notifications(alice.id())
        .await
        .unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].title(), "New answer on \"Example...\"");
    assert_eq!(inbox[0].content(), answer.excerpt());
    assert_eq!(
        inbox[0].idempotency_key(),
        Some(format!("AnswerCreated:{}", answer.id()).as_str())
    );

    // Redelivering the same event does not notify twice.
    let replay = ForumEvent::AnswerCreated(AnswerCreated {
        answer_id: answer.id(),
        question_id: question.id(),
        author_id: bob.id(),
        excerpt: answer.excerpt(),
        occurred_at: answer.created_at(),
    });
    forum.dispatcher.dispatch_events(vec![replay]).await.unwrap();

    assert_eq!(forum.db.notification_count().await, 1);
}

#[tokio::test]
async fn editing_deletes_stale_cache_entry() {
    let (forum, alice, question) = forum_with_example().await;
    forum
        .cache
        .set(DETAILS_KEY, "stale-sentinel".into(), None)
        .await
        .unwrap();

    forum
        .question_service
        .edit_question(EditQuestion::new(
            alice.id(),
            question.id(),
            "Example (edited)",
            "Updated body",
        ))
        .await
        .unwrap();

    assert!(forum.cache.get(DETAILS_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn read_after_edit_is_never_the_cached_value() {
    let (forum, alice, question) = forum_with_example().await;
    forum
        .question_service
        .get_question_by_slug("example")
        .await
        .unwrap();

    forum
        .question_service
        .edit_question(EditQuestion::new(
            alice.id(),
            question.id(),
            "Example (edited)",
            "Updated body",
        ))
        .await
        .unwrap();
    let details = forum
        .question_service
        .get_question_by_slug("example")
        .await
        .unwrap();

    assert_eq!(details.title, "Example (edited)");
    assert_eq!(details.content, "Updated body");
    assert!(details.updated_at.is_some());
}

#[tokio::test]
async fn disabled_dispatch_sends_no_notifications() {
    let config = Config {
        domain_events_enabled: false,
        ..Config::default()
    };
    let forum = Forum::new(&config);
    let alice = register(&forum, "Alice").await;
    let bob = register(&forum, "Bob").await;
    let question = forum
        .question_service
        .create_question(CreateQuestion::new(alice.id(), "Example", "body"))
        .await
        .unwrap();

    let answer = forum
        .answer_service
        .answer_question(AnswerQuestion::new(bob.id(), question.id(), "answer"))
        .await
        .unwrap();

    assert!(answer.pending_events().is_empty());
    assert_eq!(forum.db.answer_count().await, 1);
    assert_eq!(forum.db.notification_count().await, 0);
}

#[tokio::test]
async fn store_outage_fails_the_write_and_keeps_cache() {
    let (forum, alice, question) = forum_with_example().await;
    forum
        .question_service
        .get_question_by_slug("example")
        .await
        .unwrap();

    forum.db.set_available(false);
    let err = forum
        .question_service
        .edit_question(EditQuestion::new(
            alice.id(),
            question.id(),
            "Never stored",
            "body",
        ))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Storage);
    assert!(forum.cache.get(DETAILS_KEY).await.unwrap().is_some());

    forum.db.set_available(true);
    let details = forum
        .question_service
        .get_question_by_slug("example")
        .await
        .unwrap();
    assert_eq!(details.title, "Example");
}

#[tokio::test]
async fn choosing_best_answer_notifies_answer_author_once() {
    let (forum, alice, question) = forum_with_example().await;
    let bob = register(&forum, "Bob").await;
    let answer = forum
        .answer_service
        .answer_question(AnswerQuestion::new(bob.id(), question.id(), "answer"))
        .await
        .unwrap();

    for _ in 0..2 {
        forum
            .question_service
            .choose_best_answer(ChooseBestAnswer::new(alice.id(), answer.id()))
            .await
            .unwrap();
    }

    let inbox = forum
        .notification_service
        .fetch_recipient_notifications(bob.id())
        .await
        .unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].title(), "Your answer was chosen!");

    let details = forum
        .question_service
        .get_question_by_slug("example")
        .await
        .unwrap();
    assert_eq!(details.best_answer_id, Some(answer.id()));
}

#[tokio::test]
async fn only_question_author_may_choose_best_answer() {
    let (forum, _alice, question) = forum_with_example().await;
    let bob = register(&forum, "Bob").await;
    let answer = forum
        .answer_service
        .answer_question(AnswerQuestion::new(bob.id(), question.id(), "answer"))
        .await
        .unwrap();

    let err = forum
        .question_service
        .choose_best_answer(ChooseBestAnswer::new(bob.id(), answer.id()))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotAllowed);
}

#[tokio::test]
async fn only_author_may_edit_or_delete() {
    let (forum, _alice, question) = forum_with_example().await;
    let bob = register(&forum, "Bob").await;

    let err = forum
        .question_service
        .edit_question(EditQuestion::new(bob.id(), question.id(), "Mine now", "body"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotAllowed);

    let err = forum
        .question_service
        .delete_question(DeleteQuestion::new(bob.id(), question.id()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotAllowed);
}

#[tokio::test]
async fn deleted_question_is_not_found() {
    let (forum, alice, question) = forum_with_example().await;
    forum
        .question_service
        .get_question_by_slug("example")
        .await
        .unwrap();

    forum
        .question_service
        .delete_question(DeleteQuestion::new(alice.id(), question.id()))
        .await
        .unwrap();

    let err = forum
        .question_service
        .get_question_by_slug("example")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(forum.cache.get(DETAILS_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn registering_a_taken_email_conflicts() {
    let forum = Forum::new(&Config::default());
    register(&forum, "Alice").await;

    let err = forum
        .student_service
        .register_student(RegisterStudent::new("Other Alice", "alice@example.com"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn invalid_question_input_is_rejected() {
    let forum = Forum::new(&Config::default());
    let alice = register(&forum, "Alice").await;

    let err = forum
        .question_service
        .create_question(CreateQuestion::new(alice.id(), "   ", "body"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = forum
        .question_service
        .create_question(
            CreateQuestion::new(alice.id(), "Example", "body")
                .with_attachments(vec![common::UniqueEntityId::new()]),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(forum.db.question_count().await, 0);
}

#[tokio::test]
async fn question_attachments_appear_in_details() {
    let forum = Forum::new(&Config::default());
    let alice = register(&forum, "Alice").await;
    let attachment = Attachment::create("stack trace", "https://files.example/trace.txt");
    forum.attachments.create(&attachment).await.unwrap();

    forum
        .question_service
        .create_question(
            CreateQuestion::new(alice.id(), "Example", "body")
                .with_attachments(vec![attachment.id()]),
        )
        .await
        .unwrap();

    let details = forum
        .question_service
        .get_question_by_slug("example")
        .await
        .unwrap();
    assert_eq!(details.attachments.len(), 1);
    assert_eq!(details.attachments[0].title, "stack trace");
}

#[tokio::test]
async fn only_recipient_may_read_a_notification() {
    let (forum, alice, question) = forum_with_example().await;
    let bob = register(&forum, "Bob").await;
    forum
        .answer_service
        .answer_question(AnswerQuestion::new(bob.id(), question.id(), "answer"))
        .await
        .unwrap();
    let notification = forum
        .notification_service
        .fetch_recipient_notifications(alice.id())
        .await
        .unwrap()
        .remove(0);

    let err = forum
        .notification_service
        .read_notification(ReadNotification::new(bob.id(), notification.id()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotAllowed);

    let read = forum
        .notification_service
        .read_notification(ReadNotification::new(alice.id(), notification.id()))
        .await
        .unwrap();
    assert!(read.is_read());
}

#[tokio::test]
async fn failing_subscriber_surfaces_after_commit() {
    let (forum, _alice, question) = forum_with_example().await;
    let bob = register(&forum, "Bob").await;
    forum.dispatcher.register(
        AnswerCreated::KIND,
        Arc::new(handler_fn("audit", |_event: ForumEvent| async {
            Err::<(), HandlerError>("audit log unavailable".into())
        })),
    );

    let err = forum
        .answer_service
        .answer_question(AnswerQuestion::new(bob.id(), question.id(), "answer"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EventDispatch);
    assert_eq!(forum.db.answer_count().await, 1);
    // Subscribers registered earlier already ran.
    assert_eq!(forum.db.notification_count().await, 1);
}
