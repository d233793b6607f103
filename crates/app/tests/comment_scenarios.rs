use app::{Config, Forum};
use common::UniqueEntityId;
use domain::commands::{
    AnswerQuestion, CommentOnAnswer, CommentOnQuestion, CreateQuestion, DeleteAnswerComment,
    DeleteQuestionComment, RegisterStudent,
};
use domain::{
    Answer, ErrorKind, PaginationParams, Question, QuestionCommentsRepository, Student,
};
use events::AggregateRoot;

struct Thread {
    forum: Forum,
    alice: Student,
    bob: Student,
    question: Question,
    answer: Answer,
}

async fn thread() -> Thread {
    let forum = Forum::new(&Config::default());
    let alice = forum
        .student_service
        .register_student(RegisterStudent::new("Alice", "alice@example.com"))
        .await
        .unwrap();
    let bob = forum
        .student_service
        .register_student(RegisterStudent::new("Bob", "bob@example.com"))
        .await
        .unwrap();
    let question = forum
        .question_service
        .create_question(CreateQuestion::new(alice.id(), "Example", "body"))
        .await
        .unwrap();
    let answer = forum
        .answer_service
        .answer_question(AnswerQuestion::new(bob.id(), question.id(), "Use Arc."))
        .await
        .unwrap();

    Thread {
        forum,
        alice,
        bob,
        question,
        answer,
    }
}

#[tokio::test]
async fn question_comments_are_listed_with_their_authors() {
    let t = thread().await;
    for (author, content) in [(&t.alice, "Comment 1"), (&t.bob, "Comment 2")] {
        t.forum
            .comment_service
            .comment_on_question(CommentOnQuestion::new(author.id(), t.question.id(), content))
            .await
            .unwrap();
    }

    let comments = t
        .forum
        .comment_service
        .fetch_question_comments(t.question.id(), PaginationParams::default())
        .await
        .unwrap();

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].content, "Comment 2");
    assert_eq!(comments[0].author.name, "Bob");
    assert_eq!(comments[1].author.id, t.alice.id());
}

#[tokio::test]
async fn answer_comments_are_listed_with_their_authors() {
    let t = thread().await;
    let comment = t
        .forum
        .comment_service
        .comment_on_answer(CommentOnAnswer::new(t.alice.id(), t.answer.id(), "Thanks!"))
        .await
        .unwrap();

    let comments = t
        .forum
        .comment_service
        .fetch_answer_comments(t.answer.id(), PaginationParams::default())
        .await
        .unwrap();

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].comment_id, comment.id());
    assert_eq!(comments[0].author.name, "Alice");
}

#[tokio::test]
async fn commenting_on_missing_targets_is_not_found() {
    let t = thread().await;

    let on_question = t
        .forum
        .comment_service
        .comment_on_question(CommentOnQuestion::new(
            t.alice.id(),
            UniqueEntityId::new(),
            "hello?",
        ))
        .await
        .unwrap_err();
    let on_answer = t
        .forum
        .comment_service
        .comment_on_answer(CommentOnAnswer::new(
            t.alice.id(),
            UniqueEntityId::new(),
            "hello?",
        ))
        .await
        .unwrap_err();

    assert_eq!(on_question.kind(), ErrorKind::NotFound);
    assert_eq!(on_answer.kind(), ErrorKind::NotFound);
    assert_eq!(t.forum.db.comment_count().await, 0);
}

#[tokio::test]
async fn blank_comment_is_rejected() {
    let t = thread().await;

    let err = t
        .forum
        .comment_service
        .comment_on_question(CommentOnQuestion::new(t.alice.id(), t.question.id(), "  "))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn only_the_author_deletes_a_question_comment() {
    let t = thread().await;
    let comment = t
        .forum
        .comment_service
        .comment_on_question(CommentOnQuestion::new(t.bob.id(), t.question.id(), "Nice"))
        .await
        .unwrap();

    let err = t
        .forum
        .comment_service
        .delete_question_comment(DeleteQuestionComment::new(t.alice.id(), comment.id()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotAllowed);

    t.forum
        .comment_service
        .delete_question_comment(DeleteQuestionComment::new(t.bob.id(), comment.id()))
        .await
        .unwrap();
    assert!(
        t.forum
            .question_comments
            .find_by_id(comment.id())
            .await
            .unwrap()
            .is_none()
    );

    let again = t
        .forum
        .comment_service
        .delete_question_comment(DeleteQuestionComment::new(t.bob.id(), comment.id()))
        .await
        .unwrap_err();
    assert_eq!(again.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn deleting_an_answer_comment_leaves_the_others() {
    let t = thread().await;
    let kept = t
        .forum
        .comment_service
        .comment_on_answer(CommentOnAnswer::new(t.bob.id(), t.answer.id(), "kept"))
        .await
        .unwrap();
    let dropped = t
        .forum
        .comment_service
        .comment_on_answer(CommentOnAnswer::new(t.alice.id(), t.answer.id(), "dropped"))
        .await
        .unwrap();

    t.forum
        .comment_service
        .delete_answer_comment(DeleteAnswerComment::new(t.alice.id(), dropped.id()))
        .await
        .unwrap();

    let left = t
        .forum
        .comment_service
        .fetch_answer_comments(t.answer.id(), PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].comment_id, kept.id());
}

#[tokio::test]
async fn comment_writes_fail_while_the_store_is_offline() {
    let t = thread().await;
    t.forum.db.set_available(false);

    let err = t
        .forum
        .comment_service
        .comment_on_question(CommentOnQuestion::new(t.alice.id(), t.question.id(), "hi"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Storage);
    t.forum.db.set_available(true);
    assert_eq!(t.forum.db.comment_count().await, 0);
}
