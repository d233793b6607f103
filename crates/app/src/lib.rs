//! Composition root for the forum core.
//!
//! [`Forum`] owns one primary store, one cache and one event dispatcher,
//! builds every repository and service on top of them and registers the
//! notification subscribers once.

pub mod config;
pub mod telemetry;

use std::sync::Arc;

use cache::{CacheRepository, InMemoryCacheRepository};
use domain::{
    AnswerCommentsRepository, AnswerService, AnswersRepository, AttachmentsRepository,
    CommentService, ForumEvent, NotificationService, NotificationsRepository,
    QuestionCommentsRepository, QuestionService, QuestionsRepository, StudentService,
    StudentsRepository, register_subscribers,
};
use events::EventDispatcher;
use persistence::{
    InMemoryAnswerCommentsRepository, InMemoryAnswersRepository, InMemoryAttachmentsRepository,
    InMemoryDatabase, InMemoryNotificationsRepository, InMemoryQuestionCommentsRepository,
    InMemoryQuestionsRepository, InMemoryStudentsRepository,
};

pub use config::{Config, LogFormat};

/// Fully wired forum core.
///
/// Subscribers hold repositories that hold the dispatcher, so the wiring
/// forms a reference cycle and is meant to live as long as the process.
pub struct Forum {
    pub db: InMemoryDatabase,
    pub cache: Arc<dyn CacheRepository>,
    pub dispatcher: Arc<EventDispatcher<ForumEvent>>,

    pub students: Arc<dyn StudentsRepository>,
    pub attachments: Arc<dyn AttachmentsRepository>,
    pub questions: Arc<dyn QuestionsRepository>,
    pub answers: Arc<dyn AnswersRepository>,
    pub question_comments: Arc<dyn QuestionCommentsRepository>,
    pub answer_comments: Arc<dyn AnswerCommentsRepository>,
    pub notifications: Arc<dyn NotificationsRepository>,

    pub student_service: StudentService,
    pub question_service: QuestionService,
    pub answer_service: AnswerService,
    pub comment_service: CommentService,
    pub notification_service: Arc<NotificationService>,
}

impl Forum {
    /// Builds the forum with an in-memory cache.
    pub fn new(config: &Config) -> Self {
        Self::with_cache(config, Arc::new(InMemoryCacheRepository::new()))
    }

    /// Builds the forum on top of the given cache store.
    pub fn with_cache(config: &Config, cache: Arc<dyn CacheRepository>) -> Self {
        let db = InMemoryDatabase::new();
        let dispatcher = Arc::new(EventDispatcher::<ForumEvent>::new());
        dispatcher.set_enabled(config.domain_events_enabled);

        let students: Arc<dyn StudentsRepository> =
            Arc::new(InMemoryStudentsRepository::new(db.clone()));
        let attachments: Arc<dyn AttachmentsRepository> =
            Arc::new(InMemoryAttachmentsRepository::new(db.clone()));
        let questions: Arc<dyn QuestionsRepository> = Arc::new(InMemoryQuestionsRepository::new(
            db.clone(),
            Arc::clone(&cache),
            Arc::clone(&dispatcher),
        ));
        let answers: Arc<dyn AnswersRepository> = Arc::new(InMemoryAnswersRepository::new(
            db.clone(),
            Arc::clone(&dispatcher),
        ));
        let question_comments: Arc<dyn QuestionCommentsRepository> = Arc::new(
            InMemoryQuestionCommentsRepository::new(db.clone(), Arc::clone(&dispatcher)),
        );
        let answer_comments: Arc<dyn AnswerCommentsRepository> = Arc::new(
            InMemoryAnswerCommentsRepository::new(db.clone(), Arc::clone(&dispatcher)),
        );
        let notifications: Arc<dyn NotificationsRepository> = Arc::new(
            InMemoryNotificationsRepository::new(db.clone(), Arc::clone(&dispatcher)),
        );

        let notification_service = Arc::new(NotificationService::new(Arc::clone(&notifications)));

        register_subscribers(
            &dispatcher,
            Arc::clone(&questions),
            Arc::clone(&answers),
            Arc::clone(&notification_service),
        );

        tracing::info!(
            domain_events_enabled = dispatcher.is_enabled(),
            "forum core wired"
        );

        Self {
            student_service: StudentService::new(Arc::clone(&students)),
            question_service: QuestionService::new(
                Arc::clone(&questions),
                Arc::clone(&answers),
                Arc::clone(&attachments),
            ),
            answer_service: AnswerService::new(
                Arc::clone(&answers),
                Arc::clone(&questions),
                Arc::clone(&attachments),
            ),
            comment_service: CommentService::new(
                Arc::clone(&question_comments),
                Arc::clone(&answer_comments),
                Arc::clone(&questions),
                Arc::clone(&answers),
            ),
            notification_service,
            db,
            cache,
            dispatcher,
            students,
            attachments,
            questions,
            answers,
            question_comments,
            answer_comments,
            notifications,
        }
    }
}
