//! Conversions between domain aggregates and stored rows.

use common::{Slug, UniqueEntityId};
use domain::{
    Answer, AnswerAttachment, AnswerComment, AnswerProps, Attachment, CommentProps, Notification,
    NotificationProps, Question, QuestionAttachment, QuestionComment, QuestionProps, Student,
};
use events::AggregateRoot;

use crate::records::{
    AnswerRecord, AttachmentLinkRecord, AttachmentRecord, CommentRecord, NotificationRecord,
    QuestionRecord, StudentRecord,
};

pub fn student_to_record(student: &Student) -> StudentRecord {
    StudentRecord {
        id: student.id(),
        name: student.name().to_string(),
        email: student.email().to_string(),
    }
}

pub fn student_from_record(record: &StudentRecord) -> Student {
    Student::restore(record.id, record.name.clone(), record.email.clone())
}

pub fn attachment_to_record(attachment: &Attachment) -> AttachmentRecord {
    AttachmentRecord {
        id: attachment.id(),
        title: attachment.title().to_string(),
        url: attachment.url().to_string(),
    }
}

pub fn attachment_from_record(record: &AttachmentRecord) -> Attachment {
    Attachment::restore(record.id, record.title.clone(), record.url.clone())
}

pub fn question_to_record(question: &Question) -> QuestionRecord {
    QuestionRecord {
        id: question.id(),
        author_id: question.author_id(),
        best_answer_id: question.best_answer_id(),
        title: question.title().to_string(),
        content: question.content().to_string(),
        slug: question.slug().as_str().to_string(),
        created_at: question.created_at(),
        updated_at: question.updated_at(),
    }
}

pub fn question_from_record(record: &QuestionRecord, attachment_ids: &[UniqueEntityId]) -> Question {
    let attachments = attachment_ids
        .iter()
        .map(|&attachment_id| QuestionAttachment {
            question_id: record.id,
            attachment_id,
        })
        .collect();

    Question::restore(
        record.id,
        QuestionProps {
            author_id: record.author_id,
            best_answer_id: record.best_answer_id,
            title: record.title.clone(),
            content: record.content.clone(),
            slug: Slug::new(record.slug.clone()),
            attachments,
            created_at: record.created_at,
            updated_at: record.updated_at,
        },
    )
}

pub fn question_link_to_record(link: &QuestionAttachment) -> AttachmentLinkRecord {
    AttachmentLinkRecord {
        owner_id: link.question_id,
        attachment_id: link.attachment_id,
    }
}

pub fn answer_to_record(answer: &Answer) -> AnswerRecord {
    AnswerRecord {
        id: answer.id(),
        author_id: answer.author_id(),
        question_id: answer.question_id(),
        content: answer.content().to_string(),
        created_at: answer.created_at(),
        updated_at: answer.updated_at(),
    }
}

pub fn answer_from_record(record: &AnswerRecord, attachment_ids: &[UniqueEntityId]) -> Answer {
    let attachments = attachment_ids
        .iter()
        .map(|&attachment_id| AnswerAttachment {
            answer_id: record.id,
            attachment_id,
        })
        .collect();

    Answer::restore(
        record.id,
        AnswerProps {
            author_id: record.author_id,
            question_id: record.question_id,
            content: record.content.clone(),
            attachments,
            created_at: record.created_at,
            updated_at: record.updated_at,
        },
    )
}

pub fn answer_link_to_record(link: &AnswerAttachment) -> AttachmentLinkRecord {
    AttachmentLinkRecord {
        owner_id: link.answer_id,
        attachment_id: link.attachment_id,
    }
}

pub fn question_comment_to_record(comment: &QuestionComment) -> CommentRecord {
    CommentRecord {
        id: comment.id(),
        author_id: comment.author_id(),
        parent_id: comment.question_id(),
        content: comment.content().to_string(),
        created_at: comment.created_at(),
        updated_at: comment.updated_at(),
    }
}

pub fn question_comment_from_record(record: &CommentRecord) -> QuestionComment {
    QuestionComment::restore(record.id, record.parent_id, comment_props(record))
}

pub fn answer_comment_to_record(comment: &AnswerComment) -> CommentRecord {
    CommentRecord {
        id: comment.id(),
        author_id: comment.author_id(),
        parent_id: comment.answer_id(),
        content: comment.content().to_string(),
        created_at: comment.created_at(),
        updated_at: comment.updated_at(),
    }
}

pub fn answer_comment_from_record(record: &CommentRecord) -> AnswerComment {
    AnswerComment::restore(record.id, record.parent_id, comment_props(record))
}

fn comment_props(record: &CommentRecord) -> CommentProps {
    CommentProps {
        author_id: record.author_id,
        content: record.content.clone(),
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

pub fn notification_to_record(notification: &Notification) -> NotificationRecord {
    NotificationRecord {
        id: notification.id(),
        recipient_id: notification.recipient_id(),
        title: notification.title().to_string(),
        content: notification.content().to_string(),
        idempotency_key: notification.idempotency_key().map(str::to_string),
        created_at: notification.created_at(),
        read_at: notification.read_at(),
    }
}

pub fn notification_from_record(record: &NotificationRecord) -> Notification {
    Notification::restore(
        record.id,
        NotificationProps {
            recipient_id: record.recipient_id,
            title: record.title.clone(),
            content: record.content.clone(),
            idempotency_key: record.idempotency_key.clone(),
            created_at: record.created_at,
            read_at: record.read_at,
        },
    )
}
