use async_trait::async_trait;
use common::UniqueEntityId;
use domain::{DomainError, DomainResult, Student, StudentsRepository};

use crate::database::InMemoryDatabase;
use crate::mappers::{student_from_record, student_to_record};

#[derive(Clone)]
pub struct InMemoryStudentsRepository {
    db: InMemoryDatabase,
}

impl InMemoryStudentsRepository {
    pub fn new(db: InMemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentsRepository for InMemoryStudentsRepository {
    async fn find_by_id(&self, id: UniqueEntityId) -> DomainResult<Option<Student>> {
        self.db.ensure_available()?;
        let students = self.db.students.read().await;
        Ok(students.get(&id).map(student_from_record))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Student>> {
        self.db.ensure_available()?;
        let students = self.db.students.read().await;
        Ok(students
            .values()
            .find(|record| record.email == email)
            .map(student_from_record))
    }

    #[tracing::instrument(skip_all, fields(student_id = %student.id()))]
    async fn create(&self, student: &Student) -> DomainResult<()> {
        self.db.ensure_available()?;
        let mut students = self.db.students.write().await;
        if students
            .values()
            .any(|record| record.email == student.email())
        {
            return Err(DomainError::conflict("Student", "email", student.email()));
        }
        students.insert(student.id(), student_to_record(student));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use domain::ErrorKind;

    use super::*;

    #[tokio::test]
    async fn create_rejects_taken_email() {
        let repo = InMemoryStudentsRepository::new(InMemoryDatabase::new());
        repo.create(&Student::create("Alice", "same@example.com"))
            .await
            .unwrap();

        let err = repo
            .create(&Student::create("Impostor", "same@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(repo.db.students.read().await.len(), 1);
    }
}
