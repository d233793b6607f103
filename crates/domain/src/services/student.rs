use std::sync::Arc;

use crate::commands::RegisterStudent;
use crate::entities::Student;
use crate::error::{DomainError, DomainResult};
use crate::repositories::StudentsRepository;

use super::require_non_blank;

/// Service for student accounts.
pub struct StudentService {
    students: Arc<dyn StudentsRepository>,
}

impl StudentService {
    pub fn new(students: Arc<dyn StudentsRepository>) -> Self {
        Self { students }
    }

    /// Registers a student. Emails are unique.
    #[tracing::instrument(skip(self))]
    pub async fn register_student(&self, cmd: RegisterStudent) -> DomainResult<Student> {
        require_non_blank("name", &cmd.name)?;
        require_non_blank("email", &cmd.email)?;

        if self.students.find_by_email(&cmd.email).await?.is_some() {
            return Err(DomainError::conflict("Student", "email", &cmd.email));
        }

        let student = Student::create(cmd.name, cmd.email);
        self.students.create(&student).await?;

        tracing::info!(student_id = %student.id(), "student registered");
        Ok(student)
    }
}
