use common::UniqueEntityId;
use serde::{Deserialize, Serialize};

/// A registered forum member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    id: UniqueEntityId,
    name: String,
    email: String,
}

impl Student {
    pub fn create(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::restore(UniqueEntityId::new(), name, email)
    }

    pub fn restore(id: UniqueEntityId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn id(&self) -> UniqueEntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
