use common::UniqueEntityId;
use serde::{Deserialize, Serialize};

/// An uploaded file reference. The file itself lives in external storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    id: UniqueEntityId,
    title: String,
    url: String,
}

impl Attachment {
    pub fn create(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::restore(UniqueEntityId::new(), title, url)
    }

    pub fn restore(id: UniqueEntityId, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
        }
    }

    pub fn id(&self) -> UniqueEntityId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
