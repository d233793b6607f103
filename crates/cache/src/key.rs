use std::fmt;

/// Cache key rendered as `<entity>:<discriminator>:<view>`.
///
/// ```
/// use cache::CacheKey;
///
/// let key = CacheKey::new("question", "example", "details");
/// assert_eq!(key.as_str(), "question:example:details");
/// assert_eq!(CacheKey::prefix("question", "example"), "question:example:");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(entity: &str, discriminator: &str, view: &str) -> Self {
        Self(format!("{entity}:{discriminator}:{view}"))
    }

    /// Prefix shared by every view of one entity instance.
    pub fn prefix(entity: &str, discriminator: &str) -> String {
        format!("{entity}:{discriminator}:")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_prefixed_by_its_entity_prefix() {
        let key = CacheKey::new("question", "how-to-borrow", "details");
        assert!(key.as_str().starts_with(&CacheKey::prefix("question", "how-to-borrow")));
        assert_eq!(key.to_string(), "question:how-to-borrow:details");
    }
}
