//! URL-safe slug value object.

use serde::{Deserialize, Serialize};

/// A URL-safe identifier derived from a human title.
///
/// Slugs are the discriminator used to address question views independently
/// of their internal identity, so once assigned they never change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Wraps an already-normalized slug value (e.g. one read back from storage).
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Derives a slug from free text.
    ///
    /// Lowercases, turns whitespace runs into `-`, drops anything that is not
    /// an ASCII letter, digit, `-` or `_`, maps `_` to `-`, collapses repeated
    /// dashes and trims dashes from both ends.
    ///
    /// Example: `"An example title"` → `"an-example-title"`.
    pub fn from_text(text: &str) -> Self {
        let mut slug = String::with_capacity(text.len());
        let mut pending_dash = false;

        for ch in text.trim().to_lowercase().chars() {
            let mapped = if ch.is_whitespace() || ch == '_' || ch == '-' {
                None
            } else if ch.is_ascii_alphanumeric() {
                Some(ch)
            } else {
                continue;
            };

            match mapped {
                None => pending_dash = true,
                Some(c) => {
                    if pending_dash && !slug.is_empty() {
                        slug.push('-');
                    }
                    pending_dash = false;
                    slug.push(c);
                }
            }
        }

        Self(slug)
    }

    /// Returns the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if normalization left nothing behind.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
