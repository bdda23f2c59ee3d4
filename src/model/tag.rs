use serde::{Deserialize, Serialize};
use std::fmt;

/// A tag; its text is its identity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub text: String,
}

impl Tag {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build a tag from a possibly missing value; `None` becomes the empty tag
    #[must_use]
    pub fn from_nullable(text: Option<String>) -> Self {
        Self {
            text: text.unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Tag {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Tag {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
