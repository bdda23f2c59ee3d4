use super::{UNASSIGNED_ID, is_assigned};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Identity of a tagging: which file carries which tag
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaggingKey {
    pub file_id: i64,
    pub tag: String,
}

impl TaggingKey {
    pub fn new(file_id: i64, tag: impl Into<String>) -> Self {
        Self {
            file_id,
            tag: tag.into(),
        }
    }
}

/// Association of one file with one tag
///
/// `id` is the surrogate the store assigns on insert. Ordering puts persisted
/// taggings first by id, then unpersisted ones by tag text, so taggings built
/// during an edit session sort deterministically next to stored ones.
///
/// Equality, ordering and hashing cover `(id, file_id, tag)`. The comment is
/// payload. Use [`Tagging::key`] when the surrogate id must not matter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tagging {
    pub id: i64,
    pub file_id: i64,
    pub tag: String,
    pub comment: Option<String>,
}

impl Tagging {
    /// Create an unpersisted tagging
    pub fn new(file_id: i64, tag: impl Into<String>) -> Self {
        Self {
            id: UNASSIGNED_ID,
            file_id,
            tag: tag.into(),
            comment: None,
        }
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[must_use]
    pub fn key(&self) -> TaggingKey {
        TaggingKey::new(self.file_id, self.tag.clone())
    }

    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        is_assigned(self.id)
    }

    /// The same tagging with its surrogate id cleared
    #[must_use]
    pub fn unassigned(&self) -> Self {
        Self {
            id: UNASSIGNED_ID,
            ..self.clone()
        }
    }
}

impl PartialEq for Tagging {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Tagging {}

impl Hash for Tagging {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_persisted().hash(state);
        if self.is_persisted() {
            self.id.hash(state);
        }
        self.tag.hash(state);
        self.file_id.hash(state);
    }
}

impl Ord for Tagging {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_persisted(), other.is_persisted()) {
            (true, true) => self.id.cmp(&other.id),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => Ordering::Equal,
        }
        .then_with(|| self.tag.cmp(&other.tag))
        .then_with(|| self.file_id.cmp(&other.file_id))
    }
}

impl PartialOrd for Tagging {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
