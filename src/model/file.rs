use super::{UNASSIGNED_ID, is_assigned};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// A file registered in the store
///
/// Ordered by id, then path. Unpersisted files carry [`UNASSIGNED_ID`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedFile {
    pub id: i64,
    pub path: PathBuf,
}

impl TaggedFile {
    /// Create a file record that has not been persisted yet
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            id: UNASSIGNED_ID,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a file record with a known id
    pub fn with_id<P: AsRef<Path>>(id: i64, path: P) -> Self {
        Self {
            id,
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        is_assigned(self.id)
    }
}

impl Ord for TaggedFile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id
            .cmp(&other.id)
            .then_with(|| self.path.cmp(&other.path))
    }
}

impl PartialOrd for TaggedFile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
