//! Testing utilities for tagbase
//!
//! This module provides a `TestDb` guard that owns a throwaway store in a
//! temporary directory, plus helpers for seeding it.
//!
//! Only available when compiled with `cfg(test)`.

use crate::db::{Dao, Repository, RepositoryOptions};
use crate::model::{Tag, TaggedFile, Tagging};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary store that is removed with its directory on drop
pub struct TestDb {
    dir: TempDir,
    repo: Repository,
}

impl TestDb {
    /// Create an empty store with foreign keys enforced
    ///
    /// # Panics
    /// Panics if the temporary directory or the store cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(RepositoryOptions::default())
    }

    /// # Panics
    /// Panics if the temporary directory or the store cannot be created.
    #[must_use]
    pub fn with_options(options: RepositoryOptions) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repo = Repository::open(dir.path().join("tagbase.db"), options)
            .expect("Failed to open test store");
        Self { dir, repo }
    }

    #[must_use]
    pub const fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Directory the store lives in; handy for creating files to tag
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Create a real file under the store directory
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    #[must_use]
    pub fn touch(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, b"test content").expect("Failed to create test file");
        path
    }

    /// Insert a file row and return it with its assigned id
    ///
    /// # Panics
    /// Panics if the insert does not succeed.
    pub fn seed_file(&self, path: impl AsRef<Path>) -> TaggedFile {
        let mut file = TaggedFile::new(path);
        assert!(self.repo.files().create(&mut file).expect("Failed to seed file"));
        file
    }

    /// Insert a tag row if missing
    ///
    /// # Panics
    /// Panics if the insert fails for a reason other than a duplicate.
    pub fn seed_tag(&self, text: &str) -> Tag {
        let mut tag = Tag::new(text);
        self.repo.tags().create(&mut tag).expect("Failed to seed tag");
        tag
    }

    /// Insert a tag and a tagging for `file`
    ///
    /// # Panics
    /// Panics if the insert does not succeed.
    pub fn seed_tagging(&self, file: &TaggedFile, tag: &str) -> Tagging {
        self.seed_tag(tag);
        let mut tagging = Tagging::new(file.id, tag);
        assert!(
            self.repo
                .taggings()
                .create(&mut tagging)
                .expect("Failed to seed tagging")
        );
        tagging
    }
}

impl Default for TestDb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_starts_empty() {
        let db = TestDb::new();
        assert!(db.repo().files().read_all().unwrap().is_empty());
        assert!(db.repo().tags().read_all().unwrap().is_empty());
        assert!(db.repo().taggings().read_all().unwrap().is_empty());
    }

    #[test]
    fn test_db_cleanup() {
        let dir;
        {
            let db = TestDb::new();
            dir = db.dir().to_path_buf();
            assert!(dir.join("tagbase.db").exists());
        }
        assert!(!dir.exists());
    }

    #[test]
    fn test_seed_helpers() {
        let db = TestDb::new();
        let path = db.touch("notes.txt");
        assert!(path.exists());

        let file = db.seed_file(&path);
        let tagging = db.seed_tagging(&file, "work");
        assert!(file.is_persisted());
        assert!(tagging.is_persisted());
        assert_eq!(db.repo().taggings().read_by_file_id(file.id).unwrap().len(), 1);
    }
}
