//! Application controller
//!
//! [`App`] owns the repository and sequences the compound operations the
//! front end needs. Every entry point returns an [`Outcome`] instead of an
//! error so the caller can show a message or stay silent.
//!
//! Multi-step writes are not transactional. `delete_file` removes the
//! file's taggings before the file row, and `save_file` updates the file row
//! and its taggings independently; a failure part way leaves the earlier
//! steps written.

use crate::config::TagbaseConfig;
use crate::db::{Dao, DbError, Repository};
use crate::model::{Tag, TaggedFile, Tagging};
use crate::session::{CommitReport, EditSession};
use crate::TagbaseError;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info, warn};

/// Result of a user-facing operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    /// Human-readable failure message, present only when errors are shown
    pub message: Option<String>,
}

impl Outcome {
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    fn failed(show_errors: bool, message: String) -> Self {
        warn!("{message}");
        Self {
            success: false,
            message: show_errors.then_some(message),
        }
    }
}

/// One file and its taggings, for listing
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub file: TaggedFile,
    pub taggings: BTreeSet<Tagging>,
}

impl FileEntry {
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        self.taggings.iter().map(|t| t.tag.as_str()).collect()
    }
}

/// Read-only view of the whole store
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub files: Vec<FileEntry>,
    /// Tag text to number of files carrying it
    pub tags: BTreeMap<String, usize>,
}

fn describe(context: &str, err: &DbError) -> String {
    format!("{context} ({err})")
}

/// The application context, built once at startup
pub struct App {
    repo: Repository,
}

impl App {
    /// Open the store named by `config`
    ///
    /// # Errors
    ///
    /// Returns `TagbaseError` if the store path cannot be resolved or the store
    /// cannot be opened. The application must not continue in that case.
    pub fn open(config: &TagbaseConfig) -> Result<Self, TagbaseError> {
        let path = config.database_path()?;
        let repo = Repository::open(&path, config.repository_options())?;
        info!(path = %path.display(), "store opened");
        Ok(Self { repo })
    }

    #[must_use]
    pub const fn with_repository(repo: Repository) -> Self {
        Self { repo }
    }

    #[must_use]
    pub const fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Look a registered file up by path
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query fails.
    pub fn find_file(&self, path: &Path) -> Result<Option<TaggedFile>, DbError> {
        self.repo.files().read_by_path(path)
    }

    /// Register a file
    pub fn add_file(&self, path: &Path, show_errors: bool) -> Outcome {
        let mut file = TaggedFile::new(path);
        match self.repo.files().create(&mut file) {
            Ok(true) => {
                debug!(id = file.id, "file added");
                Outcome::ok()
            }
            Ok(false) => Outcome::failed(
                show_errors,
                format!("{} is already registered", path.display()),
            ),
            Err(e) => Outcome::failed(
                show_errors,
                describe(&format!("Could not add {}", path.display()), &e),
            ),
        }
    }

    /// Remove a file and all of its taggings
    pub fn delete_file(&self, file: &TaggedFile, show_errors: bool) -> Outcome {
        if let Err(e) = self.repo.taggings().delete_by_file_id(file.id) {
            return Outcome::failed(
                show_errors,
                describe(&format!("Could not remove tags of {}", file.path.display()), &e),
            );
        }
        match self.repo.files().delete(file) {
            Ok(_) => Outcome::ok(),
            Err(e) => Outcome::failed(
                show_errors,
                describe(&format!("Could not remove {}", file.path.display()), &e),
            ),
        }
    }

    /// Save a file's row and its pending tag edits
    ///
    /// Both halves are attempted even if the first fails; the outcome is a
    /// success only if both are.
    pub fn save_file(&self, file: &TaggedFile, session: &mut EditSession, show_errors: bool) -> Outcome {
        let info = self.update_file_info(file);
        let report = self.update_associations(session);

        let mut problems = Vec::new();
        match info {
            Ok(true) => {}
            Ok(false) => problems.push(format!(
                "Could not update {} (path taken or file missing)",
                file.path.display()
            )),
            Err(e) => problems.push(describe(
                &format!("Could not update {}", file.path.display()),
                &e,
            )),
        }
        if let Some(summary) = report.failure_summary() {
            problems.push(format!("Could not save tags: {summary}"));
        }

        if problems.is_empty() {
            Outcome::ok()
        } else {
            Outcome::failed(show_errors, problems.join("; "))
        }
    }

    /// Overwrite a file row, keyed by its id
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the statement fails for a reason other than a
    /// path conflict.
    pub fn update_file_info(&self, file: &TaggedFile) -> Result<bool, DbError> {
        self.repo.files().update(file, &file.id)
    }

    /// Commit a session's pending tag edits, creating missing tags first
    pub fn update_associations(&self, session: &mut EditSession) -> CommitReport {
        let tags = self.repo.tags();
        for tagging in session.added() {
            if let Err(e) = tags.create(&mut Tag::new(tagging.tag.as_str())) {
                warn!(tag = %tagging.tag, error = %e, "could not create tag");
            }
        }
        session.commit(&self.repo.taggings())
    }

    /// Start editing the taggings of a registered file
    ///
    /// # Errors
    ///
    /// Returns `TagbaseError::InvalidInput` if the file is not registered, or
    /// `TagbaseError::Db` if the store cannot be read.
    pub fn begin_edit(&self, path: &Path) -> Result<EditSession, TagbaseError> {
        let file = self.find_file(path)?.ok_or_else(|| {
            TagbaseError::InvalidInput(format!("{} is not registered", path.display()))
        })?;
        Ok(EditSession::begin(file, &self.repo.taggings())?)
    }

    /// Create a tag
    pub fn add_tag(&self, text: &str, show_errors: bool) -> Outcome {
        match self.repo.tags().create(&mut Tag::new(text)) {
            Ok(true) => Outcome::ok(),
            Ok(false) => Outcome::failed(show_errors, format!("Tag '{text}' already exists")),
            Err(e) => Outcome::failed(show_errors, describe(&format!("Could not add tag '{text}'"), &e)),
        }
    }

    /// Remove a tag from every file, then the tag itself
    pub fn delete_tag(&self, text: &str, show_errors: bool) -> Outcome {
        if let Err(e) = self.repo.taggings().delete_by_tag(text) {
            return Outcome::failed(
                show_errors,
                describe(&format!("Could not untag files with '{text}'"), &e),
            );
        }
        match self.repo.tags().delete(&Tag::new(text)) {
            Ok(_) => Outcome::ok(),
            Err(e) => Outcome::failed(show_errors, describe(&format!("Could not remove tag '{text}'"), &e)),
        }
    }

    /// Every file with its taggings, plus tag usage counts
    ///
    /// # Errors
    ///
    /// Returns `DbError` if any read fails.
    pub fn snapshot(&self) -> Result<Snapshot, DbError> {
        let files = self.repo.files().read_all()?;
        let mut by_file: BTreeMap<i64, BTreeSet<Tagging>> = BTreeMap::new();
        for tagging in self.repo.taggings().read_all()? {
            by_file.entry(tagging.file_id).or_default().insert(tagging);
        }

        let files = files
            .into_iter()
            .map(|file| FileEntry {
                taggings: by_file.remove(&file.id).unwrap_or_default(),
                file,
            })
            .collect();

        Ok(Snapshot {
            files,
            tags: self.repo.tags().usage_counts()?,
        })
    }
}
