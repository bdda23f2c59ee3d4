//! Edit sessions over one file's taggings
//!
//! An [`EditSession`] holds the taggings last read from the store (the base)
//! and the additions and removals a user has made since. Nothing touches the
//! store until [`EditSession::commit`].
//!
//! # Lifecycle
//!
//! ```text
//! begin() ─→ Clean(base)
//!               │ record_addition / record_removal
//!               ↓
//!           Dirty(base, added, removed) ──cancel()──→ dropped, nothing written
//!               │ commit()
//!               ├─ all changes applied → Clean(base reloaded from store)
//!               └─ some changes failed → Dirty(base reloaded, failed changes only)
//! ```
//!
//! Commits are best effort. Changes that succeeded before a failure stay
//! written; nothing is rolled back.

use crate::db::{Dao, DbError, TaggingDao};
use crate::model::{TaggedFile, Tagging, TaggingKey};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{info, warn};

/// Whether a session has unsaved changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Clean,
    Dirty,
}

/// One change a commit tried to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Added(Tagging),
    Removed(Tagging),
}

impl Change {
    #[must_use]
    pub const fn tagging(&self) -> &Tagging {
        match self {
            Self::Added(t) | Self::Removed(t) => t,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added(t) => write!(f, "+{}", t.tag),
            Self::Removed(t) => write!(f, "-{}", t.tag),
        }
    }
}

/// A change the store did not accept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedChange {
    pub change: Change,
    pub reason: String,
}

/// What a commit did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    pub applied: Vec<Change>,
    pub failed: Vec<FailedChange>,
}

impl CommitReport {
    /// True only if every change was applied
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// True if some changes were written and others were not
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.applied.is_empty() && !self.failed.is_empty()
    }

    /// One-line description of the failures, if any
    #[must_use]
    pub fn failure_summary(&self) -> Option<String> {
        if self.failed.is_empty() {
            return None;
        }
        let details: Vec<String> = self
            .failed
            .iter()
            .map(|f| format!("{} ({})", f.change, f.reason))
            .collect();
        Some(details.join(", "))
    }
}

/// In-memory edit state for one file's taggings
#[derive(Debug, Clone)]
pub struct EditSession {
    file: TaggedFile,
    base: BTreeMap<TaggingKey, Tagging>,
    added: BTreeMap<TaggingKey, Tagging>,
    removed: BTreeMap<TaggingKey, Tagging>,
}

fn keyed<I: IntoIterator<Item = Tagging>>(taggings: I) -> BTreeMap<TaggingKey, Tagging> {
    taggings.into_iter().map(|t| (t.key(), t)).collect()
}

impl EditSession {
    /// Start a session from a known base set
    pub fn new<I: IntoIterator<Item = Tagging>>(file: TaggedFile, base: I) -> Self {
        Self {
            file,
            base: keyed(base),
            added: BTreeMap::new(),
            removed: BTreeMap::new(),
        }
    }

    /// Start a session from the file's stored taggings
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the taggings cannot be read.
    pub fn begin(file: TaggedFile, dao: &TaggingDao<'_>) -> Result<Self, DbError> {
        let base = dao.read_by_file_id(file.id)?;
        Ok(Self::new(file, base))
    }

    #[must_use]
    pub const fn file(&self) -> &TaggedFile {
        &self.file
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.added.is_empty() && self.removed.is_empty() {
            SessionState::Clean
        } else {
            SessionState::Dirty
        }
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.state() == SessionState::Dirty
    }

    /// Taggings as last read from the store
    #[must_use]
    pub fn base(&self) -> BTreeSet<Tagging> {
        self.base.values().cloned().collect()
    }

    #[must_use]
    pub fn added(&self) -> BTreeSet<Tagging> {
        self.added.values().cloned().collect()
    }

    #[must_use]
    pub fn removed(&self) -> BTreeSet<Tagging> {
        self.removed.values().cloned().collect()
    }

    /// Mark a tagging to be created on commit
    pub fn record_addition(&mut self, tagging: Tagging) {
        self.added.insert(tagging.key(), tagging);
    }

    /// Mark a tagging to be deleted on commit
    ///
    /// Removing a tagging that is not in the base is allowed and has no
    /// effect on the working set.
    pub fn record_removal(&mut self, tagging: Tagging) {
        self.removed.insert(tagging.key(), tagging);
    }

    /// Record `tag` as added to this session's file
    pub fn add_tag(&mut self, tag: &str, comment: Option<String>) {
        let mut tagging = Tagging::new(self.file.id, tag);
        tagging.comment = comment;
        self.record_addition(tagging);
    }

    /// Record `tag` as removed from this session's file
    pub fn remove_tag(&mut self, tag: &str) {
        let key = TaggingKey::new(self.file.id, tag);
        let tagging = self
            .base
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Tagging::new(self.file.id, tag));
        self.record_removal(tagging);
    }

    /// `(base − removed) ∪ added`, computed fresh on every call
    ///
    /// A key present in both the remaining base and the additions keeps the
    /// stored record.
    #[must_use]
    pub fn working_set(&self) -> BTreeSet<Tagging> {
        let mut working: BTreeMap<&TaggingKey, &Tagging> = self
            .base
            .iter()
            .filter(|(key, _)| !self.removed.contains_key(*key))
            .collect();
        for (key, tagging) in &self.added {
            working.entry(key).or_insert(tagging);
        }
        working.into_values().cloned().collect()
    }

    /// Write the pending changes through `dao`
    ///
    /// Removals run first, then additions, so removing and re-adding a tag
    /// replaces its comment. An addition the store rejects as a duplicate
    /// counts as a failure.
    pub fn commit(&mut self, dao: &TaggingDao<'_>) -> CommitReport {
        let mut report = CommitReport::default();

        for tagging in self.removed.values() {
            let change = Change::Removed(tagging.clone());
            match dao.delete(tagging) {
                Ok(_) => report.applied.push(change),
                Err(e) => report.failed.push(FailedChange {
                    change,
                    reason: e.to_string(),
                }),
            }
        }

        for tagging in self.added.values() {
            let mut row = tagging.unassigned();
            match dao.create(&mut row) {
                Ok(true) => report.applied.push(Change::Added(row)),
                Ok(false) => report.failed.push(FailedChange {
                    change: Change::Added(row),
                    reason: "already tagged".into(),
                }),
                Err(e) => report.failed.push(FailedChange {
                    change: Change::Added(row),
                    reason: e.to_string(),
                }),
            }
        }

        self.rebase(dao, &report);

        if report.is_success() {
            info!(file_id = self.file.id, applied = report.applied.len(), "edit session committed");
        } else {
            warn!(
                file_id = self.file.id,
                applied = report.applied.len(),
                failed = report.failed.len(),
                "edit session partially committed"
            );
        }
        report
    }

    /// Discard the session without writing anything
    pub fn cancel(self) {}

    fn rebase(&mut self, dao: &TaggingDao<'_>, report: &CommitReport) {
        match dao.read_by_file_id(self.file.id) {
            Ok(stored) => self.base = keyed(stored),
            Err(e) => {
                warn!(file_id = self.file.id, error = %e, "could not reload taggings, patching base in memory");
                for change in &report.applied {
                    match change {
                        Change::Removed(t) => {
                            self.base.remove(&t.key());
                        }
                        Change::Added(t) => {
                            self.base.insert(t.key(), t.clone());
                        }
                    }
                }
            }
        }

        let mut failed_additions = BTreeSet::new();
        let mut failed_removals = BTreeSet::new();
        for failure in &report.failed {
            match &failure.change {
                Change::Added(t) => failed_additions.insert(t.key()),
                Change::Removed(t) => failed_removals.insert(t.key()),
            };
        }
        self.added.retain(|key, _| failed_additions.contains(key));
        self.removed.retain(|key, _| failed_removals.contains(key));
    }
}
