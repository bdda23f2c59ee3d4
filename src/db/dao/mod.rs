//! Data-access objects, one per table
//!
//! Each DAO borrows a [`ConnectionProvider`] and opens a connection per call.
//! Statements are always parameterized.
//!
//! Write results follow one convention:
//! - a duplicate primary or unique key is a normal negative result (`Ok(false)`)
//! - a foreign key or CHECK violation is `DbError::Constraint`
//! - anything else is `DbError::Store`

mod files;
mod taggings;
mod tags;

pub use files::FileDao;
pub use taggings::TaggingDao;
pub use tags::TagDao;

use super::DbError;
use rusqlite::{ErrorCode, ffi};
use std::collections::BTreeSet;

/// Result of a delete
///
/// Both variants are successful outcomes; deleting a missing row is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// One matching row was removed
    Deleted,
    /// No row matched
    Absent,
}

impl DeleteOutcome {
    #[must_use]
    pub const fn from_rows(rows: usize) -> Self {
        if rows == 0 { Self::Absent } else { Self::Deleted }
    }

    /// Deletes are idempotent, so every outcome counts as success
    #[must_use]
    pub const fn succeeded(self) -> bool {
        true
    }

    #[must_use]
    pub const fn removed_row(self) -> bool {
        matches!(self, Self::Deleted)
    }
}

/// CRUD contract shared by the per-table DAOs
pub trait Dao {
    type Entity: Ord;
    type Key: ?Sized;

    /// Insert one row; on success the store-assigned id is written back
    ///
    /// # Errors
    ///
    /// Returns `DbError` on connectivity or non-duplicate constraint failures.
    fn create(&self, entity: &mut Self::Entity) -> Result<bool, DbError>;

    /// # Errors
    ///
    /// Returns `DbError` if the query fails.
    fn read_by_id(&self, key: &Self::Key) -> Result<Option<Self::Entity>, DbError>;

    /// # Errors
    ///
    /// Returns `DbError` if the query fails.
    fn read_all(&self) -> Result<BTreeSet<Self::Entity>, DbError>;

    /// Overwrite the row identified by `key`; true iff exactly one row changed
    ///
    /// # Errors
    ///
    /// Returns `DbError` on connectivity or non-duplicate constraint failures.
    fn update(&self, entity: &Self::Entity, key: &Self::Key) -> Result<bool, DbError>;

    /// # Errors
    ///
    /// Returns `DbError` on connectivity or constraint failures.
    fn delete(&self, entity: &Self::Entity) -> Result<DeleteOutcome, DbError>;

    /// Remove every row; returns how many were removed
    ///
    /// # Errors
    ///
    /// Returns `DbError` on connectivity or constraint failures.
    fn delete_all(&self) -> Result<usize, DbError>;
}

fn is_duplicate_key(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                || e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

fn is_constraint(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

/// Classify the result of a write statement
///
/// `Ok(None)` means a duplicate key stopped the write.
pub(crate) fn rows_written(result: rusqlite::Result<usize>) -> Result<Option<usize>, DbError> {
    match result {
        Ok(rows) => Ok(Some(rows)),
        Err(e) if is_duplicate_key(&e) => Ok(None),
        Err(e) if is_constraint(&e) => Err(DbError::Constraint(e.to_string())),
        Err(e) => Err(e.into()),
    }
}
