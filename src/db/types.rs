//! Path text conversion for the store
//!
//! Paths are stored as `TEXT`, so they have to be valid UTF-8. [`PathString`]
//! does the check once, when the value is built, and then binds directly as a
//! statement parameter.
//!
//! # Examples
//!
//! ```
//! use tagbase::db::types::PathString;
//!
//! let path = PathString::new("/home/me/notes.txt").unwrap();
//! assert_eq!(&*path, "/home/me/notes.txt");
//! ```

use super::error::DbError;
use rusqlite::ToSql;
use rusqlite::types::ToSqlOutput;
use std::ops::Deref;
use std::path::{Path, PathBuf};

/// A path known to be representable as UTF-8 text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathString(String);

impl PathString {
    /// # Errors
    ///
    /// Returns `DbError::InvalidPath` when the path is not valid UTF-8.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let path = path.as_ref();
        match path.to_str() {
            Some(text) => Ok(Self(text.to_owned())),
            None => Err(DbError::InvalidPath(format!(
                "Invalid UTF-8 in path {}",
                path.display()
            ))),
        }
    }
}

impl Deref for PathString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<PathString> for PathBuf {
    fn from(path: PathString) -> Self {
        Self::from(path.0)
    }
}

impl ToSql for PathString {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.as_str()))
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
