//! Store-specific error types
//!
//! This module defines the errors that can surface from the repository and the DAOs.
//!
//! # Error Types
//!
//! - **`Connection`**: the store file could not be opened; fatal at startup
//! - **`Store`**: a single statement failed
//! - **`Constraint`**: a foreign key or CHECK constraint rejected a write
//! - **`InvalidPath`**: a path cannot be stored as UTF-8 text
//! - **`Io`**: the store's directory could not be prepared
//!
//! A duplicate-key insert is not an error: DAOs report it as a `false` result.

use std::path::PathBuf;
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum DbError {
    /// The store file could not be opened
    #[error("Cannot open store at {}: {source}", path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A statement against the store failed
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// A foreign key or CHECK constraint rejected the statement
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Path is not valid UTF-8
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Filesystem error while preparing the store location
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
