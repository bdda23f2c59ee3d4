//! Tagbase - tag local files and keep the tags in a SQLite store
//!
//! This library provides the entity model, the store access layer, edit
//! sessions for a file's tags, and the controller the command-line front end
//! drives.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod db;
pub mod model;
pub mod output;
pub mod session;

#[cfg(test)]
pub mod testing;

pub use controller::{App, Outcome, Snapshot};
pub use model::{Tag, TaggedFile, Tagging, TaggingKey, UNASSIGNED_ID};
pub use session::{CommitReport, EditSession, SessionState};

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum TagbaseError {
    /// Store error
    #[error("Database error: {0}")]
    Db(#[from] db::DbError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Interactive prompt failed
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
    /// JSON output failed
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// An operation reported failure to the user
    #[error("{0}")]
    Failed(String),
}
