//! Store access for tagbase
//!
//! Provides the connection provider and the per-entity data-access objects
//! over a single SQLite file.
//!
//! Three tables back the store:
//! - `files`: registered files, keyed by a store-assigned id, unique by path
//! - `tags`: tag texts
//! - `taggings`: file-to-tag associations with an optional comment
//!
//! No connection is held between operations. Every DAO call opens its own
//! connection, prepares its own statement and walks its own rows; all three
//! are released in reverse order when the call returns, on error paths too.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, trace};

pub mod dao;
pub mod error;
pub mod row;
pub mod schema;
pub mod types;

pub use dao::{Dao, DeleteOutcome, FileDao, TagDao, TaggingDao};
pub use error::DbError;
pub use types::PathString;

/// Source of store connections
pub trait ConnectionProvider {
    /// Open a fresh connection with the schema in place
    ///
    /// # Errors
    ///
    /// Returns `DbError::Connection` if the store cannot be opened, or
    /// `DbError::Store` if the schema cannot be created.
    fn open_connection(&self) -> Result<Connection, DbError>;
}

/// Per-connection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryOptions {
    /// Enforce foreign keys between `taggings` and the other tables
    pub foreign_keys: bool,
    /// How long a statement waits on a lock held by another process
    pub busy_timeout: Duration,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            foreign_keys: true,
            busy_timeout: Duration::from_millis(5000),
        }
    }
}

/// Connection provider for one SQLite file
///
/// Tables are created lazily by the first connection. The bootstrap runs
/// under a mutex, so a repository shared between threads never races it.
#[derive(Debug)]
pub struct Repository {
    path: PathBuf,
    options: RepositoryOptions,
    schema_ready: Mutex<bool>,
}

impl Repository {
    /// Create a provider for the store at `path` without touching it
    pub fn new<P: AsRef<Path>>(path: P, options: RepositoryOptions) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            options,
            schema_ready: Mutex::new(false),
        }
    }

    /// Create a provider and verify the store can be opened
    ///
    /// # Errors
    ///
    /// Returns `DbError::Connection` if the store is unreachable; callers
    /// should treat this as fatal.
    pub fn open<P: AsRef<Path>>(path: P, options: RepositoryOptions) -> Result<Self, DbError> {
        let repo = Self::new(path, options);
        drop(repo.open_connection()?);
        Ok(repo)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn options(&self) -> RepositoryOptions {
        self.options
    }

    /// DAO for the `files` table
    #[must_use]
    pub fn files(&self) -> FileDao<'_> {
        FileDao::new(self)
    }

    /// DAO for the `tags` table
    #[must_use]
    pub fn tags(&self) -> TagDao<'_> {
        TagDao::new(self)
    }

    /// DAO for the `taggings` table
    #[must_use]
    pub fn taggings(&self) -> TaggingDao<'_> {
        TaggingDao::new(self)
    }

    fn connect(&self) -> Result<Connection, DbError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&self.path).map_err(|source| DbError::Connection {
            path: self.path.clone(),
            source,
        })?;
        conn.busy_timeout(self.options.busy_timeout)?;
        if self.options.foreign_keys {
            conn.pragma_update(None, "foreign_keys", "ON")?;
        }
        Ok(conn)
    }

    fn ensure_schema(&self, conn: &Connection) -> Result<(), DbError> {
        let mut ready = self
            .schema_ready
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !*ready {
            debug!(path = %self.path.display(), "creating tables if missing");
            schema::create_tables(conn)?;
            *ready = true;
        }
        Ok(())
    }
}

impl ConnectionProvider for Repository {
    fn open_connection(&self) -> Result<Connection, DbError> {
        trace!(path = %self.path.display(), "opening connection");
        let conn = self.connect()?;
        self.ensure_schema(&conn)?;
        Ok(conn)
    }
}
