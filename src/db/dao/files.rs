use super::{Dao, DeleteOutcome, rows_written};
use crate::db::row::{query_opt, query_set};
use crate::db::{ConnectionProvider, DbError, PathString};
use crate::model::TaggedFile;
use rusqlite::params;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Access to the `files` table
pub struct FileDao<'a> {
    provider: &'a dyn ConnectionProvider,
}

impl<'a> FileDao<'a> {
    pub fn new(provider: &'a dyn ConnectionProvider) -> Self {
        Self { provider }
    }

    /// Look a file up by its unique path
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the path is not UTF-8 or the query fails.
    pub fn read_by_path<P: AsRef<Path>>(&self, path: P) -> Result<Option<TaggedFile>, DbError> {
        let path = PathString::new(path)?;
        let conn = self.provider.open_connection()?;
        query_opt(
            &conn,
            "SELECT fileid, path FROM files WHERE path = ?1",
            params![path],
        )
    }

    /// Number of registered files
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query fails.
    pub fn count(&self) -> Result<usize, DbError> {
        let conn = self.provider.open_connection()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM files", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

impl Dao for FileDao<'_> {
    type Entity = TaggedFile;
    type Key = i64;

    fn create(&self, file: &mut TaggedFile) -> Result<bool, DbError> {
        let path = PathString::new(&file.path)?;
        let conn = self.provider.open_connection()?;

        let result = if file.is_persisted() {
            conn.execute(
                "INSERT INTO files (fileid, path) VALUES (?1, ?2)",
                params![file.id, path],
            )
        } else {
            conn.execute("INSERT INTO files (path) VALUES (?1)", params![path])
        };

        match rows_written(result)? {
            Some(1) => {
                file.id = conn.last_insert_rowid();
                debug!(id = file.id, path = %&*path, "file created");
                Ok(true)
            }
            Some(_) => Ok(false),
            None => {
                debug!(path = %&*path, "file already registered");
                Ok(false)
            }
        }
    }

    fn read_by_id(&self, id: &i64) -> Result<Option<TaggedFile>, DbError> {
        let conn = self.provider.open_connection()?;
        query_opt(
            &conn,
            "SELECT fileid, path FROM files WHERE fileid = ?1",
            params![id],
        )
    }

    fn read_all(&self) -> Result<BTreeSet<TaggedFile>, DbError> {
        let conn = self.provider.open_connection()?;
        query_set(&conn, "SELECT fileid, path FROM files", [])
    }

    fn update(&self, file: &TaggedFile, id: &i64) -> Result<bool, DbError> {
        let path = PathString::new(&file.path)?;
        let new_id = if file.is_persisted() { file.id } else { *id };
        let conn = self.provider.open_connection()?;
        let rows = rows_written(conn.execute(
            "UPDATE files SET fileid = ?1, path = ?2 WHERE fileid = ?3",
            params![new_id, path, id],
        ))?;
        debug!(id, ?rows, "file updated");
        Ok(rows == Some(1))
    }

    fn delete(&self, file: &TaggedFile) -> Result<DeleteOutcome, DbError> {
        let conn = self.provider.open_connection()?;
        let rows = rows_written(conn.execute(
            "DELETE FROM files WHERE fileid = ?1",
            params![file.id],
        ))?
        .unwrap_or_default();
        debug!(id = file.id, rows, "file deleted");
        Ok(DeleteOutcome::from_rows(rows))
    }

    fn delete_all(&self) -> Result<usize, DbError> {
        let conn = self.provider.open_connection()?;
        Ok(rows_written(conn.execute("DELETE FROM files", []))?.unwrap_or_default())
    }
}
