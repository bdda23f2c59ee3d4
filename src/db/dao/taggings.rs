use super::{Dao, DeleteOutcome, rows_written};
use crate::db::row::{query_opt, query_set};
use crate::db::{ConnectionProvider, DbError};
use crate::model::{Tagging, TaggingKey};
use rusqlite::params;
use std::collections::BTreeSet;
use tracing::debug;

const SELECT_TAGGINGS: &str = "SELECT rowid AS taggingid, fileid, tag, comment FROM taggings";

/// Access to the `taggings` table
///
/// Rows are identified by `(fileid, tag)`. The surrogate id is the table's
/// `rowid`; it is always assigned by the store on insert.
pub struct TaggingDao<'a> {
    provider: &'a dyn ConnectionProvider,
}

impl<'a> TaggingDao<'a> {
    pub fn new(provider: &'a dyn ConnectionProvider) -> Self {
        Self { provider }
    }

    /// All taggings of one file
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query fails.
    pub fn read_by_file_id(&self, file_id: i64) -> Result<BTreeSet<Tagging>, DbError> {
        let conn = self.provider.open_connection()?;
        query_set(
            &conn,
            &format!("{SELECT_TAGGINGS} WHERE fileid = ?1"),
            params![file_id],
        )
    }

    /// All taggings that use one tag
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query fails.
    pub fn read_by_tag(&self, tag: &str) -> Result<BTreeSet<Tagging>, DbError> {
        let conn = self.provider.open_connection()?;
        query_set(
            &conn,
            &format!("{SELECT_TAGGINGS} WHERE tag = ?1"),
            params![tag],
        )
    }

    /// Remove every tagging of one file; returns how many were removed
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the statement fails.
    pub fn delete_by_file_id(&self, file_id: i64) -> Result<usize, DbError> {
        let conn = self.provider.open_connection()?;
        let rows = rows_written(conn.execute(
            "DELETE FROM taggings WHERE fileid = ?1",
            params![file_id],
        ))?
        .unwrap_or_default();
        debug!(file_id, rows, "taggings of file deleted");
        Ok(rows)
    }

    /// Remove every tagging that uses one tag; returns how many were removed
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the statement fails.
    pub fn delete_by_tag(&self, tag: &str) -> Result<usize, DbError> {
        let conn = self.provider.open_connection()?;
        let rows = rows_written(conn.execute("DELETE FROM taggings WHERE tag = ?1", params![tag]))?
            .unwrap_or_default();
        debug!(tag, rows, "taggings of tag deleted");
        Ok(rows)
    }
}

impl Dao for TaggingDao<'_> {
    type Entity = Tagging;
    type Key = TaggingKey;

    fn create(&self, tagging: &mut Tagging) -> Result<bool, DbError> {
        let conn = self.provider.open_connection()?;
        let rows = rows_written(conn.execute(
            "INSERT INTO taggings (fileid, tag, comment) VALUES (?1, ?2, ?3)",
            params![tagging.file_id, tagging.tag, tagging.comment],
        ))?;

        if rows == Some(1) {
            tagging.id = conn.last_insert_rowid();
            debug!(id = tagging.id, file_id = tagging.file_id, tag = %tagging.tag, "tagging created");
            Ok(true)
        } else {
            debug!(file_id = tagging.file_id, tag = %tagging.tag, "tagging already present");
            Ok(false)
        }
    }

    fn read_by_id(&self, key: &TaggingKey) -> Result<Option<Tagging>, DbError> {
        let conn = self.provider.open_connection()?;
        query_opt(
            &conn,
            &format!("{SELECT_TAGGINGS} WHERE fileid = ?1 AND tag = ?2"),
            params![key.file_id, key.tag],
        )
    }

    fn read_all(&self) -> Result<BTreeSet<Tagging>, DbError> {
        let conn = self.provider.open_connection()?;
        query_set(&conn, SELECT_TAGGINGS, [])
    }

    fn update(&self, tagging: &Tagging, key: &TaggingKey) -> Result<bool, DbError> {
        let conn = self.provider.open_connection()?;
        let rows = rows_written(conn.execute(
            "UPDATE taggings SET fileid = ?1, tag = ?2, comment = ?3
             WHERE fileid = ?4 AND tag = ?5",
            params![
                tagging.file_id,
                tagging.tag,
                tagging.comment,
                key.file_id,
                key.tag
            ],
        ))?;
        Ok(rows == Some(1))
    }

    fn delete(&self, tagging: &Tagging) -> Result<DeleteOutcome, DbError> {
        let conn = self.provider.open_connection()?;
        let rows = rows_written(conn.execute(
            "DELETE FROM taggings WHERE fileid = ?1 AND tag = ?2",
            params![tagging.file_id, tagging.tag],
        ))?
        .unwrap_or_default();
        Ok(DeleteOutcome::from_rows(rows))
    }

    fn delete_all(&self) -> Result<usize, DbError> {
        let conn = self.provider.open_connection()?;
        Ok(rows_written(conn.execute("DELETE FROM taggings", []))?.unwrap_or_default())
    }
}
