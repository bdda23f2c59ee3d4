use super::{Dao, DeleteOutcome, rows_written};
use crate::db::row::{query_opt, query_set};
use crate::db::{ConnectionProvider, DbError};
use crate::model::Tag;
use rusqlite::params;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Access to the `tags` table
pub struct TagDao<'a> {
    provider: &'a dyn ConnectionProvider,
}

impl<'a> TagDao<'a> {
    pub fn new(provider: &'a dyn ConnectionProvider) -> Self {
        Self { provider }
    }

    /// Number of taggings per tag, including unused tags with a count of zero
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query fails.
    pub fn usage_counts(&self) -> Result<BTreeMap<String, usize>, DbError> {
        let conn = self.provider.open_connection()?;
        let mut stmt = conn.prepare(
            "SELECT t.tag, COUNT(g.fileid) FROM tags t
             LEFT JOIN taggings g ON g.tag = t.tag
             GROUP BY t.tag",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                row.get::<_, i64>(1)?,
            ))
        })?;

        let mut counts = BTreeMap::new();
        for row in rows {
            let (tag, count) = row?;
            counts.insert(tag, usize::try_from(count).unwrap_or_default());
        }
        Ok(counts)
    }
}

impl Dao for TagDao<'_> {
    type Entity = Tag;
    type Key = str;

    fn create(&self, tag: &mut Tag) -> Result<bool, DbError> {
        let conn = self.provider.open_connection()?;
        let rows = rows_written(conn.execute(
            "INSERT INTO tags (tag) VALUES (?1)",
            params![tag.text],
        ))?;
        debug!(tag = %tag, created = rows.is_some(), "tag create");
        Ok(rows == Some(1))
    }

    fn read_by_id(&self, text: &str) -> Result<Option<Tag>, DbError> {
        let conn = self.provider.open_connection()?;
        query_opt(&conn, "SELECT tag FROM tags WHERE tag = ?1", params![text])
    }

    fn read_all(&self) -> Result<BTreeSet<Tag>, DbError> {
        let conn = self.provider.open_connection()?;
        query_set(&conn, "SELECT tag FROM tags", [])
    }

    fn update(&self, tag: &Tag, text: &str) -> Result<bool, DbError> {
        let conn = self.provider.open_connection()?;
        let rows = rows_written(conn.execute(
            "UPDATE tags SET tag = ?1 WHERE tag = ?2",
            params![tag.text, text],
        ))?;
        Ok(rows == Some(1))
    }

    fn delete(&self, tag: &Tag) -> Result<DeleteOutcome, DbError> {
        let conn = self.provider.open_connection()?;
        let rows = rows_written(conn.execute("DELETE FROM tags WHERE tag = ?1", params![tag.text]))?
            .unwrap_or_default();
        debug!(tag = %tag, rows, "tag deleted");
        Ok(DeleteOutcome::from_rows(rows))
    }

    fn delete_all(&self) -> Result<usize, DbError> {
        let conn = self.provider.open_connection()?;
        Ok(rows_written(conn.execute("DELETE FROM tags", []))?.unwrap_or_default())
    }
}
