//! Schema-aware row decoding
//!
//! Each query knows which columns it selected. [`Columns`] captures that list
//! from the prepared statement, and [`FromRow`] decoders ask it whether an
//! optional column is present before reading it.

use super::DbError;
use crate::model::{Tag, TaggedFile, Tagging, UNASSIGNED_ID};
use rusqlite::{Connection, Params, Row, Statement};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Column names selected by a statement
#[derive(Debug, Clone, Default)]
pub struct Columns {
    names: Vec<String>,
}

impl Columns {
    #[must_use]
    pub fn of(stmt: &Statement<'_>) -> Self {
        Self {
            names: stmt.column_names().into_iter().map(str::to_owned).collect(),
        }
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}

impl<S: Into<String>> FromIterator<S> for Columns {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Decode an entity from a result row
pub trait FromRow: Sized {
    /// # Errors
    ///
    /// Returns the SQLite error if a required column is missing or has the wrong type.
    fn from_row(row: &Row<'_>, columns: &Columns) -> rusqlite::Result<Self>;
}

impl FromRow for TaggedFile {
    fn from_row(row: &Row<'_>, _columns: &Columns) -> rusqlite::Result<Self> {
        let id: i64 = row.get("fileid")?;
        let path: String = row.get("path")?;
        Ok(Self::with_id(id, PathBuf::from(path)))
    }
}

impl FromRow for Tag {
    fn from_row(row: &Row<'_>, _columns: &Columns) -> rusqlite::Result<Self> {
        Ok(Self::from_nullable(row.get("tag")?))
    }
}

impl FromRow for Tagging {
    fn from_row(row: &Row<'_>, columns: &Columns) -> rusqlite::Result<Self> {
        let id = if columns.has("taggingid") {
            row.get("taggingid")?
        } else {
            UNASSIGNED_ID
        };
        let comment = if columns.has("comment") {
            row.get("comment")?
        } else {
            None
        };
        Ok(Self {
            id,
            file_id: row.get("fileid")?,
            tag: row.get::<_, Option<String>>("tag")?.unwrap_or_default(),
            comment,
        })
    }
}

/// Run a query and collect every row into an ordered set
///
/// # Errors
///
/// Returns `DbError::Store` if preparing, executing or decoding fails.
pub fn query_set<T, P>(conn: &Connection, sql: &str, params: P) -> Result<BTreeSet<T>, DbError>
where
    T: FromRow + Ord,
    P: Params,
{
    let mut stmt = conn.prepare(sql)?;
    let columns = Columns::of(&stmt);
    let rows = stmt.query_map(params, |row| T::from_row(row, &columns))?;

    let mut out = BTreeSet::new();
    for row in rows {
        out.insert(row?);
    }
    Ok(out)
}

/// Run a query expected to match at most one row
///
/// # Errors
///
/// Returns `DbError::Store` if preparing, executing or decoding fails.
pub fn query_opt<T, P>(conn: &Connection, sql: &str, params: P) -> Result<Option<T>, DbError>
where
    T: FromRow,
    P: Params,
{
    let mut stmt = conn.prepare(sql)?;
    let columns = Columns::of(&stmt);
    let mut rows = stmt.query(params)?;

    let found = match rows.next()? {
        Some(row) => Some(T::from_row(row, &columns)?),
        None => None,
    };
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn_with_taggings() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE taggings (fileid INTEGER, tag TEXT, comment TEXT);
             INSERT INTO taggings VALUES (1, 'work', 'urgent');
             INSERT INTO taggings VALUES (1, 'home', NULL);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_columns_has() {
        let columns: Columns = ["fileid", "Tag"].into_iter().collect();
        assert!(columns.has("fileid"));
        assert!(columns.has("tag"));
        assert!(!columns.has("comment"));
    }

    #[test]
    fn test_tagging_without_optional_columns() {
        let conn = conn_with_taggings();
        let set: BTreeSet<Tagging> =
            query_set(&conn, "SELECT fileid, tag FROM taggings", []).unwrap();

        assert_eq!(set.len(), 2);
        for tagging in &set {
            assert_eq!(tagging.id, UNASSIGNED_ID);
            assert!(tagging.comment.is_none());
        }
    }

    #[test]
    fn test_tagging_with_all_columns() {
        let conn = conn_with_taggings();
        let found: Option<Tagging> = query_opt(
            &conn,
            "SELECT rowid AS taggingid, fileid, tag, comment FROM taggings WHERE tag = ?1",
            ["work"],
        )
        .unwrap();

        let tagging = found.unwrap();
        assert_eq!(tagging.id, 1);
        assert_eq!(tagging.comment.as_deref(), Some("urgent"));
    }

    #[test]
    fn test_null_tag_decodes_to_empty() {
        let conn = Connection::open_in_memory().unwrap();
        let tag: Option<Tag> = query_opt(&conn, "SELECT NULL AS tag", []).unwrap();
        assert_eq!(tag, Some(Tag::new("")));
    }

    #[test]
    fn test_query_opt_no_rows() {
        let conn = conn_with_taggings();
        let found: Option<Tagging> =
            query_opt(&conn, "SELECT fileid, tag FROM taggings WHERE fileid = 99", []).unwrap();
        assert!(found.is_none());
    }
}
