//! Table definitions
//!
//! The tagging surrogate id is the implicit `rowid` of `taggings`; queries
//! expose it as `taggingid`.

use rusqlite::Connection;

pub const CREATE_FILES: &str = "CREATE TABLE IF NOT EXISTS files (
    fileid INTEGER PRIMARY KEY CHECK (fileid >= 0),
    path   TEXT NOT NULL UNIQUE
)";

pub const CREATE_TAGS: &str = "CREATE TABLE IF NOT EXISTS tags (
    tag TEXT PRIMARY KEY
)";

pub const CREATE_TAGGINGS: &str = "CREATE TABLE IF NOT EXISTS taggings (
    fileid  INTEGER NOT NULL,
    tag     TEXT NOT NULL,
    comment TEXT,
    PRIMARY KEY (fileid, tag),
    FOREIGN KEY (fileid) REFERENCES files (fileid),
    FOREIGN KEY (tag) REFERENCES tags (tag)
)";

/// Create the three tables if they do not exist yet
///
/// # Errors
///
/// Returns the underlying SQLite error if any statement fails.
pub fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
    for ddl in [CREATE_FILES, CREATE_TAGS, CREATE_TAGGINGS] {
        conn.execute(ddl, [])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<Vec<String>>>()
            .unwrap()
    }

    #[test]
    fn test_create_tables() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        assert_eq!(table_names(&conn), vec!["files", "taggings", "tags"]);
    }

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn.execute("INSERT INTO tags (tag) VALUES ('keep')", []).unwrap();
        create_tables(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM tags", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_negative_file_id_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        let result = conn.execute("INSERT INTO files (fileid, path) VALUES (-5, '/x')", []);
        assert!(result.is_err());
    }
}
