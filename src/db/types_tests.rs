//! Unit tests for path text conversion

#[cfg(test)]
mod tests {
    use crate::db::error::DbError;
    use crate::db::types::PathString;
    use rusqlite::Connection;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_path_string_new() {
        let path = PathString::new("dir/file.txt").unwrap();
        assert_eq!(&*path, "dir/file.txt");
    }

    #[test]
    fn test_path_string_into_pathbuf() {
        let path = PathString::new(PathBuf::from("/tmp/b.txt")).unwrap();
        let back: PathBuf = path.into();
        assert_eq!(back, PathBuf::from("/tmp/b.txt"));
    }

    #[test]
    fn test_path_string_unicode() {
        let path = PathString::new("données/文件.txt").unwrap();
        assert_eq!(&*path, "données/文件.txt");
    }

    #[test]
    fn test_path_string_binds_as_text() {
        let conn = Connection::open_in_memory().unwrap();
        let path = PathString::new("/srv/a b.txt").unwrap();
        let echoed: String = conn
            .query_row("SELECT ?1", [&path], |row| row.get(0))
            .unwrap();
        assert_eq!(echoed, "/srv/a b.txt");
    }

    #[cfg(unix)]
    #[test]
    fn test_path_string_rejects_invalid_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(&[0x66, 0x6f, 0x80, 0x6f]);
        let result = PathString::new(Path::new(raw));
        assert!(matches!(result, Err(DbError::InvalidPath(_))));
    }
}
