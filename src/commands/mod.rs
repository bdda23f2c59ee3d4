//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation through the [`App`](crate::App) controller.

pub mod files;
pub mod list;
pub mod tag;
pub mod tags;

use crate::{Outcome, TagbaseError};
use std::path::{Path, PathBuf};

type Result<T> = std::result::Result<T, TagbaseError>;

// Re-export execute functions for convenience
pub use list::execute as list;
pub use tag::execute as tag;
pub use tags::execute as tags;

/// Turn a failed outcome into an error carrying its message
pub(crate) fn check(outcome: Outcome) -> Result<()> {
    if outcome.success {
        Ok(())
    } else {
        Err(TagbaseError::Failed(
            outcome.message.unwrap_or_else(|| "Operation failed".into()),
        ))
    }
}

/// Resolve a user-supplied path to the form stored in the database
///
/// Existing files are canonicalized. Paths that no longer exist on disk are
/// made absolute so registered-but-deleted files can still be addressed.
pub(crate) fn resolve_path(path: &Path) -> Result<PathBuf> {
    match path.canonicalize() {
        Ok(full) => Ok(full),
        Err(_) => std::path::absolute(path).map_err(|e| {
            TagbaseError::InvalidInput(format!("Cannot access path '{}': {}", path.display(), e))
        }),
    }
}
