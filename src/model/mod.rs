//! Entity model for tagbase
//!
//! Plain records for the three things the store knows about:
//!
//! - **`TaggedFile`**: a file on disk, identified by a store-assigned id and a unique path
//! - **`Tag`**: a tag, identified by its text
//! - **`Tagging`**: the association of one file with one tag, with an optional comment
//!
//! Records that have not been written yet carry [`UNASSIGNED_ID`] in place of
//! a store-assigned id.

mod file;
mod tag;
mod tagging;

pub use file::TaggedFile;
pub use tag::Tag;
pub use tagging::{Tagging, TaggingKey};

/// Sentinel id for records the store has not assigned an id to yet
pub const UNASSIGNED_ID: i64 = -1;

/// Returns true if `id` was assigned by the store
#[must_use]
pub const fn is_assigned(id: i64) -> bool {
    id >= 0
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod model_tests;
