//! Add and rm commands - register and unregister files

use super::{Result, check, resolve_path};
use crate::{App, TagbaseError};
use dialoguer::Confirm;
use std::path::{Path, PathBuf};

/// Execute the add command - register one or more files
///
/// Files that are already registered are skipped with a warning.
///
/// # Errors
/// Returns an error if a path cannot be accessed or nothing could be added
pub fn add(app: &App, paths: &[PathBuf], no_canonicalize: bool, quiet: bool) -> Result<()> {
    let mut added = 0;
    let mut skipped = Vec::new();

    for path in paths {
        let full = if no_canonicalize {
            path.clone()
        } else {
            path.canonicalize().map_err(|e| {
                TagbaseError::InvalidInput(format!("Cannot access path '{}': {}", path.display(), e))
            })?
        };

        let outcome = app.add_file(&full, !quiet);
        if outcome.success {
            added += 1;
            if !quiet {
                println!("Added {}", full.display());
            }
        } else {
            if let Some(message) = outcome.message {
                eprintln!("Warning: {message}");
            }
            skipped.push(full);
        }
    }

    if added == 0 && !skipped.is_empty() {
        return Err(TagbaseError::Failed("No files were added".into()));
    }
    if !quiet && !skipped.is_empty() {
        println!("Added {added} file(s), skipped {}", skipped.len());
    }
    Ok(())
}

/// Execute the rm command - unregister a file and drop its tags
///
/// # Errors
/// Returns an error if the file is not registered, the prompt fails, or the
/// store rejects the delete
pub fn remove(app: &App, path: &Path, yes: bool, quiet: bool) -> Result<()> {
    let full = resolve_path(path)?;
    let file = app.find_file(&full)?.ok_or_else(|| {
        TagbaseError::InvalidInput(format!("{} is not registered", full.display()))
    })?;

    if !yes && !quiet {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove {} and all of its tags?", full.display()))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    check(app.delete_file(&file, true))?;
    if !quiet {
        println!("Removed {}", full.display());
    }
    Ok(())
}
