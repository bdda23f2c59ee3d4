//! Tag, untag, edit and show commands

use super::{Result, check, resolve_path};
use crate::output::{self, Render, Style};
use crate::{App, EditSession, TagbaseError, TaggedFile};
use std::path::{Path, PathBuf};

fn require_file(file: Option<PathBuf>) -> Result<PathBuf> {
    let file = file.ok_or_else(|| TagbaseError::InvalidInput("No file provided".into()))?;
    resolve_path(&file)
}

fn commit(app: &App, session: &mut EditSession) -> Result<()> {
    let report = app.update_associations(session);
    match report.failure_summary() {
        None => Ok(()),
        Some(summary) => Err(TagbaseError::Failed(format!("Could not save tags: {summary}"))),
    }
}

/// Execute the tag command - add tags to a file, registering it if needed
///
/// Tags the file already carries are left alone.
///
/// # Errors
/// Returns an error if the file cannot be accessed or the store rejects a change
pub fn execute(
    app: &App,
    file: Option<PathBuf>,
    tags: &[String],
    comment: Option<String>,
    quiet: bool,
) -> Result<()> {
    let path = require_file(file)?;
    if tags.is_empty() {
        return Err(TagbaseError::InvalidInput("No tags provided".into()));
    }

    if app.find_file(&path)?.is_none() {
        check(app.add_file(&path, true))?;
    }

    let mut session = app.begin_edit(&path)?;
    let current: Vec<String> = session.working_set().into_iter().map(|t| t.tag).collect();
    let new_tags: Vec<&String> = tags.iter().filter(|t| !current.contains(*t)).collect();
    for tag in &new_tags {
        session.add_tag(tag, comment.clone());
    }

    commit(app, &mut session)?;
    if !quiet {
        if new_tags.is_empty() {
            println!("{} already has all of those tags", path.display());
        } else {
            let names: Vec<&str> = new_tags.iter().map(|t| t.as_str()).collect();
            println!("Tagged {} with: {}", path.display(), names.join(", "));
        }
    }
    Ok(())
}

/// Execute the untag command - remove tags from a file
///
/// # Errors
/// Returns an error if the file is not registered or the store rejects a change
pub fn untag(app: &App, file: Option<PathBuf>, tags: &[String], all: bool, quiet: bool) -> Result<()> {
    let path = require_file(file)?;
    let mut session = app.begin_edit(&path)?;

    if all {
        for tagging in session.base() {
            session.record_removal(tagging);
        }
    } else if tags.is_empty() {
        return Err(TagbaseError::InvalidInput(
            "No tags provided. Use -t to specify tags or --all to remove all tags".into(),
        ));
    } else {
        for tag in tags {
            session.remove_tag(tag);
        }
    }

    commit(app, &mut session)?;
    if !quiet {
        if all {
            println!("Removed all tags from {}", path.display());
        } else {
            println!("Removed tags {} from {}", tags.join(", "), path.display());
        }
    }
    Ok(())
}

/// Arguments of the edit command
#[derive(Debug, Clone, Default)]
pub struct EditArgs {
    pub add: Vec<String>,
    pub remove: Vec<String>,
    pub comment: Option<String>,
    pub move_to: Option<PathBuf>,
    pub dry_run: bool,
}

/// Execute the edit command - record a new path and tag changes in one save
///
/// # Errors
/// Returns an error if the file is not registered or any part of the save fails
pub fn edit(app: &App, path: &Path, args: EditArgs, style: Style) -> Result<()> {
    let path = resolve_path(path)?;
    let mut session = app.begin_edit(&path)?;

    for tag in &args.remove {
        session.remove_tag(tag);
    }
    for tag in &args.add {
        session.add_tag(tag, args.comment.clone());
    }

    let new_path = match &args.move_to {
        Some(target) => resolve_path(target)?,
        None => session.file().path.clone(),
    };

    if args.dry_run {
        if !style.quiet {
            println!("{} would have tags:", output::format_path(&new_path, style.path_format));
        }
        for line in output::render_all(&session.working_set(), style) {
            println!("{line}");
        }
        session.cancel();
        return Ok(());
    }

    let file = TaggedFile::with_id(session.file().id, &new_path);
    check(app.save_file(&file, &mut session, true))?;
    if !style.quiet {
        println!("Saved {}", output::format_path(&new_path, style.path_format));
    }
    Ok(())
}

/// Execute the show command - print one file's tags
///
/// # Errors
/// Returns an error if the file is not registered or the store cannot be read
pub fn show(app: &App, path: &Path, style: Style) -> Result<()> {
    let path = resolve_path(path)?;
    let session = app.begin_edit(&path)?;
    let taggings = session.base();

    if !style.quiet {
        println!("{}", output::colorize_path(&session.file().path, style.path_format));
        if taggings.is_empty() {
            println!("  (no tags)");
        }
    }
    for tagging in &taggings {
        println!("{}", tagging.render(style));
    }
    session.cancel();
    Ok(())
}
