//! Output formatting for CLI display
//!
//! Each entity implements [`Render`], so listing code is generic over what
//! it prints and never inspects types at runtime.

use crate::config::PathFormat;
use crate::controller::FileEntry;
use crate::model::{Tag, TaggedFile, Tagging};
use colored::Colorize;
use std::path::Path;

/// Display settings shared by every renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub path_format: PathFormat,
    pub quiet: bool,
}

/// One-line rendering of an entity
pub trait Render {
    fn render(&self, style: Style) -> String;
}

/// Format a path according to the display mode
#[must_use]
pub fn format_path(path: &Path, format: PathFormat) -> String {
    match format {
        PathFormat::Absolute => path.display().to_string(),
        PathFormat::Relative => {
            if let Ok(cwd) = std::env::current_dir()
                && let Ok(rel_path) = path.strip_prefix(&cwd)
            {
                return rel_path.display().to_string();
            }
            // Fallback to absolute if relative path cannot be computed
            path.display().to_string()
        }
    }
}

/// Color a path based on file existence (green if exists, red if missing)
#[must_use]
pub fn colorize_path(path: &Path, format: PathFormat) -> String {
    let formatted = format_path(path, format);
    if path.exists() {
        formatted.green().to_string()
    } else {
        formatted.red().to_string()
    }
}

impl Render for TaggedFile {
    fn render(&self, style: Style) -> String {
        if style.quiet {
            format_path(&self.path, style.path_format)
        } else {
            format!("  {:>4}  {}", self.id, colorize_path(&self.path, style.path_format))
        }
    }
}

impl Render for Tag {
    fn render(&self, style: Style) -> String {
        if style.quiet {
            self.text.clone()
        } else {
            format!("  {}", self.text.cyan())
        }
    }
}

impl Render for Tagging {
    fn render(&self, style: Style) -> String {
        match (&self.comment, style.quiet) {
            (_, true) => self.tag.clone(),
            (Some(comment), false) if !comment.is_empty() => {
                format!("  {} - {}", self.tag.cyan(), comment)
            }
            _ => format!("  {}", self.tag.cyan()),
        }
    }
}

impl Render for FileEntry {
    fn render(&self, style: Style) -> String {
        let path = format_path(&self.file.path, style.path_format);
        if style.quiet {
            path
        } else if self.taggings.is_empty() {
            format!("  {path} (no tags)")
        } else {
            format!("  {} [{}]", path, self.tags().join(", "))
        }
    }
}

/// Format a tag with usage count
#[must_use]
pub fn tag_with_count(tag: &str, count: usize, quiet: bool) -> String {
    if quiet {
        tag.to_string()
    } else {
        format!("  {tag} (used by {count} file(s))")
    }
}

/// Render a sequence of entities, one per line
pub fn render_all<'a, T, I>(items: I, style: Style) -> Vec<String>
where
    T: Render + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().map(|item| item.render(style)).collect()
}
