//! List command - list files or tags in the database

use super::Result;
use crate::cli::ListVariant;
use crate::output::{self, Style};
use crate::App;

/// Execute the list command
///
/// # Errors
/// Returns an error if the store cannot be read or JSON output fails
pub fn execute(app: &App, variant: ListVariant, json: bool, style: Style) -> Result<()> {
    let snapshot = app.snapshot()?;

    if json {
        let rendered = match variant {
            ListVariant::Files => serde_json::to_string_pretty(&snapshot.files)?,
            ListVariant::Tags => serde_json::to_string_pretty(&snapshot.tags)?,
        };
        println!("{rendered}");
        return Ok(());
    }

    match variant {
        ListVariant::Files => {
            if snapshot.files.is_empty() {
                if !style.quiet {
                    println!("No files found in database.");
                }
                return Ok(());
            }
            if !style.quiet {
                println!("Files in database:");
            }
            for line in output::render_all(&snapshot.files, style) {
                println!("{line}");
            }
        }
        ListVariant::Tags => list_tags(app, style.quiet)?,
    }
    Ok(())
}

/// Print every tag with the number of files using it
///
/// # Errors
/// Returns an error if the store cannot be read
pub fn list_tags(app: &App, quiet: bool) -> Result<()> {
    let counts = app.repo().tags().usage_counts()?;

    if counts.is_empty() {
        if !quiet {
            println!("No tags found in database.");
        }
        return Ok(());
    }
    if !quiet {
        println!("Tags in database:");
    }
    for (tag, count) in &counts {
        println!("{}", output::tag_with_count(tag, *count, quiet));
    }
    Ok(())
}
