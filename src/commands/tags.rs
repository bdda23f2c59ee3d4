//! Tags command - manage tags globally

use super::{Result, check, list};
use crate::cli::TagsCommands;
use crate::App;

/// Execute a tags subcommand
///
/// # Errors
/// Returns an error if the store rejects the change or cannot be read
pub fn execute(app: &App, command: &TagsCommands, quiet: bool) -> Result<()> {
    match command {
        TagsCommands::List => list::list_tags(app, quiet)?,
        TagsCommands::Add { tag } => {
            check(app.add_tag(tag, true))?;
            if !quiet {
                println!("Created tag '{tag}'");
            }
        }
        TagsCommands::Remove { tag } => {
            let used_by = app.repo().taggings().read_by_tag(tag)?.len();
            check(app.delete_tag(tag, true))?;
            if !quiet {
                println!("Removed tag '{tag}' from {used_by} file(s)");
            }
        }
    }
    Ok(())
}
