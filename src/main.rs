//! Tagbase CLI application entry point
//!
//! This is the main executable for tagbase. It parses the command line,
//! loads configuration, opens the store and hands each command to the
//! controller.
//!
//! # Usage
//!
//! ```bash
//! # Register a file and tag it
//! tagbase add notes.txt
//! tagbase tag notes.txt work urgent -c "due friday"
//!
//! # Change a file's tags and record that it moved, in one save
//! tagbase edit notes.txt --add done --remove urgent --move-to archive/notes.txt
//!
//! # List files (default command) or tags
//! tagbase
//! tagbase list tags --json
//!
//! # Quiet mode (only output results)
//! tagbase -q show notes.txt
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/tagbase/config.toml` on Linux) and created on first run.
//! Logging goes to stderr; raise it with `-v`/`-vv` or `RUST_LOG`.

use tagbase::{
    App, TagbaseError,
    cli::{Cli, Commands, ConfigCommands},
    commands::{self, tag::EditArgs},
    config::{PathFormat, TagbaseConfig},
    output::Style,
};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, TagbaseError>;

/// Set up stderr logging from `RUST_LOG`, or from the verbosity flag
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "error",
        1 => "tagbase=debug",
        _ => "tagbase=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Handle the config command - manage application settings
///
/// # Errors
///
/// Returns `TagbaseError` if the configuration key is invalid, value parsing fails,
/// or configuration save fails.
fn handle_config_command(mut config: TagbaseConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = setting.split_once('=').ok_or_else(|| {
                TagbaseError::InvalidInput("Invalid format. Use: tagbase config set key=value".into())
            })?;
            let (key, value) = (key.trim(), value.trim());

            config.set_value(key, value)?;
            config.save()?;
            if !quiet {
                println!("Set {key} = {value}");
            }
        }
        ConfigCommands::Get { key } => {
            println!("{}", config.get_value(key)?);
        }
        ConfigCommands::Path => {
            println!("{}", TagbaseConfig::config_path()?.display());
        }
    }
    Ok(())
}

/// Main entry point for the tagbase application
///
/// # Errors
///
/// Returns `TagbaseError` if configuration loading fails, the store cannot be
/// opened, or any command handler returns an error.
fn run(cli: &Cli) -> Result<()> {
    let mut config = TagbaseConfig::load()?;
    let quiet = cli.quiet || config.quiet;
    let command = cli.get_command();

    if let Commands::Config { command } = &command {
        return handle_config_command(config, command, quiet);
    }

    if let Some(db) = &cli.db {
        config.database = Some(db.clone());
    }

    let path_format = if cli.absolute {
        PathFormat::Absolute
    } else if cli.relative {
        PathFormat::Relative
    } else {
        config.path_format
    };
    let style = Style { path_format, quiet };

    let app = App::open(&config)?;

    match &command {
        Commands::Add {
            paths,
            no_canonicalize,
        } => commands::files::add(&app, paths, *no_canonicalize, quiet)?,
        Commands::Remove { path, yes } => commands::files::remove(&app, path, *yes, quiet)?,
        Commands::Tag { comment, .. } => {
            commands::tag(&app, command.get_file(), command.get_tags(), comment.clone(), quiet)?;
        }
        Commands::Untag { all, .. } => {
            commands::tag::untag(&app, command.get_file(), command.get_tags(), *all, quiet)?;
        }
        Commands::Edit {
            path,
            add,
            remove,
            comment,
            move_to,
            dry_run,
        } => {
            let args = EditArgs {
                add: add.clone(),
                remove: remove.clone(),
                comment: comment.clone(),
                move_to: move_to.clone(),
                dry_run: *dry_run,
            };
            commands::tag::edit(&app, path, args, style)?;
        }
        Commands::Show { path } => commands::tag::show(&app, path, style)?,
        Commands::List { variant, json } => commands::list(&app, *variant, *json, style)?,
        Commands::Tags { command } => commands::tags(&app, command, quiet)?,
        Commands::Config { .. } => unreachable!(),
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
