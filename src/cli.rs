//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for tagbase using the `clap` crate.
//! The CLI is the presentation layer: it parses intents and hands them to
//! [`App`](crate::App).
//!
//! # Commands
//!
//! - **add** / **rm**: register and unregister files
//! - **tag** / **untag**: add or remove tags on a file
//! - **edit**: move a file and change its tags in one save
//! - **show**: list one file's tags
//! - **list**: list files or tags (default)
//! - **tags**: manage tags globally
//! - **config**: read and write configuration
//!
//! Tag and untag accept both flag-based (`-f file -t tag1`) and positional
//! (`file tag1`) syntax.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// List variant for the list command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListVariant {
    /// List all files in the database
    #[default]
    Files,
    /// List all tags in the database
    Tags,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "tagbase")]
#[command(about = "Tag local files and keep the tags in a SQLite store", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Store file to use (overrides config)
    #[arg(long = "db", value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Log more detail to stderr (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Display absolute paths (overrides config)
    #[arg(long = "absolute", global = true, conflicts_with = "relative")]
    pub absolute: bool,

    /// Display relative paths (overrides config)
    #[arg(long = "relative", global = true, conflicts_with = "absolute")]
    pub relative: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Register files in the store
    #[command(visible_alias = "a")]
    Add {
        /// Files to register
        #[arg(value_name = "FILE", required = true)]
        paths: Vec<PathBuf>,

        /// Store paths as given instead of canonicalizing them
        #[arg(long = "no-canonicalize")]
        no_canonicalize: bool,
    },

    /// Unregister a file and drop its tags
    #[command(name = "rm", visible_alias = "remove")]
    Remove {
        /// File to unregister
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Skip confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Tag a file with one or more tags
    #[command(visible_alias = "t")]
    Tag {
        /// File to tag
        #[arg(short = 'f', long = "file", value_name = "FILE")]
        file_flag: Option<PathBuf>,

        /// Tags to apply
        #[arg(short = 't', long = "tags", value_name = "TAG", num_args = 0..)]
        tags_flag: Vec<String>,

        /// Comment stored with each new tagging
        #[arg(short = 'c', long = "comment")]
        comment: Option<String>,

        /// File to tag (positional)
        #[arg(value_name = "FILE", conflicts_with = "file_flag")]
        file_pos: Option<PathBuf>,

        /// Tags to apply (positional)
        #[arg(value_name = "TAGS", conflicts_with = "tags_flag")]
        tags_pos: Vec<String>,
    },

    /// Remove tags from a file
    #[command(visible_alias = "u")]
    Untag {
        /// File to untag
        #[arg(short = 'f', long = "file", value_name = "FILE")]
        file_flag: Option<PathBuf>,

        /// Tags to remove
        #[arg(short = 't', long = "tags", value_name = "TAG", num_args = 0..)]
        tags_flag: Vec<String>,

        /// Remove all tags from the file
        #[arg(short = 'a', long = "all", conflicts_with = "tags_flag", conflicts_with = "tags_pos")]
        all: bool,

        /// File to untag (positional)
        #[arg(value_name = "FILE", conflicts_with = "file_flag")]
        file_pos: Option<PathBuf>,

        /// Tags to remove (positional)
        #[arg(value_name = "TAGS", conflicts_with = "tags_flag")]
        tags_pos: Vec<String>,
    },

    /// Move a file and change its tags in a single save
    #[command(visible_alias = "e")]
    Edit {
        /// File to edit
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Tags to add
        #[arg(long = "add", value_name = "TAG")]
        add: Vec<String>,

        /// Tags to remove
        #[arg(long = "remove", value_name = "TAG")]
        remove: Vec<String>,

        /// Comment stored with each added tagging
        #[arg(short = 'c', long = "comment")]
        comment: Option<String>,

        /// New path to record for the file
        #[arg(long = "move-to", value_name = "PATH")]
        move_to: Option<PathBuf>,

        /// Print the resulting tags without saving
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// Show the tags of one file
    #[command(visible_alias = "s")]
    Show {
        /// File to show
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// List files or tags in the database
    #[command(visible_alias = "l")]
    List {
        /// What to list (files or tags)
        #[arg(default_value = "files")]
        variant: ListVariant,

        /// Print as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Manage tags globally
    Tags {
        #[command(subcommand)]
        command: TagsCommands,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Tag management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TagsCommands {
    /// List all tags with usage counts
    #[command(visible_alias = "ls")]
    List,

    /// Create a tag without attaching it to a file
    Add {
        /// Tag to create
        tag: String,
    },

    /// Remove a tag from all files and delete it
    #[command(visible_alias = "rm")]
    Remove {
        /// Tag to remove
        tag: String,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., quiet=true)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., database)
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Print the config file location
    Path,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The command to run; listing files when none was given
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::List {
            variant: ListVariant::Files,
            json: false,
        })
    }
}

impl Commands {
    /// Helper method to get the file path from either flag or positional argument
    #[must_use]
    pub fn get_file(&self) -> Option<PathBuf> {
        match self {
            Self::Tag {
                file_flag, file_pos, ..
            }
            | Self::Untag {
                file_flag, file_pos, ..
            } => file_flag.clone().or_else(|| file_pos.clone()),
            _ => None,
        }
    }

    /// Helper method to get tags from either flag or positional arguments
    #[must_use]
    pub fn get_tags(&self) -> &[String] {
        match self {
            Self::Tag {
                tags_flag, tags_pos, ..
            }
            | Self::Untag {
                tags_flag, tags_pos, ..
            } => {
                if tags_flag.is_empty() {
                    tags_pos
                } else {
                    tags_flag
                }
            }
            _ => &[],
        }
    }
}
