//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// inkdex: markdown posts index builder and query tool
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name (default: inkdex.toml)
    #[arg(short = 'C', long, default_value = "inkdex.toml")]
    pub config: PathBuf,

    /// subcommands (defaults to `index`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments for the `query` subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Index location: a file path or an http(s) URL.
    /// Defaults to the index inside the output directory.
    #[arg(short, long)]
    pub source: Option<String>,

    /// Free-text filter (title, content and tags, case-insensitive)
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Tag filter, repeatable. A post matches if it has any of them.
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Print a single post by slug
    #[arg(long)]
    pub slug: Option<String>,

    /// Print the tag frequency summary instead of posts
    #[arg(long = "tags")]
    pub tag_summary: bool,

    /// Keep reading filter commands from stdin after the first listing
    #[arg(short, long)]
    pub interactive: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scan the content directory and write the posts index
    Index,

    /// Generate sitemap.xml from an existing posts index
    Sitemap,

    /// Build the posts index, then the sitemap if enabled
    Build {
        /// enable sitemap generation
        #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        sitemap: Option<bool>,
    },

    /// Load the posts index and run a search or tag query against it
    Query {
        #[command(flatten)]
        args: QueryArgs,
    },

    /// Build, then serve the output directory over HTTP
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,

        /// rebuild the index when content changes
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },
}

impl Cli {
    /// Subcommand to run, `index` when none was given.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Index)
    }
}
