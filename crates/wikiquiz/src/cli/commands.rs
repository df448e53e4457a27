//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Generate command arguments.
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Wikipedia article URL (e.g. <https://en.wikipedia.org/wiki/Alan_Turing>)
    pub url: String,

    /// Regenerate even if the backend has a cached quiz (ignore cache)
    #[arg(short, long)]
    pub force: bool,

    /// Ask the backend to store the article's raw HTML
    #[arg(long)]
    pub store_raw_html: bool,

    /// Take the quiz interactively instead of showing the answers
    #[arg(short, long, conflicts_with = "json")]
    pub take: bool,

    /// Output the quiz as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// History command arguments.
#[derive(Debug, Args)]
pub struct HistoryCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Quiz id, as listed by `history`
    pub id: i64,

    /// Take the quiz interactively instead of showing the answers
    #[arg(short, long, conflicts_with = "json")]
    pub take: bool,

    /// Output the quiz as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Quiz id, as listed by `history`
    pub id: i64,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
