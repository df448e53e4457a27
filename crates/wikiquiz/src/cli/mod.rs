//! Command-line interface for wikiquiz.
//!
//! This module provides the CLI structure for the `wikiquiz` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, DeleteCommand, GenerateCommand, HistoryCommand, ShowCommand};

/// wikiquiz - Turn Wikipedia articles into quizzes
///
/// Submits article URLs to the quiz backend, shows or lets you take the
/// generated quizzes, and manages the history of past quizzes.
#[derive(Debug, Parser)]
#[command(name = "wikiquiz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a quiz from a Wikipedia article
    Generate(GenerateCommand),

    /// List previously generated quizzes
    History(HistoryCommand),

    /// Show or take a quiz from history
    Show(ShowCommand),

    /// Delete a quiz from history
    Delete(DeleteCommand),

    /// Print example article URLs
    Examples,

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Examples,
        }
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "wikiquiz");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity() {
        use crate::logging::Verbosity;

        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(2, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(3, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "wikiquiz",
            "generate",
            "https://en.wikipedia.org/wiki/Alan_Turing",
            "--force",
            "--take",
        ])
        .unwrap();
        let Command::Generate(cmd) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(cmd.url, "https://en.wikipedia.org/wiki/Alan_Turing");
        assert!(cmd.force);
        assert!(cmd.take);
        assert!(!cmd.store_raw_html);
    }

    #[test]
    fn test_take_conflicts_with_json() {
        let result = Cli::try_parse_from(["wikiquiz", "show", "3", "--take", "--json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_history() {
        let cli = Cli::try_parse_from(["wikiquiz", "history", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::History(HistoryCommand { json: true })));
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["wikiquiz", "show", "12"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Show(ShowCommand { id: 12, take: false, json: false })
        ));
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from(["wikiquiz", "delete", "7", "-y"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Delete(DeleteCommand { id: 7, yes: true })
        ));
    }

    #[test]
    fn test_parse_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["wikiquiz", "show", "abc"]).is_err());
    }

    #[test]
    fn test_parse_examples() {
        let cli = Cli::try_parse_from(["wikiquiz", "examples"]).unwrap();
        assert!(matches!(cli.command, Command::Examples));
    }

    #[test]
    fn test_parse_config_show() {
        let cli = Cli::try_parse_from(["wikiquiz", "config", "show", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli =
            Cli::try_parse_from(["wikiquiz", "-c", "/custom/config.toml", "history"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose_after_subcommand() {
        let cli = Cli::try_parse_from(["wikiquiz", "history", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
