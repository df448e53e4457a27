//! `wikiquiz` - CLI for the Wikipedia quiz generator
//!
//! This binary submits article URLs to the quiz backend, presents quizzes
//! in view or take mode, and manages quiz history.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

use wikiquiz::cli::{Cli, Command, ConfigCommand, DeleteCommand, GenerateCommand, HistoryCommand};
use wikiquiz::generate::GENERATE_FAILED;
use wikiquiz::interactive::{confirm, take_quiz};
use wikiquiz::render::{render_history, render_quiz};
use wikiquiz::validate::EXAMPLE_URLS;
use wikiquiz::{
    init_logging, ApiClient, Config, GenerateForm, History, Quiz, QuizBackend, QuizSession,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Config commands must work even when the config file is broken, so the
    // runtime configuration is only loaded by commands that talk to the backend.
    match cli.command {
        Command::Config(cmd) => handle_config(cli.config, cmd, &mut std::io::stdout().lock()),
        Command::Examples => {
            let mut out = std::io::stdout().lock();
            writeln!(out, "💡 Try these examples:")?;
            for url in EXAMPLE_URLS {
                writeln!(out, "  {url}")?;
            }
            Ok(())
        }
        Command::Generate(cmd) => {
            let (config, client) = connect(cli.config)?;
            handle_generate(&config, &client, cmd).await
        }
        Command::History(cmd) => {
            let (_, client) = connect(cli.config)?;
            handle_history(&client, &cmd).await
        }
        Command::Show(cmd) => {
            let (_, client) = connect(cli.config)?;
            let quiz = fetch_quiz(&client, cmd.id).await?;
            present(quiz, cmd.take, cmd.json)
        }
        Command::Delete(cmd) => handle_delete(cli.config, &cmd).await,
    }
}

fn connect(config_path: Option<PathBuf>) -> Result<(Config, ApiClient)> {
    let config = Config::load_from(config_path)?;
    let client = ApiClient::new(&config.api)?;
    Ok((config, client))
}

fn present(quiz: Quiz, take: bool, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&quiz)?);
        return Ok(());
    }

    let mut session = QuizSession::new(quiz);
    if take {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        take_quiz(&mut session, &mut stdin.lock(), &mut stdout.lock())?;
    } else {
        print!("{}", render_quiz(&session));
    }
    Ok(())
}

/// Message for a failed history action on quiz `id`. A missing quiz is
/// named; anything else gets the generic message `History` recorded.
fn history_failure(history: &History, err: &wikiquiz::Error, id: i64) -> anyhow::Error {
    if err.is_not_found() {
        anyhow!("Quiz {id} not found")
    } else {
        anyhow!(history.error().unwrap_or_default().to_string())
    }
}

async fn fetch_quiz(backend: &dyn QuizBackend, id: i64) -> Result<Quiz> {
    let mut history = History::new();
    let result = history.view_details(backend, id).await.cloned();
    result.map_err(|err| history_failure(&history, &err, id))
}

async fn delete_quiz(backend: &dyn QuizBackend, id: i64) -> Result<()> {
    let mut history = History::new();
    let result = history.delete(backend, id).await;
    result.map_err(|err| history_failure(&history, &err, id))
}

async fn handle_generate(
    config: &Config,
    backend: &dyn QuizBackend,
    cmd: GenerateCommand,
) -> Result<()> {
    let mut form = GenerateForm::new(cmd.url, &config.generate);
    form.force_regenerate |= cmd.force;
    form.store_raw_html |= cmd.store_raw_html;

    if !cmd.json {
        eprintln!("Generating quiz...");
    }
    match form.submit(backend).await {
        Ok(quiz) => present(quiz, cmd.take, cmd.json),
        Err(_) => bail!(form.error().unwrap_or(GENERATE_FAILED).to_string()),
    }
}

async fn handle_history(backend: &dyn QuizBackend, cmd: &HistoryCommand) -> Result<()> {
    let mut history = History::new();

    if history.refresh(backend).await.is_err() {
        bail!(history.error().unwrap_or_default().to_string());
    }

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(history.entries())?);
    } else {
        print!("{}", render_history(history.entries()));
    }
    Ok(())
}

async fn handle_delete(config_path: Option<PathBuf>, cmd: &DeleteCommand) -> Result<()> {
    if !cmd.yes {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let prompt = "Are you sure you want to delete this quiz?";
        if !confirm(prompt, &mut stdin.lock(), &mut stdout.lock())? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let (_, client) = connect(config_path)?;
    delete_quiz(&client, cmd.id).await?;
    println!("Quiz {} deleted.", cmd.id);
    Ok(())
}

fn handle_config<W: Write>(
    config_path: Option<PathBuf>,
    cmd: ConfigCommand,
    out: &mut W,
) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
            } else {
                writeln!(out, "Current Configuration")?;
                writeln!(out, "=====================")?;
                writeln!(out)?;
                writeln!(out, "[API]")?;
                writeln!(out, "  Base URL:           {}", config.api.base_url)?;
                writeln!(out, "  Timeout (secs):     {}", config.api.timeout_secs)?;
                writeln!(out, "  User agent:         {}", config.api.user_agent)?;
                writeln!(out)?;
                writeln!(out, "[Generate]")?;
                writeln!(out, "  Force regenerate:   {}", config.generate.force_regenerate)?;
                writeln!(out, "  Store raw HTML:     {}", config.generate.store_raw_html)?;
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            writeln!(out, "{}", path.display())?;
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            writeln!(out, "Validating configuration: {}", path.display())?;
            Config::load_from(Some(path.clone()))
                .with_context(|| format!("{} is not a valid configuration", path.display()))?;
            writeln!(out, "Configuration is valid.")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use wikiquiz::{GenerateRequest, QuizSummary};

    /// Backend whose every call fails with the same status and detail.
    #[derive(Debug)]
    struct FailingBackend {
        status: u16,
        detail: Option<&'static str>,
    }

    impl FailingBackend {
        fn error(&self) -> wikiquiz::Error {
            wikiquiz::Error::api(self.status, self.detail.map(String::from))
        }
    }

    #[async_trait]
    impl QuizBackend for FailingBackend {
        async fn generate_quiz(&self, _request: &GenerateRequest) -> wikiquiz::Result<Quiz> {
            Err(self.error())
        }

        async fn history(&self) -> wikiquiz::Result<Vec<QuizSummary>> {
            Err(self.error())
        }

        async fn quiz(&self, _id: i64) -> wikiquiz::Result<Quiz> {
            Err(self.error())
        }

        async fn delete_quiz(&self, _id: i64) -> wikiquiz::Result<()> {
            Err(self.error())
        }
    }

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wikiquiz_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn run_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> (Result<()>, String) {
        let mut out = Vec::new();
        let result = handle_config(config_path, cmd, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_config_path_ignores_broken_config() {
        let bad = write_config("path_bad.toml", "[api]\ntimeout_secs = 0\n");

        let (result, out) = run_config(Some(bad.clone()), ConfigCommand::Path);
        assert!(result.is_ok());
        assert_eq!(out.trim_end(), bad.display().to_string());
    }

    #[test]
    fn test_config_validate_reports_broken_config() {
        let bad = write_config("validate_bad.toml", "[api]\ntimeout_secs = 0\n");

        let (result, out) = run_config(Some(bad.clone()), ConfigCommand::Validate { file: None });
        assert!(out.starts_with("Validating configuration:"));
        assert!(!out.contains("Configuration is valid."));
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("is not a valid configuration"));
        assert!(err.contains("timeout_secs"));
    }

    #[test]
    fn test_config_validate_file_overrides_global_config() {
        let bad = write_config("global_bad.toml", "[api]\ntimeout_secs = 0\n");
        let good = write_config("explicit_good.toml", "[api]\ntimeout_secs = 30\n");

        let (result, out) = run_config(
            Some(bad),
            ConfigCommand::Validate {
                file: Some(good.clone()),
            },
        );
        assert!(result.is_ok());
        assert!(out.contains(&good.display().to_string()));
        assert!(out.ends_with("Configuration is valid.\n"));
    }

    #[test]
    fn test_config_show_fails_on_broken_config() {
        let bad = write_config("show_bad.toml", "[api]\nbase_url = \"ftp://nope\"\n");

        let (result, _) = run_config(Some(bad), ConfigCommand::Show { json: false });
        assert!(result.is_err());
    }

    #[test]
    fn test_config_show_json() {
        let good = write_config("show_good.toml", "[generate]\nstore_raw_html = true\n");

        let (result, out) = run_config(Some(good), ConfigCommand::Show { json: true });
        assert!(result.is_ok());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["generate"]["store_raw_html"], true);
    }

    #[tokio::test]
    async fn test_show_failure_hides_backend_detail() {
        let backend = FailingBackend {
            status: 500,
            detail: Some("Error fetching quiz: connection reset"),
        };

        let err = fetch_quiz(&backend, 3).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to load quiz details");
    }

    #[tokio::test]
    async fn test_show_missing_quiz_is_named() {
        let backend = FailingBackend {
            status: 404,
            detail: Some("Quiz not found"),
        };

        let err = fetch_quiz(&backend, 9).await.unwrap_err();
        assert_eq!(err.to_string(), "Quiz 9 not found");
    }

    #[tokio::test]
    async fn test_delete_failure_messages() {
        let backend = FailingBackend {
            status: 500,
            detail: Some("Error deleting quiz: locked"),
        };
        let err = delete_quiz(&backend, 4).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete quiz");

        let backend = FailingBackend {
            status: 404,
            detail: None,
        };
        let err = delete_quiz(&backend, 4).await.unwrap_err();
        assert_eq!(err.to_string(), "Quiz 4 not found");
    }

    #[tokio::test]
    async fn test_history_failure_uses_generic_message() {
        let backend = FailingBackend {
            status: 503,
            detail: Some("database unavailable"),
        };
        let cmd = HistoryCommand { json: false };

        let err = handle_history(&backend, &cmd).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to load quiz history");
    }
}
