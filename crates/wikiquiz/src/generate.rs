//! The quiz generation form.

use tracing::{info, warn};

use crate::client::{GenerateRequest, QuizBackend};
use crate::config::GenerateConfig;
use crate::error::Result;
use crate::quiz::Quiz;
use crate::validate::validate_article_url;

/// Shown when generation fails and the backend gave no detail.
pub const GENERATE_FAILED: &str = "Failed to generate quiz. Please try again.";

/// Article URL plus generation flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateForm {
    /// The article URL as entered.
    pub url: String,
    /// Ignore the backend's cached quiz for this URL.
    pub force_regenerate: bool,
    /// Ask the backend to keep the article's raw HTML.
    pub store_raw_html: bool,
    error: Option<String>,
}

impl GenerateForm {
    /// Create a form for `url` with flags taken from configuration.
    #[must_use]
    pub fn new(url: impl Into<String>, defaults: &GenerateConfig) -> Self {
        Self {
            url: url.into(),
            force_regenerate: defaults.force_regenerate,
            store_raw_html: defaults.store_raw_html,
            error: None,
        }
    }

    /// The message from the last failed submission.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate the URL and ask the backend for a quiz.
    ///
    /// Invalid URLs are rejected without contacting the backend.
    ///
    /// # Errors
    ///
    /// Returns the validation or backend error. [`GenerateForm::error`] then
    /// holds the message to show.
    pub async fn submit(&mut self, backend: &dyn QuizBackend) -> Result<Quiz> {
        self.error = None;

        let result = self.send(backend).await;
        if let Err(err) = &result {
            warn!(url = %self.url, error = %err, "quiz generation failed");
            self.error = Some(err.user_message(GENERATE_FAILED));
        }
        result
    }

    async fn send(&self, backend: &dyn QuizBackend) -> Result<Quiz> {
        let url = validate_article_url(&self.url)?;
        let request = GenerateRequest {
            url: url.to_string(),
            force_regenerate: self.force_regenerate,
            store_raw_html: self.store_raw_html,
        };
        info!(url, force = request.force_regenerate, "generating quiz");
        backend.generate_quiz(&request).await
    }

    /// Clear the URL and any error to start over.
    pub fn reset(&mut self) {
        self.url.clear();
        self.error = None;
    }
}
