//! Past quizzes: listing, details and deletion.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::client::QuizBackend;
use crate::error::Result;
use crate::quiz::{Quiz, QuizSummary};

/// Shown when the history can't be fetched.
pub const LOAD_FAILED: &str = "Failed to load quiz history";
/// Shown when a quiz's details can't be fetched.
pub const DETAILS_FAILED: &str = "Failed to load quiz details";
/// Shown when a quiz can't be deleted.
pub const DELETE_FAILED: &str = "Failed to delete quiz";

/// Format a creation time the way the history table shows it,
/// e.g. `Jan 15, 2024, 02:05 PM`.
#[must_use]
pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// The history listing and the quiz whose details are open, if any.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<QuizSummary>,
    selected: Option<Quiz>,
    error: Option<String>,
}

impl History {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows in backend order (newest first).
    #[must_use]
    pub fn entries(&self) -> &[QuizSummary] {
        &self.entries
    }

    /// The quiz opened with [`History::view_details`].
    #[must_use]
    pub fn selected(&self) -> Option<&Quiz> {
        self.selected.as_ref()
    }

    /// The last user-facing error, cleared by the next successful action.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn fail<T>(&mut self, message: &str, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => {
                self.error = None;
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, "{message}");
                self.error = Some(message.to_string());
                Err(err)
            }
        }
    }

    /// Reload the listing from the backend.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the previous rows are kept.
    pub async fn refresh(&mut self, backend: &dyn QuizBackend) -> Result<&[QuizSummary]> {
        let result = backend.history().await;
        let rows = self.fail(LOAD_FAILED, result)?;
        debug!(count = rows.len(), "history loaded");
        self.entries = rows;
        Ok(&self.entries)
    }

    /// Fetch a quiz and open its details.
    ///
    /// # Errors
    ///
    /// Returns the backend error; nothing is opened.
    pub async fn view_details(&mut self, backend: &dyn QuizBackend, id: i64) -> Result<&Quiz> {
        let result = backend.quiz(id).await;
        let quiz = self.fail(DETAILS_FAILED, result)?;
        Ok(&*self.selected.insert(quiz))
    }

    /// Close the details view.
    pub fn close_details(&mut self) {
        self.selected = None;
    }

    /// Delete a quiz on the backend, then drop its row locally.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the row is kept.
    pub async fn delete(&mut self, backend: &dyn QuizBackend, id: i64) -> Result<()> {
        let result = backend.delete_quiz(id).await;
        self.fail(DELETE_FAILED, result)?;
        self.entries.retain(|row| row.id != id);
        if self.selected.as_ref().is_some_and(|quiz| quiz.id == id) {
            self.selected = None;
        }
        Ok(())
    }
}
