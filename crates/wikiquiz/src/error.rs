//! Error types for wikiquiz.
//!
//! This module defines all error types used throughout the wikiquiz crate,
//! along with the short, user-facing messages shown when an operation fails.

use thiserror::Error;

use crate::validate::UrlError;

/// The main error type for wikiquiz operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    /// The article URL was rejected before contacting the backend.
    #[error(transparent)]
    InvalidUrl(#[from] UrlError),

    /// The quiz was submitted before every question had an answer.
    #[error("quiz incomplete: {answered} of {total} questions answered")]
    IncompleteQuiz {
        /// Number of questions with a selected answer.
        answered: usize,
        /// Number of questions in the quiz.
        total: usize,
    },

    /// A question or option index was outside the quiz.
    #[error("no such {what}: {index}")]
    OutOfRange {
        /// What was being indexed ("question" or "option").
        what: &'static str,
        /// The offending index.
        index: usize,
    },

    /// The operation is not available in the current quiz mode.
    #[error("not allowed in {mode} mode: {operation}")]
    WrongMode {
        /// The mode the session was in.
        mode: &'static str,
        /// What was attempted.
        operation: &'static str,
    },

    /// Interactive input ended before the quiz was finished.
    #[error("input closed before the quiz was finished")]
    InputClosed,

    // === Backend Errors ===
    /// The backend answered with a non-success status.
    #[error("backend returned {status}{}", detail_suffix(.detail.as_deref()))]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `detail` field of the error body, if any.
        detail: Option<String>,
    },

    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for wikiquiz operations.
pub type Result<T> = std::result::Result<T, Error>;

fn detail_suffix(detail: Option<&str>) -> String {
    detail.map(|d| format!(": {d}")).unwrap_or_default()
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a backend error from a status code and optional detail.
    #[must_use]
    pub fn api(status: u16, detail: Option<String>) -> Self {
        Self::Api { status, detail }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if the backend reported that the requested quiz does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// The message to show the user, falling back to `fallback` when the
    /// error carries nothing more useful.
    ///
    /// URL validation errors and backend `detail` strings are shown as-is;
    /// everything else is replaced by the fallback.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::InvalidUrl(err) => err.to_string(),
            Self::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_with_detail() {
        let err = Error::api(500, Some("Error generating quiz: boom".to_string()));
        assert_eq!(
            err.to_string(),
            "backend returned 500: Error generating quiz: boom"
        );
    }

    #[test]
    fn test_api_error_display_without_detail() {
        let err = Error::api(502, None);
        assert_eq!(err.to_string(), "backend returned 502");
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::api(404, Some("Quiz not found".to_string())).is_not_found());
        assert!(!Error::api(500, None).is_not_found());
        assert!(!Error::InputClosed.is_not_found());
    }

    #[test]
    fn test_user_message_prefers_detail() {
        let err = Error::api(400, Some("Failed to scrape Wikipedia article.".to_string()));
        assert_eq!(
            err.user_message("Failed to generate quiz. Please try again."),
            "Failed to scrape Wikipedia article."
        );
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = Error::api(500, None);
        assert_eq!(err.user_message("Failed to delete quiz"), "Failed to delete quiz");

        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: Error = io_err.into();
        assert_eq!(err.user_message("Failed to load quiz history"), "Failed to load quiz history");
    }

    #[test]
    fn test_user_message_for_invalid_url() {
        let err: Error = UrlError::Empty.into();
        assert_eq!(err.user_message("unused"), "Please enter a Wikipedia URL");
    }

    #[test]
    fn test_incomplete_quiz_display() {
        let err = Error::IncompleteQuiz {
            answered: 3,
            total: 10,
        };
        assert_eq!(err.to_string(), "quiz incomplete: 3 of 10 questions answered");
    }

    #[test]
    fn test_out_of_range_display() {
        let err = Error::OutOfRange {
            what: "option",
            index: 7,
        };
        assert_eq!(err.to_string(), "no such option: 7");
    }

    #[test]
    fn test_wrong_mode_display() {
        let err = Error::WrongMode {
            mode: "view",
            operation: "submit",
        };
        assert_eq!(err.to_string(), "not allowed in view mode: submit");
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::config("timeout_secs must be greater than 0");
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }
}
