//! `wikiquiz` - a terminal client for a Wikipedia-article quiz generator
//!
//! The quiz backend scrapes articles and writes the questions. This crate
//! validates article URLs, talks to the backend's HTTP API, and presents
//! quizzes for viewing or taking, along with the history of past quizzes.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod generate;
pub mod history;
pub mod interactive;
pub mod logging;
pub mod quiz;
pub mod render;
pub mod session;
pub mod validate;

pub use client::{ApiClient, GenerateRequest, QuizBackend};
pub use config::Config;
pub use error::{Error, Result};
pub use generate::GenerateForm;
pub use history::History;
pub use logging::init_logging;
pub use quiz::{Question, Quiz, QuizSummary};
pub use session::{Mode, QuizSession, Score};
