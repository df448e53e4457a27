//! View and take modes for a single quiz.
//!
//! A [`QuizSession`] wraps a [`Quiz`] with the user's selections. In view
//! mode every answer is revealed. In take mode the user picks one option per
//! question, submits once all are answered, and is scored.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::quiz::{Question, Quiz};

/// Fraction of correct answers at which a score counts as a great job.
pub const GREAT_JOB_RATIO: f64 = 0.7;

/// How the quiz is being presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Questions shown with answers and explanations.
    #[default]
    View,
    /// The user answers, then submits for a score.
    Take,
}

impl Mode {
    fn name(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Take => "take",
        }
    }
}

/// How an option should be decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    /// Nothing special.
    Plain,
    /// Chosen by the user, not yet graded.
    Selected,
    /// The correct answer, revealed.
    Correct,
    /// Chosen by the user and wrong.
    Incorrect,
}

/// Result of a submitted quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Number of correctly answered questions.
    pub correct: usize,
    /// Number of questions.
    pub total: usize,
}

/// Encouragement tier for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every answer correct.
    Perfect,
    /// At least [`GREAT_JOB_RATIO`] correct.
    Great,
    /// Anything lower.
    KeepLearning,
}

impl Verdict {
    /// Message shown under the score.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Perfect => "🎉 Perfect Score!",
            Self::Great => "👏 Great job!",
            Self::KeepLearning => "💪 Keep learning!",
        }
    }
}

impl Score {
    /// Classify the score.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn verdict(&self) -> Verdict {
        if self.correct == self.total {
            Verdict::Perfect
        } else if self.correct as f64 >= self.total as f64 * GREAT_JOB_RATIO {
            Verdict::Great
        } else {
            Verdict::KeepLearning
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.correct, self.total)
    }
}

/// A quiz being viewed or taken.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: Quiz,
    mode: Mode,
    answers: BTreeMap<usize, String>,
    submitted: bool,
}

impl QuizSession {
    /// Start a session in view mode.
    #[must_use]
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            mode: Mode::View,
            answers: BTreeMap::new(),
            submitted: false,
        }
    }

    /// The quiz being presented.
    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether the quiz has been submitted.
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Switch mode, discarding any answers and submission.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset();
    }

    /// Clear answers and submission, staying in the current mode.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.submitted = false;
    }

    fn question(&self, index: usize) -> Result<&Question> {
        self.quiz.quiz.get(index).ok_or(Error::OutOfRange {
            what: "question",
            index,
        })
    }

    /// Select option `option` for question `question`.
    ///
    /// Returns `false` without changing anything when the session is in view
    /// mode or already submitted. A later selection replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if either index is outside the quiz.
    pub fn select_answer(&mut self, question: usize, option: usize) -> Result<bool> {
        let chosen = self
            .question(question)?
            .options
            .get(option)
            .cloned()
            .ok_or(Error::OutOfRange {
                what: "option",
                index: option,
            })?;
        if self.mode != Mode::Take || self.submitted {
            return Ok(false);
        }
        self.answers.insert(question, chosen);
        Ok(true)
    }

    /// The option text selected for a question, if any.
    #[must_use]
    pub fn selected(&self, question: usize) -> Option<&str> {
        self.answers.get(&question).map(String::as_str)
    }

    /// Number of questions with a selected answer.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Whether every question has an answer.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answered_count() == self.quiz.question_count()
    }

    /// Submit the answers for grading.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongMode`] outside take mode and
    /// [`Error::IncompleteQuiz`] while any question is unanswered.
    pub fn submit(&mut self) -> Result<Score> {
        if self.mode != Mode::Take {
            return Err(Error::WrongMode {
                mode: self.mode.name(),
                operation: "submit",
            });
        }
        if !self.is_complete() {
            return Err(Error::IncompleteQuiz {
                answered: self.answered_count(),
                total: self.quiz.question_count(),
            });
        }
        self.submitted = true;
        Ok(self.score())
    }

    /// Count the questions whose selected answer matches the correct one.
    #[must_use]
    pub fn score(&self) -> Score {
        let correct = self
            .quiz
            .quiz
            .iter()
            .enumerate()
            .filter(|(i, q)| self.selected(*i).is_some_and(|a| q.is_correct(a)))
            .count();
        Score {
            correct,
            total: self.quiz.question_count(),
        }
    }

    /// Whether correct answers and explanations are shown.
    #[must_use]
    pub fn reveals_answers(&self) -> bool {
        self.mode == Mode::View || self.submitted
    }

    /// How option `option` of question `question` should be decorated.
    #[must_use]
    pub fn option_mark(&self, question: usize, option: usize) -> OptionMark {
        let Some(q) = self.quiz.quiz.get(question) else {
            return OptionMark::Plain;
        };
        let Some(text) = q.options.get(option) else {
            return OptionMark::Plain;
        };
        let is_correct = q.is_correct(text);
        let is_selected = self.selected(question) == Some(text.as_str());

        match (self.mode, self.submitted) {
            (Mode::View, _) if is_correct => OptionMark::Correct,
            (Mode::View, _) => OptionMark::Plain,
            (Mode::Take, false) if is_selected => OptionMark::Selected,
            (Mode::Take, false) => OptionMark::Plain,
            (Mode::Take, true) if is_correct => OptionMark::Correct,
            (Mode::Take, true) if is_selected => OptionMark::Incorrect,
            (Mode::Take, true) => OptionMark::Plain,
        }
    }

    /// Label for the submit action.
    #[must_use]
    pub fn submit_label(&self) -> String {
        if self.is_complete() {
            "✅ Submit Quiz".to_string()
        } else {
            format!(
                "Answer all questions ({}/{})",
                self.answered_count(),
                self.quiz.question_count()
            )
        }
    }
}
