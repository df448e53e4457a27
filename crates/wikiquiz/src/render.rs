//! Plain-text rendering for the terminal.
//!
//! Each view is a small `Display` wrapper so it can be written straight to
//! stdout or collected into a `String` for tests.

use std::fmt::{self, Display, Formatter};

use crate::history::format_date;
use crate::quiz::{option_label, related_topic_url, QuizSummary};
use crate::session::{Mode, OptionMark, QuizSession, Score};

const TITLE_WIDTH: usize = 40;

/// A quiz, laid out according to the session's mode and progress.
#[derive(Debug, Clone, Copy)]
pub struct QuizView<'a>(pub &'a QuizSession);

/// A single question with its options.
#[derive(Debug, Clone, Copy)]
pub struct QuestionView<'a> {
    session: &'a QuizSession,
    index: usize,
}

/// The history table, or the empty-state hint.
#[derive(Debug, Clone, Copy)]
pub struct HistoryView<'a>(pub &'a [QuizSummary]);

impl<'a> QuestionView<'a> {
    /// View question `index` of the session's quiz.
    #[must_use]
    pub fn new(session: &'a QuizSession, index: usize) -> Self {
        Self { session, index }
    }
}

/// Render a whole quiz.
#[must_use]
pub fn render_quiz(session: &QuizSession) -> String {
    QuizView(session).to_string()
}

/// Render the history listing.
#[must_use]
pub fn render_history(rows: &[QuizSummary]) -> String {
    HistoryView(rows).to_string()
}

/// Render the score line followed by the verdict message.
#[must_use]
pub fn render_score(score: Score) -> String {
    format!("Score: {score}\n{}\n", score.verdict().message())
}

fn mark_symbol(mark: OptionMark) -> char {
    match mark {
        OptionMark::Plain => ' ',
        OptionMark::Selected => '>',
        OptionMark::Correct => '+',
        OptionMark::Incorrect => 'x',
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

impl Display for QuestionView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Some(question) = self.session.quiz().quiz.get(self.index) else {
            return Ok(());
        };
        let reveal = self.session.reveals_answers();

        writeln!(
            f,
            "Q{}. {}  [{}]",
            self.index + 1,
            question.question,
            question.difficulty
        )?;
        for (i, option) in question.options.iter().enumerate() {
            let mark = self.session.option_mark(self.index, i);
            let check = if reveal && question.is_correct(option) {
                " ✓"
            } else {
                ""
            };
            writeln!(
                f,
                "  {} {}. {option}{check}",
                mark_symbol(mark),
                option_label(i)
            )?;
        }
        if reveal && !question.explanation.is_empty() {
            writeln!(f, "  💡 Explanation: {}", question.explanation)?;
        }
        Ok(())
    }
}

impl Display for QuizView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let session = self.0;
        let quiz = session.quiz();

        writeln!(f, "{}", quiz.title)?;
        writeln!(f, "{}", quiz.url)?;
        if !quiz.summary.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", quiz.summary)?;
        }

        let entities = &quiz.key_entities;
        if !entities.is_empty() {
            writeln!(f)?;
            for (heading, names) in [
                ("👤 People", &entities.people),
                ("🏢 Organizations", &entities.organizations),
                ("📍 Locations", &entities.locations),
            ] {
                if !names.is_empty() {
                    writeln!(f, "{heading}: {}", names.join(", "))?;
                }
            }
        }

        if session.mode() == Mode::Take && session.is_submitted() {
            writeln!(f)?;
            f.write_str(&render_score(session.score()))?;
        }

        writeln!(f)?;
        match session.mode() {
            Mode::View => writeln!(f, "📝 Quiz Questions & Answers")?,
            Mode::Take => writeln!(f, "✍️ Answer the Questions")?,
        }
        for index in 0..quiz.question_count() {
            writeln!(f)?;
            write!(f, "{}", QuestionView::new(session, index))?;
        }

        if session.mode() == Mode::Take && !session.is_submitted() {
            writeln!(f)?;
            writeln!(f, "{}", session.submit_label())?;
        }

        if !quiz.related_topics.is_empty() {
            writeln!(f)?;
            writeln!(f, "🔗 Related Topics for Further Reading")?;
            for topic in &quiz.related_topics {
                writeln!(f, "  - {topic}  {}", related_topic_url(topic))?;
            }
        }

        if !quiz.sections.is_empty() {
            writeln!(f)?;
            writeln!(f, "📑 Article Sections")?;
            writeln!(f, "  {}", quiz.sections.join(" · "))?;
        }
        Ok(())
    }
}

impl Display for HistoryView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rows = self.0;
        if rows.is_empty() {
            writeln!(f, "No Quizzes Yet")?;
            writeln!(f, "Generate your first quiz with `wikiquiz generate <URL>`")?;
            return Ok(());
        }

        let titles: Vec<String> = rows.iter().map(|r| truncate(&r.title, TITLE_WIDTH)).collect();
        let title_width = titles
            .iter()
            .map(|t| t.chars().count())
            .max()
            .unwrap_or(0)
            .max("Title".len());
        let id_width = rows
            .iter()
            .map(|r| r.id.to_string().len())
            .max()
            .unwrap_or(0)
            .max("ID".len());

        writeln!(f, "📖 Past Quizzes")?;
        writeln!(f)?;
        writeln!(
            f,
            "{:>id_width$}  {:<title_width$}  {:>9}  {:<21}  URL",
            "ID", "Title", "Questions", "Created"
        )?;
        for (row, title) in rows.iter().zip(&titles) {
            writeln!(
                f,
                "{:>id_width$}  {:<title_width$}  {:>9}  {:<21}  {}",
                row.id,
                title,
                row.quiz_count,
                format_date(&row.created_at),
                row.url
            )?;
        }
        Ok(())
    }
}
