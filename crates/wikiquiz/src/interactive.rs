//! Line-based prompts for taking a quiz in the terminal.
//!
//! Everything is generic over `BufRead`/`Write` so the flows can be driven
//! from tests with in-memory buffers.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{Error, Result};
use crate::quiz::option_label;
use crate::render::{QuestionView, QuizView};
use crate::session::{Mode, QuizSession, Score};

/// Interpret an answer typed by the user.
///
/// Accepts an option letter (either case) or a 1-based option number.
#[must_use]
pub fn parse_choice(input: &str, option_count: usize) -> Option<usize> {
    let input = input.trim();
    let mut chars = input.chars();
    let index = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            usize::from(u8::try_from(c.to_ascii_uppercase()).ok()? - b'A')
        }
        _ => input.parse::<usize>().ok()?.checked_sub(1)?,
    };
    (index < option_count).then_some(index)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn prompt_option<R: BufRead, W: Write>(
    option_count: usize,
    input: &mut R,
    output: &mut W,
) -> Result<usize> {
    if option_count == 0 {
        return Err(Error::OutOfRange {
            what: "option",
            index: 0,
        });
    }
    let range = format!("{}-{}", option_label(0), option_label(option_count - 1));
    loop {
        write!(output, "Your answer [{range}]: ")?;
        output.flush()?;
        let line = read_line(input)?.ok_or(Error::InputClosed)?;
        if let Some(index) = parse_choice(&line, option_count) {
            return Ok(index);
        }
        writeln!(output, "Please choose one of {range}.")?;
    }
}

/// Ask a yes/no question. Anything but `y`/`yes`, including end of input,
/// counts as no.
///
/// # Errors
///
/// Returns an error if reading or writing the terminal fails.
pub fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;
    let answer = read_line(input)?.unwrap_or_default();
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Walk the user through every question, grade the quiz and show the
/// results, offering a retake until declined.
///
/// # Errors
///
/// Returns [`Error::InputClosed`] if input ends mid-quiz, or an I/O error.
pub fn take_quiz<R: BufRead, W: Write>(
    session: &mut QuizSession,
    input: &mut R,
    output: &mut W,
) -> Result<Score> {
    session.set_mode(Mode::Take);
    loop {
        let total = session.quiz().question_count();
        for index in 0..total {
            writeln!(output)?;
            write!(output, "{}", QuestionView::new(session, index))?;
            let option_count = session.quiz().quiz[index].options.len();
            let choice = prompt_option(option_count, input, output)?;
            session.select_answer(index, choice)?;
            debug!(question = index, choice, "answer selected");
        }

        let score = session.submit()?;
        writeln!(output)?;
        write!(output, "{}", QuizView(session))?;
        writeln!(output)?;

        if !confirm("🔄 Retake quiz?", input, output)? {
            return Ok(score);
        }
        session.reset();
    }
}
