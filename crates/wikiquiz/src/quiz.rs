//! Quiz data types exchanged with the backend.
//!
//! These mirror the JSON the backend produces for generated quizzes and
//! history rows.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Base URL used to link related topics.
pub const WIKIPEDIA_ARTICLE_BASE: &str = "https://en.wikipedia.org/wiki/";

/// How hard the backend rated a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Easy question.
    Easy,
    /// Medium question.
    Medium,
    /// Hard question.
    Hard,
    /// Any rating the client doesn't recognise.
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    pub question: String,
    /// Answer options, in display order.
    pub options: Vec<String>,
    /// Text of the correct option.
    pub answer: String,
    /// Difficulty rating.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Why the answer is correct.
    #[serde(default, deserialize_with = "null_as_default")]
    pub explanation: String,
}

impl Question {
    /// Check whether `option` is the correct answer.
    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.answer == option
    }
}

/// People, organizations and locations mentioned in the article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyEntities {
    /// People mentioned in the article.
    pub people: Vec<String>,
    /// Organizations mentioned in the article.
    pub organizations: Vec<String>,
    /// Locations mentioned in the article.
    pub locations: Vec<String>,
}

impl KeyEntities {
    /// Check whether no entities were extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.organizations.is_empty() && self.locations.is_empty()
    }
}

/// A generated quiz with its article metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Backend identifier.
    pub id: i64,
    /// Source article URL.
    pub url: String,
    /// Article title.
    pub title: String,
    /// Short summary of the article.
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    /// Extracted key entities.
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_entities: KeyEntities,
    /// Article section headings.
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: Vec<String>,
    /// The questions.
    #[serde(default, deserialize_with = "null_as_default")]
    pub quiz: Vec<Question>,
    /// Suggested topics for further reading.
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_topics: Vec<String>,
    /// When the quiz was generated.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    /// Number of questions.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.quiz.len()
    }
}

/// A row in the quiz history listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    /// Backend identifier.
    pub id: i64,
    /// Source article URL.
    pub url: String,
    /// Article title.
    pub title: String,
    /// When the quiz was generated.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Number of questions in the quiz.
    #[serde(default)]
    pub quiz_count: usize,
}

/// Link to the Wikipedia article for a related topic.
#[must_use]
pub fn related_topic_url(topic: &str) -> String {
    format!("{WIKIPEDIA_ARTICLE_BASE}{}", topic.replace(' ', "_"))
}

/// Letter shown before an option: `A`, `B`, `C`, ...
#[must_use]
pub fn option_label(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .map_or('?', char::from)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Backend timestamps: RFC 3339, or naive ISO-8601 taken as UTC.
mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

/// Parse a backend timestamp.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}
