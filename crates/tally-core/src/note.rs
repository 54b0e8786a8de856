//! A single note: title, free text with inline calculations, and tags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_engine::engine::{CalculationResult, Calculator, Evaluator};

pub type NoteId = u64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(id: NoteId, title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Note {
            id,
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the content and bump `updated_at`.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.touch();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Case-insensitive match against title and content.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.content.to_lowercase().contains(&term)
    }

    pub fn evaluate<E: Evaluator>(&self, calculator: &Calculator<E>) -> Vec<CalculationResult> {
        calculator.evaluate(&self.content)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Number of lines that produced a numeric result.
pub fn calculation_count(results: &[CalculationResult]) -> usize {
    results.iter().filter(|r| r.number().is_some()).count()
}
