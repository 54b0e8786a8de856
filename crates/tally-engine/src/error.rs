//! Error types for line evaluation.
//!
//! Every variant is scoped to a single line: the calculator turns them into
//! error-marked results and carries on with the next line.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while resolving or evaluating one line.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail")]
pub enum CalcError {
    #[error("Cannot reference line {line} from line {from}")]
    ForwardReference { line: usize, from: usize },

    #[error("No result found for line {line}")]
    MissingReference { line: usize },

    #[error("Invalid range @{start}:@{end}")]
    InvalidRange { start: usize, end: usize },

    #[error("Invalid range: {0}")]
    MalformedRange(String),

    #[error("{0}")]
    Evaluation(String),
}

impl CalcError {
    pub(crate) fn evaluation(message: impl Into<String>) -> Self {
        CalcError::Evaluation(message.into())
    }

    /// True for both range failure shapes (reversed bounds, malformed syntax).
    pub fn is_invalid_range(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidRange { .. } | CalcError::MalformedRange(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
