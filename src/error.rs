//! Error types for the Tally command line

use thiserror::Error;

/// Errors in the command line arguments
#[derive(Error, Debug, PartialEq)]
pub enum UsageError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("Invalid value for {option}: {value}")]
    InvalidValue { option: String, value: String },

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("--command, --sample and FILE are mutually exclusive")]
    ConflictingInputs,
}
