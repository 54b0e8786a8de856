//! Calculation engine API.
//!
//! This module turns note text into per-line results:
//!
//! - [`classify_line`], [`LineKind`] - Line shapes (assignment, formula, inert)
//! - [`tokenize`], [`Token`] - Expression tokens, including `@N` and `@N:@M`
//! - [`extract_dependencies`] - Line numbers an expression refers to
//! - [`Evaluator`], [`RhaiEvaluator`], [`create_engine`] - Literal arithmetic
//! - [`Calculator`], [`evaluate`] - The document fold
//! - [`format_number`] - Format values for display

mod calc;
mod deps;
mod eval;
mod format;
mod line;
mod resolve;
mod state;
mod token;

pub use calc::{Calculator, evaluate};
pub use deps::extract_dependencies;
pub use eval::{Evaluator, RhaiEvaluator, create_engine};
pub use format::format_number;
pub use line::{LineKind, classify_line};
pub use state::{CalculationResult, EvaluationState, LineValue};
pub use token::{Token, tokenize};

pub use crate::builtins::{AGGREGATE_BUILTINS, Aggregate, AggregateBuiltin};
pub use crate::error::{CalcError, Result};
