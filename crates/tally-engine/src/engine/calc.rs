//! Document evaluation: the line-by-line fold.
//!
//! For each line in order: classify it, resolve its references against the
//! running [`EvaluationState`], evaluate the literal expression, and record
//! the result. A failing line gets an error record and never touches the
//! state, so later lines referencing it fail with a missing reference.

use tracing::{debug, trace};

use super::deps::extract_dependencies;
use super::eval::{Evaluator, RhaiEvaluator};
use super::format::render_tokens;
use super::line::{LineKind, classify_line};
use super::resolve::Resolver;
use super::state::{CalculationResult, EvaluationState, LineValue};
use super::token::tokenize;
use crate::error::Result;

/// Evaluates note text. Holds no per-document state, so one calculator can
/// serve any number of documents, including from several threads.
pub struct Calculator<E: Evaluator = RhaiEvaluator> {
    evaluator: E,
}

impl Calculator {
    pub fn new() -> Self {
        Calculator {
            evaluator: RhaiEvaluator::new(),
        }
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Evaluator> Calculator<E> {
    pub fn with_evaluator(evaluator: E) -> Self {
        Calculator { evaluator }
    }

    /// Evaluate a whole document, returning one result per assignment or
    /// formula line.
    pub fn evaluate(&self, document: &str) -> Vec<CalculationResult> {
        self.evaluate_with_state(document).0
    }

    /// Like [`Calculator::evaluate`], also returning the final state.
    pub fn evaluate_with_state(
        &self,
        document: &str,
    ) -> (Vec<CalculationResult>, EvaluationState) {
        let mut state = EvaluationState::new();
        let results = document
            .split('\n')
            .enumerate()
            .filter_map(|(index, line)| self.evaluate_line(&mut state, index + 1, line))
            .collect();
        (results, state)
    }

    /// Evaluate a single line against `state`, updating it on success.
    /// Returns `None` for inert lines.
    pub fn evaluate_line(
        &self,
        state: &mut EvaluationState,
        line_number: usize,
        line: &str,
    ) -> Option<CalculationResult> {
        let kind = classify_line(line);
        let expression = match kind {
            LineKind::Inert => return None,
            LineKind::Assignment { expression, .. }
            | LineKind::Formula { expression }
            | LineKind::LabeledFormula { expression, .. } => expression,
        };

        let value = match self.compute(state, line_number, expression) {
            Ok(value) => {
                if let LineKind::Assignment { name, .. } = kind {
                    state.assign(name, value);
                }
                state.record_line(line_number, value);
                debug!(line = line_number, value, "evaluated line");
                LineValue::Number(value)
            }
            Err(error) => {
                debug!(line = line_number, %error, "line failed");
                LineValue::Error(error)
            }
        };

        Some(CalculationResult {
            line_number,
            expression: line.trim().to_string(),
            value,
            dependencies: extract_dependencies(expression),
        })
    }

    fn compute(
        &self,
        state: &EvaluationState,
        line_number: usize,
        expression: &str,
    ) -> Result<f64> {
        let tokens = tokenize(expression)?;
        let resolved = Resolver::new(state, &self.evaluator, line_number).resolve(&tokens)?;
        let literal = render_tokens(&resolved);
        trace!(line = line_number, %literal, "resolved expression");
        self.evaluator.evaluate(&literal)
    }
}

/// Evaluate a document with the default evaluator.
pub fn evaluate(document: &str) -> Vec<CalculationResult> {
    Calculator::new().evaluate(document)
}
