//! Per-call evaluation state and the results it produces.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::CalcError;

/// Running tally threaded through one evaluation pass.
///
/// Both maps only grow, in line order. A fresh state is created for every
/// document evaluation.
#[derive(Clone, Debug, Default)]
pub struct EvaluationState {
    variables: HashMap<String, f64>,
    /// Variable names in first-assignment order.
    variable_order: Vec<String>,
    line_values: BTreeMap<usize, f64>,
}

impl EvaluationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variable(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    /// Variables with their latest values, in first-assignment order.
    pub fn variables(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.variable_order
            .iter()
            .filter_map(|name| self.variables.get(name).map(|v| (name.as_str(), *v)))
    }

    pub fn line_value(&self, line: usize) -> Option<f64> {
        self.line_values.get(&line).copied()
    }

    /// Addressable lines and their values, in line order.
    pub fn line_values(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.line_values.iter().map(|(line, value)| (*line, *value))
    }

    pub(crate) fn assign(&mut self, name: &str, value: f64) {
        if self.variables.insert(name.to_string(), value).is_none() {
            self.variable_order.push(name.to_string());
        }
    }

    pub(crate) fn record_line(&mut self, line: usize, value: f64) {
        self.line_values.insert(line, value);
    }
}

/// Outcome of one line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineValue {
    Number(f64),
    Error(CalcError),
}

/// Result record for an assignment or formula line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// 1-based line number.
    pub line_number: usize,
    /// The trimmed source line, label included.
    pub expression: String,
    pub value: LineValue,
    /// Line numbers written in the expression, in source order.
    pub dependencies: Vec<usize>,
}

impl CalculationResult {
    pub fn number(&self) -> Option<f64> {
        match self.value {
            LineValue::Number(n) => Some(n),
            LineValue::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&CalcError> {
        match &self.value {
            LineValue::Number(_) => None,
            LineValue::Error(e) => Some(e),
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error().map(|e| e.to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(self.value, LineValue::Error(_))
    }
}
