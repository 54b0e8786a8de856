//! Arithmetic evaluation of fully resolved expressions.
//!
//! The resolver hands over text containing only float literals, operators,
//! parentheses and function calls. [`RhaiEvaluator`] runs it through a Rhai
//! engine in expression-only mode, so statements, assignments and blocks are
//! rejected at parse time.

use rhai::{Dynamic, Engine};

use crate::error::{CalcError, Result};

const MAX_OPERATIONS: u64 = 100_000;
pub(crate) const MAX_EXPR_DEPTH: usize = 64;
const MAX_FUNCTION_EXPR_DEPTH: usize = 32;

/// Evaluates a literal arithmetic expression to a finite number.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, expression: &str) -> Result<f64>;
}

/// Create a Rhai engine configured for note arithmetic.
pub fn create_engine() -> Engine {
    let mut engine = Engine::new();
    engine.set_max_operations(MAX_OPERATIONS);
    engine.set_max_expr_depths(MAX_EXPR_DEPTH, MAX_FUNCTION_EXPR_DEPTH);
    // Notes are evaluated on every keystroke; nothing may write to stdout.
    engine.on_print(|_| {});
    engine.on_debug(|_, _, _| {});
    engine
}

/// The default evaluator, backed by Rhai.
pub struct RhaiEvaluator {
    engine: Engine,
}

impl RhaiEvaluator {
    pub fn new() -> Self {
        RhaiEvaluator {
            engine: create_engine(),
        }
    }

    pub fn with_engine(engine: Engine) -> Self {
        RhaiEvaluator { engine }
    }
}

impl Default for RhaiEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for RhaiEvaluator {
    fn evaluate(&self, expression: &str) -> Result<f64> {
        let value = self
            .engine
            .eval_expression::<Dynamic>(expression)
            .map_err(|e| CalcError::evaluation(e.to_string()))?;
        dynamic_to_number(&value).and_then(finite)
    }
}

fn dynamic_to_number(value: &Dynamic) -> Result<f64> {
    if let Ok(n) = value.as_float() {
        return Ok(n);
    }
    if let Ok(n) = value.as_int() {
        return Ok(n as f64);
    }
    Err(CalcError::evaluation(format!(
        "Expected a number, got {}",
        value.type_name()
    )))
}

/// Reject NaN and infinities.
pub(crate) fn finite(n: f64) -> Result<f64> {
    if n.is_nan() {
        Err(CalcError::evaluation("Result is not a number"))
    } else if n.is_infinite() {
        Err(CalcError::evaluation("Result is infinite"))
    } else {
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expression: &str) -> Result<f64> {
        RhaiEvaluator::new().evaluate(expression)
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2.0 + 3.0 * 4.0").unwrap(), 14.0);
        assert_eq!(eval("( 2.0 + 3.0 ) * 4.0").unwrap(), 20.0);
        assert_eq!(eval("2.0 ** 3.0").unwrap(), 8.0);
        assert_eq!(eval("7.0 % 4.0").unwrap(), 3.0);
        assert_eq!(eval("- 3.0 + 1.0").unwrap(), -2.0);
    }

    #[test]
    fn test_division_by_zero_fails() {
        assert!(matches!(eval("1.0 / 0.0"), Err(CalcError::Evaluation(_))));
        assert!(matches!(eval("0.0 / 0.0"), Err(CalcError::Evaluation(_))));
    }

    #[test]
    fn test_malformed_fails() {
        assert!(eval("( 1.0 + 2.0").is_err());
        assert!(eval("1.0 +").is_err());
        assert!(eval("").is_err());
    }

    #[test]
    fn test_unknown_names_fail() {
        assert!(eval("Total * 0.15").is_err());
        assert!(eval("nope( 1.0 )").is_err());
    }

    #[test]
    fn test_statements_are_rejected() {
        assert!(eval("let x = 1; x").is_err());
    }

    #[test]
    fn test_custom_engine_functions() {
        let mut engine = create_engine();
        engine.register_fn("double", |x: f64| x * 2.0);
        let evaluator = RhaiEvaluator::with_engine(engine);
        assert_eq!(evaluator.evaluate("double( 1.5 ) + 1.0").unwrap(), 4.0);
        assert!(eval("double( 1.5 )").is_err());
    }

    #[test]
    fn test_non_numeric_result_fails() {
        let err = eval("1.0 < 2.0").unwrap_err();
        assert!(err.to_string().starts_with("Expected a number"));
    }
}
