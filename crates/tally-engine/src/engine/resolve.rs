//! Reference resolution.
//!
//! Turns a tokenized expression into literal arithmetic in three passes:
//!
//! 1. **Aggregates**: `sum(@1:@3, @5, 2 * x)` → one number. Runs first so
//!    ranges reach the aggregate intact.
//! 2. **Line references**: `@N` → the value recorded for line N.
//! 3. **Variables**: identifiers naming an assigned variable → its value.
//!
//! References only point backwards: `@N` on line L requires `N < L`.

use tracing::trace;

use super::eval::{Evaluator, MAX_EXPR_DEPTH};
use super::format::render_tokens;
use super::state::EvaluationState;
use super::token::{Token, matching_paren};
use crate::builtins::Aggregate;
use crate::error::{CalcError, Result};

#[derive(Clone, Copy)]
pub(crate) struct Resolver<'a> {
    state: &'a EvaluationState,
    evaluator: &'a dyn Evaluator,
    line: usize,
    /// Aggregate nesting level of the expression being resolved.
    depth: usize,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(
        state: &'a EvaluationState,
        evaluator: &'a dyn Evaluator,
        line: usize,
    ) -> Self {
        Resolver {
            state,
            evaluator,
            line,
            depth: 0,
        }
    }

    /// Resolve every reference, variable and aggregate call in `tokens`.
    pub(crate) fn resolve(&self, tokens: &[Token]) -> Result<Vec<Token>> {
        let tokens = self.expand_aggregates(tokens)?;
        let tokens = self.substitute_line_refs(tokens)?;
        Ok(self.substitute_variables(tokens))
    }

    fn expand_aggregates(&self, tokens: &[Token]) -> Result<Vec<Token>> {
        let mut out = Vec::with_capacity(tokens.len());
        let mut i = 0;

        while i < tokens.len() {
            let aggregate = match (&tokens[i], tokens.get(i + 1)) {
                (Token::Ident(name), Some(Token::LParen)) => Aggregate::from_name(name),
                _ => None,
            };
            let Some(aggregate) = aggregate else {
                out.push(tokens[i].clone());
                i += 1;
                continue;
            };

            let open = i + 1;
            let close = matching_paren(tokens, open).ok_or_else(|| {
                CalcError::evaluation(format!("Unmatched parenthesis in {}()", aggregate.name()))
            })?;
            let values = self.aggregate_arguments(aggregate, &tokens[open + 1..close])?;
            let value = aggregate.apply(&values)?;
            trace!(line = self.line, function = aggregate.name(), value, "expanded aggregate");
            out.push(Token::Number(value));
            i = close + 1;
        }

        Ok(out)
    }

    fn aggregate_arguments(&self, aggregate: Aggregate, inner: &[Token]) -> Result<Vec<f64>> {
        if inner.is_empty() {
            return Err(CalcError::evaluation(format!(
                "{}() requires at least one argument",
                aggregate.name()
            )));
        }

        let mut values = Vec::new();
        for arg in split_arguments(inner) {
            match arg {
                [] => {
                    return Err(CalcError::evaluation(format!(
                        "Empty argument in {}()",
                        aggregate.name()
                    )));
                }
                [Token::Range(start, end)] => values.extend(self.range_values(*start, *end)?),
                [Token::LineRef(line)] => values.push(self.line_value(*line)?),
                expression => values.push(self.evaluate_argument(expression)?),
            }
        }
        Ok(values)
    }

    fn evaluate_argument(&self, tokens: &[Token]) -> Result<f64> {
        let nested = Resolver {
            depth: self.depth + 1,
            ..*self
        };
        if nested.depth > MAX_EXPR_DEPTH {
            return Err(CalcError::evaluation("Expression nested too deeply"));
        }
        let resolved = nested.resolve(tokens)?;
        self.evaluator.evaluate(&render_tokens(&resolved))
    }

    fn substitute_line_refs(&self, tokens: Vec<Token>) -> Result<Vec<Token>> {
        tokens
            .into_iter()
            .map(|token| match token {
                Token::LineRef(line) => self.line_value(line).map(Token::Number),
                Token::Range(start, end) => Err(CalcError::MalformedRange(format!(
                    "@{}:@{} can only be used inside sum, avg, min or max",
                    start, end
                ))),
                other => Ok(other),
            })
            .collect()
    }

    fn substitute_variables(&self, tokens: Vec<Token>) -> Vec<Token> {
        let mut out = Vec::with_capacity(tokens.len());
        let mut iter = tokens.into_iter().peekable();

        while let Some(token) = iter.next() {
            let is_call = matches!(iter.peek(), Some(Token::LParen));
            match token {
                Token::Ident(name) if !is_call => match self.state.variable(&name) {
                    Some(value) => out.push(Token::Number(value)),
                    None => out.push(Token::Ident(name)),
                },
                other => out.push(other),
            }
        }

        out
    }

    fn line_value(&self, line: usize) -> Result<f64> {
        if line >= self.line {
            return Err(CalcError::ForwardReference {
                line,
                from: self.line,
            });
        }
        self.state
            .line_value(line)
            .ok_or(CalcError::MissingReference { line })
    }

    fn range_values(&self, start: usize, end: usize) -> Result<Vec<f64>> {
        if start > end {
            return Err(CalcError::InvalidRange { start, end });
        }
        if end >= self.line {
            return Err(CalcError::ForwardReference {
                line: end,
                from: self.line,
            });
        }
        (start..=end).map(|line| self.line_value(line)).collect()
    }
}

/// Split call arguments at top-level commas.
fn split_arguments(tokens: &[Token]) -> Vec<&[Token]> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            Token::Comma if depth == 0 => {
                args.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    args.push(&tokens[start..]);
    args
}
