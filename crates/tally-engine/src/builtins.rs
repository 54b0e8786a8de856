//! Built-in aggregate functions and their metadata.
//!
//! Conventions:
//! - Aggregate names are lowercase and case-sensitive (`sum`, not `SUM`).
//! - Aggregates are expanded by the resolver before the expression reaches
//!   the evaluator, so they never exist as Rhai functions.
//! - If you add a new aggregate, add it to `AGGREGATE_BUILTINS` and to
//!   `Aggregate::apply`.

use crate::error::{CalcError, Result};

/// An aggregate function over a list of numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aggregate {
    Sum,
    Avg,
    Min,
    Max,
}

pub struct AggregateBuiltin {
    pub name: &'static str,
    pub aggregate: Aggregate,
    pub description: &'static str,
}

pub const AGGREGATE_BUILTINS: &[AggregateBuiltin] = &[
    AggregateBuiltin {
        name: "sum",
        aggregate: Aggregate::Sum,
        description: "Total of the arguments",
    },
    AggregateBuiltin {
        name: "avg",
        aggregate: Aggregate::Avg,
        description: "Arithmetic mean of the arguments",
    },
    AggregateBuiltin {
        name: "min",
        aggregate: Aggregate::Min,
        description: "Smallest argument",
    },
    AggregateBuiltin {
        name: "max",
        aggregate: Aggregate::Max,
        description: "Largest argument",
    },
];

impl Aggregate {
    /// Look up an aggregate by its exact (case-sensitive) name.
    pub fn from_name(name: &str) -> Option<Aggregate> {
        AGGREGATE_BUILTINS
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.aggregate)
    }

    pub fn name(self) -> &'static str {
        AGGREGATE_BUILTINS
            .iter()
            .find(|b| b.aggregate == self)
            .map(|b| b.name)
            .unwrap_or("?")
    }

    /// Apply the aggregate. An empty list is an error for every aggregate.
    pub fn apply(self, values: &[f64]) -> Result<f64> {
        if values.is_empty() {
            return Err(CalcError::evaluation(format!(
                "{}() requires at least one value",
                self.name()
            )));
        }
        let value = match self {
            Aggregate::Sum => values.iter().sum(),
            Aggregate::Avg => values.iter().sum::<f64>() / values.len() as f64,
            Aggregate::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Aggregate::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        };
        Ok(value)
    }
}
