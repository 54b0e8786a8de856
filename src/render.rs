//! Terminal rendering of evaluated notes.

use tally_core::format::{display_number, display_result};
use tally_core::{CalculationResult, Settings};
use tally_engine::engine::EvaluationState;

/// Every line of `content`, with results appended:
/// ` → value` for numbers, ` ✗ message` for errors.
pub(crate) fn annotate(
    content: &str,
    results: &[CalculationResult],
    settings: &Settings,
) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let width = lines.len().to_string().len();
    let mut out = String::new();

    for (index, line) in lines.iter().enumerate() {
        let line_number = index + 1;
        let line = line.trim_end_matches('\r');
        if settings.show_line_numbers {
            out.push_str(&format!("{:>width$} │ ", line_number, width = width));
        }
        out.push_str(line);

        if let Some(result) = results.iter().find(|r| r.line_number == line_number) {
            let marker = if result.is_error() { "✗" } else { "→" };
            out.push_str(&format!(" {} {}", marker, display_result(result, settings)));
        }
        out.push('\n');
    }

    out
}

/// `name = value` lines for every assigned variable.
pub(crate) fn variables(state: &EvaluationState, settings: &Settings) -> String {
    state
        .variables()
        .map(|(name, value)| format!("{} = {}\n", name, display_number(value, settings)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_engine::engine::Calculator;

    #[test]
    fn test_annotate() {
        let content = "Coffee: 3.50\ntax = 0.10\n= @1";
        let results = Calculator::new().evaluate(content);
        let settings = Settings {
            show_line_numbers: false,
            ..Settings::default()
        };
        assert_eq!(
            annotate(content, &results, &settings),
            "Coffee: 3.50\ntax = 0.10 → 0.10\n= @1 ✗ No result found for line 1\n"
        );
    }

    #[test]
    fn test_annotate_with_line_numbers() {
        let content: String = (1..=10).map(|n| format!("= {}\n", n)).collect();
        let results = Calculator::new().evaluate(&content);
        let out = annotate(&content, &results, &Settings::default());
        assert!(out.starts_with(" 1 │ = 1 → 1.00\n"));
        assert!(out.contains("10 │ = 10 → 10.00\n"));
    }

    #[test]
    fn test_variables() {
        let (_, state) = Calculator::new().evaluate_with_state("rate = 45\nhours = 36");
        assert_eq!(
            variables(&state, &Settings::default()),
            "rate = 45.00\nhours = 36.00\n"
        );
    }
}
