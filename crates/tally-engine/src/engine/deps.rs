//! Dependency extraction from expression text.
//!
//! Dependencies are the line numbers written literally in an expression, in
//! source order with duplicates kept. A range contributes its two endpoints,
//! not the lines between them.

use regex::Regex;
use std::sync::OnceLock;

fn line_ref_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@(\d+)").expect("line reference regex must compile"))
}

/// Extract all `@N` line numbers from an expression.
pub fn extract_dependencies(expression: &str) -> Vec<usize> {
    line_ref_re()
        .captures_iter(expression)
        .map(|caps| caps[1].parse::<usize>().unwrap_or(usize::MAX))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_order_with_duplicates() {
        assert_eq!(extract_dependencies("@3 + @1 * @3"), vec![3, 1, 3]);
    }

    #[test]
    fn test_range_endpoints_count_twice() {
        assert_eq!(extract_dependencies("sum(@1:@5) + @2"), vec![1, 5, 2]);
    }

    #[test]
    fn test_no_references() {
        assert!(extract_dependencies("rate * hours").is_empty());
    }
}
