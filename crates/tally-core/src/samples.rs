//! Built-in sample notes.

use chrono::{DateTime, NaiveDate, Utc};

use crate::note::Note;

const DAILY_EXPENSES: &str = "Coffee: 3.50
Lunch: 8.20
Snacks: 2.30
Total: =3.50 + 8.20 + 2.30

Tip (15%): =@4 * 0.15
Grand Total: =@4 + @6";

const PROJECT_ESTIMATE: &str = "Design: 20 hours x $30 = 600
Dev: 50 hours x $40 = 2000
QA: 15 hours x $25 = 375
Total: =600 + 2000 + 375

budget = 4000
Remaining: =budget - @4";

const BUDGET_PLANNING: &str = "Monthly Income
Salary: 5000
Freelance: 1200
Total Income: =5000 + 1200

Monthly Expenses
Rent: 1500
Groceries: 600
Utilities: 200
Transport: 300
Entertainment: 400
Total Expenses: =1500 + 600 + 200 + 300 + 400

Savings: =@4 - @12
Savings Rate: =@14 / @4 * 100";

const SHOPPING_WITH_TAX: &str = "rate = 45
hours = 36
tax = 0.10

Base Cost: =rate * hours
Tax Amount: =@5 * tax
Total Cost: =@5 + @6

Items:
- Laptop: 1200
- Mouse: 50
- Keyboard: 80
Subtotal: =1200 + 50 + 80
Tax: =@13 * 0.08
Final Total: =sum(@13:@14)";

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

fn sample(id: u64, title: &str, content: &str, day: u32, tags: [&str; 2]) -> Note {
    let mut note = Note::new(id, title, content).with_tags(tags);
    note.created_at = date(2024, 1, day);
    note.updated_at = note.created_at;
    note
}

/// The sample notes, numbered 1 to 4.
pub fn samples() -> Vec<Note> {
    vec![
        sample(1, "Daily Expenses", DAILY_EXPENSES, 15, ["expenses", "daily"]),
        sample(2, "Project Estimate", PROJECT_ESTIMATE, 14, ["work", "estimate"]),
        sample(3, "Budget Planning", BUDGET_PLANNING, 13, ["budget", "planning"]),
        sample(4, "Shopping List with Tax", SHOPPING_WITH_TAX, 12, ["shopping", "tax"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_engine::engine::Calculator;

    fn values(note: &Note) -> Vec<(usize, Option<f64>)> {
        note.evaluate(&Calculator::new())
            .iter()
            .map(|r| (r.line_number, r.number().map(|n| (n * 100.0).round() / 100.0)))
            .collect()
    }

    #[test]
    fn test_samples_evaluate_without_errors() {
        for note in samples() {
            let results = note.evaluate(&Calculator::new());
            assert!(!results.is_empty(), "{} has no results", note.title);
            for result in &results {
                assert!(
                    !result.is_error(),
                    "{} line {}: {:?}",
                    note.title,
                    result.line_number,
                    result.error_message()
                );
            }
        }
    }

    #[test]
    fn test_daily_expenses_values() {
        let notes = samples();
        assert_eq!(
            values(&notes[0]),
            vec![(4, Some(14.0)), (6, Some(2.1)), (7, Some(16.1))]
        );
    }

    #[test]
    fn test_shopping_values() {
        let notes = samples();
        let values = values(&notes[3]);
        assert_eq!(values[3], (5, Some(1620.0)));
        assert_eq!(values[4], (6, Some(162.0)));
        assert_eq!(values[5], (7, Some(1782.0)));
        assert_eq!(values.last(), Some(&(15, Some(1436.4))));
    }
}
