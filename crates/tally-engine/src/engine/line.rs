//! Line classification.
//!
//! Every line of a note is exactly one of four shapes, decided purely from
//! its text:
//!
//! - `tax = 0.10` → [`LineKind::Assignment`]
//! - `= 3 + 4` → [`LineKind::Formula`]
//! - `Total: =@1 + @2` → [`LineKind::LabeledFormula`]
//! - anything else (including `Coffee: 3.50`) → [`LineKind::Inert`]
//!
//! Only the first three produce results and become addressable by `@N`.

use regex::Regex;
use std::sync::OnceLock;

/// The shape of one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Blank or display-only text.
    Inert,
    /// `<identifier> = <expression>`
    Assignment { name: &'a str, expression: &'a str },
    /// `=<expression>`
    Formula { expression: &'a str },
    /// `<label>: =<expression>`
    LabeledFormula { label: &'a str, expression: &'a str },
}

impl<'a> LineKind<'a> {
    /// The expression to evaluate, if the line has one.
    pub fn expression(&self) -> Option<&'a str> {
        match *self {
            LineKind::Inert => None,
            LineKind::Assignment { expression, .. }
            | LineKind::Formula { expression }
            | LineKind::LabeledFormula { expression, .. } => Some(expression),
        }
    }

    pub fn is_inert(&self) -> bool {
        matches!(self, LineKind::Inert)
    }
}

fn assignment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.+)$")
            .expect("assignment regex must compile")
    })
}

fn labeled_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(.+?):\s*=(.+)$").expect("labeled formula regex must compile")
    })
}

/// Classify one line. Surrounding whitespace is ignored.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Inert;
    }

    if let Some(caps) = assignment_re().captures(line) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        let expression = caps.get(2).map_or("", |m| m.as_str()).trim();
        // `x == 1` is not an assignment.
        if !expression.is_empty() && !expression.starts_with('=') {
            return LineKind::Assignment { name, expression };
        }
    }

    if let Some(rest) = line.strip_prefix('=') {
        let expression = rest.trim();
        if expression.is_empty() {
            return LineKind::Inert;
        }
        return LineKind::Formula { expression };
    }

    if let Some(caps) = labeled_re().captures(line) {
        let label = caps.get(1).map_or("", |m| m.as_str()).trim();
        let expression = caps.get(2).map_or("", |m| m.as_str()).trim();
        if !expression.is_empty() {
            return LineKind::LabeledFormula { label, expression };
        }
    }

    LineKind::Inert
}
