//! Export of notes and their results: plain text, CSV, markdown and
//! shareable text.

use std::fs;
use std::path::Path;
use tally_engine::engine::CalculationResult;

use crate::error::Result;
use crate::format::display_number;
use crate::note::Note;
use crate::settings::Settings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    PlainText,
    Csv,
    Markdown,
    Shareable,
}

impl ExportFormat {
    /// Pick a format from a file extension; anything unrecognised is plain text.
    pub fn from_path(path: &Path) -> ExportFormat {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") => ExportFormat::Csv,
            Some("md") | Some("markdown") => ExportFormat::Markdown,
            Some("share") => ExportFormat::Shareable,
            _ => ExportFormat::PlainText,
        }
    }
}

/// Render a note in the given format.
pub fn export(
    format: ExportFormat,
    note: &Note,
    results: &[CalculationResult],
    settings: &Settings,
) -> Result<String> {
    Ok(match format {
        ExportFormat::PlainText => to_plain_text(note, settings.include_formulas),
        ExportFormat::Csv => to_csv(note, results)?,
        ExportFormat::Markdown => to_markdown(note, results, settings),
        ExportFormat::Shareable => to_shareable_text(note, results, settings),
    })
}

/// Write a note to `path`, choosing the format from its extension.
pub fn write_export(
    path: &Path,
    note: &Note,
    results: &[CalculationResult],
    settings: &Settings,
) -> Result<()> {
    let content = export(ExportFormat::from_path(path), note, results, settings)?;
    fs::write(path, content)?;
    Ok(())
}

/// The note text, optionally with every `=...` line tail removed.
pub fn to_plain_text(note: &Note, include_formulas: bool) -> String {
    if include_formulas {
        return note.content.clone();
    }
    note.content
        .split('\n')
        .map(strip_formula)
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_formula(line: &str) -> &str {
    match line.find('=') {
        Some(pos) if pos + 1 < line.len() => &line[..pos],
        _ => line,
    }
}

/// `Line,Content,Result` rows, one per result. Errors leave `Result` empty.
pub fn to_csv(note: &Note, results: &[CalculationResult]) -> Result<String> {
    let lines: Vec<&str> = note.content.split('\n').collect();
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Line", "Content", "Result"])?;

    for result in results {
        let content = result
            .line_number
            .checked_sub(1)
            .and_then(|index| lines.get(index))
            .map_or("", |line| line.trim_end_matches('\r'));
        let value = result.number().map(|n| n.to_string()).unwrap_or_default();
        writer.write_record([result.line_number.to_string().as_str(), content, value.as_str()])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn result_for(results: &[CalculationResult], line_number: usize) -> Option<&CalculationResult> {
    results.iter().find(|r| r.line_number == line_number)
}

/// Title, underline, then every line with ` → value` after numeric results.
pub fn to_shareable_text(
    note: &Note,
    results: &[CalculationResult],
    settings: &Settings,
) -> String {
    let mut out = format!(
        "{}\n{}\n\n",
        note.title,
        "=".repeat(note.title.chars().count())
    );

    for (index, line) in note.content.split('\n').enumerate() {
        let line = line.trim_end_matches('\r');
        match result_for(results, index + 1).and_then(|r| r.number()) {
            Some(n) => out.push_str(&format!("{} → {}\n", line, display_number(n, settings))),
            None => out.push_str(&format!("{}\n", line)),
        }
    }

    out
}

/// A markdown table of every non-blank line and its result.
pub fn to_markdown(
    note: &Note,
    results: &[CalculationResult],
    settings: &Settings,
) -> String {
    let mut lines = vec![
        format!("# {}", escape_markdown(&note.title)),
        String::new(),
        "| Line | Content | Result |".to_string(),
        "|---:|---|---:|".to_string(),
    ];

    for (index, line) in note.content.split('\n').enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line_number = index + 1;
        let result = match result_for(results, line_number) {
            Some(r) => match r.number() {
                Some(n) => display_number(n, settings),
                None => format!("✗ {}", r.error_message().unwrap_or_default()),
            },
            None => String::new(),
        };
        lines.push(format!(
            "| {} | {} | {} |",
            line_number,
            escape_markdown(line),
            escape_markdown(&result)
        ));
    }

    lines.join("\n") + "\n"
}

fn escape_markdown(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '|' => out.push_str("\\|"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out
}
