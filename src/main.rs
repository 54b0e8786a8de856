//! Tally - notes with inline calculations

mod cli;
mod error;
mod logging;
mod render;

use anyhow::{Context, bail};
use std::io::{IsTerminal, Read};
use std::process::ExitCode;
use tally_core::{Calculator, Note, Settings, calculation_count, samples, write_export};
use tracing::debug;

use cli::{Input, Options};

fn load_settings(options: &Options) -> anyhow::Result<Settings> {
    let path = match &options.config {
        Some(path) => Some(path.clone()),
        None => Settings::default_path(),
    };
    let mut settings = match path {
        Some(path) => Settings::load(&path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    if let Some(precision) = options.precision {
        settings.decimal_precision = precision;
    }
    if let Some(code) = &options.currency {
        settings.set_currency(code);
        settings.show_currency = true;
    }
    if options.no_formulas {
        settings.include_formulas = false;
    }
    if options.no_line_numbers {
        settings.show_line_numbers = false;
    }
    settings.validate()?;
    Ok(settings)
}

fn read_note(input: &Input) -> anyhow::Result<Note> {
    match input {
        Input::Command(text) => Ok(Note::new(0, "command", text.as_str())),
        Input::Sample(n) => samples::samples()
            .into_iter()
            .nth(n - 1)
            .with_context(|| format!("No sample note {}", n)),
        Input::File(Some(path)) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let title = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("note")
                .to_string();
            Ok(Note::new(0, title, content))
        }
        Input::File(None) => {
            let mut stdin = std::io::stdin();
            if stdin.is_terminal() {
                bail!("No input: pass a FILE, --command or --sample, or pipe a note on stdin");
            }
            let mut content = String::new();
            stdin
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            Ok(Note::new(0, "stdin", content))
        }
    }
}

fn run(options: &Options) -> anyhow::Result<ExitCode> {
    let settings = load_settings(options)?;
    let note = read_note(&options.input)?;

    let calculator = Calculator::new();
    let (results, state) = calculator.evaluate_with_state(&note.content);
    let errors = results.iter().filter(|r| r.is_error()).count();
    debug!(
        title = %note.title,
        results = results.len(),
        calculations = calculation_count(&results),
        errors,
        "evaluated note"
    );

    if let Some(output) = &options.output {
        write_export(output, &note, &results, &settings)
            .with_context(|| format!("Failed to export to {}", output.display()))?;
        println!("Exported to {}", output.display());
    } else if options.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print!("{}", render::annotate(&note.content, &results, &settings));
    }

    if options.vars {
        print!("{}", render::variables(&state, &settings));
    }

    Ok(if errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match cli::parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            cli::print_usage();
            return ExitCode::from(2);
        }
    };
    if options.help {
        cli::print_usage();
        return ExitCode::SUCCESS;
    }

    logging::init_logging(options.verbose);

    match run(&options) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
