//! Command line parsing.

use std::path::PathBuf;
use tally_engine::engine::AGGREGATE_BUILTINS;

use crate::error::UsageError;

pub(crate) fn print_usage() {
    eprintln!("Usage: tally [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Note to evaluate ('-' or omitted reads stdin)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <TEXT>      Evaluate TEXT instead of a file");
    eprintln!("      --sample <N>          Evaluate built-in sample note N (1-4)");
    eprintln!("  -o, --output <FILE>       Export (.txt, .csv, .md, .share by extension)");
    eprintln!("      --json                Print results as JSON");
    eprintln!("      --vars                Print variables after the results");
    eprintln!("      --no-formulas         Strip formulas from plain-text exports");
    eprintln!("  -p, --precision <N>       Decimal places for results");
    eprintln!("      --currency <CODE>     Show results converted to CODE (e.g. EUR)");
    eprintln!("      --no-line-numbers     Hide line numbers");
    eprintln!("      --config <FILE>       Settings file (default: config dir/config.toml)");
    eprintln!("  -v, --verbose             Debug logging to stderr");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Functions:");
    for builtin in AGGREGATE_BUILTINS {
        eprintln!("  {:<26}{}", format!("{}(...)", builtin.name), builtin.description);
    }
}

/// Where the note text comes from.
#[derive(Debug, PartialEq)]
pub(crate) enum Input {
    /// Read a file, or stdin when `None`.
    File(Option<PathBuf>),
    Command(String),
    Sample(usize),
}

#[derive(Debug, PartialEq)]
pub(crate) struct Options {
    pub input: Input,
    pub output: Option<PathBuf>,
    pub json: bool,
    pub vars: bool,
    pub no_formulas: bool,
    pub precision: Option<usize>,
    pub currency: Option<String>,
    pub no_line_numbers: bool,
    pub config: Option<PathBuf>,
    pub verbose: bool,
    pub help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            input: Input::File(None),
            output: None,
            json: false,
            vars: false,
            no_formulas: false,
            precision: None,
            currency: None,
            no_line_numbers: false,
            config: None,
            verbose: false,
            help: false,
        }
    }
}

fn value<'a>(args: &'a [String], i: &mut usize, option: &str) -> Result<&'a str, UsageError> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| UsageError::MissingValue(option.to_string()))
}

fn number(text: &str, option: &str) -> Result<usize, UsageError> {
    text.parse::<usize>().map_err(|_| UsageError::InvalidValue {
        option: option.to_string(),
        value: text.to_string(),
    })
}

fn set_input(options: &mut Options, input: Input) -> Result<(), UsageError> {
    if options.input != Input::File(None) {
        return Err(UsageError::ConflictingInputs);
    }
    options.input = input;
    Ok(())
}

/// Parse arguments, excluding the program name.
pub(crate) fn parse_args(args: &[String]) -> Result<Options, UsageError> {
    let mut options = Options::default();
    let mut i = 0;

    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => options.help = true,
            "-c" | "--command" => {
                let text = value(args, &mut i, arg)?;
                set_input(&mut options, Input::Command(text.to_string()))?;
            }
            "--sample" => {
                let text = value(args, &mut i, arg)?;
                let n = number(text, arg)?;
                if !(1..=4).contains(&n) {
                    return Err(UsageError::InvalidValue {
                        option: arg.to_string(),
                        value: text.to_string(),
                    });
                }
                set_input(&mut options, Input::Sample(n))?;
            }
            "-o" | "--output" => options.output = Some(PathBuf::from(value(args, &mut i, arg)?)),
            "--json" => options.json = true,
            "--vars" => options.vars = true,
            "--no-formulas" => options.no_formulas = true,
            "-p" | "--precision" => {
                options.precision = Some(number(value(args, &mut i, arg)?, arg)?);
            }
            "--currency" => options.currency = Some(value(args, &mut i, arg)?.to_string()),
            "--no-line-numbers" => options.no_line_numbers = true,
            "--config" => options.config = Some(PathBuf::from(value(args, &mut i, arg)?)),
            "-v" | "--verbose" => options.verbose = true,
            "-" => set_input(&mut options, Input::File(None))?,
            _ if arg.starts_with('-') => return Err(UsageError::UnknownOption(arg.to_string())),
            _ => {
                if options.input != Input::File(None) {
                    return match options.input {
                        Input::File(_) => Err(UsageError::UnexpectedArgument(arg.to_string())),
                        _ => Err(UsageError::ConflictingInputs),
                    };
                }
                options.input = Input::File(Some(PathBuf::from(arg)));
            }
        }
        i += 1;
    }

    Ok(options)
}
