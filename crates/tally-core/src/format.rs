//! Presentation formatting for results: fixed precision and currencies.

use tally_engine::engine::CalculationResult;

use crate::settings::Settings;

/// Currency code, symbol, and rate relative to USD.
pub const CURRENCIES: &[(&str, &str, f64)] = &[
    ("USD", "$", 1.0),
    ("EUR", "€", 0.91),
    ("GBP", "£", 0.78),
    ("INR", "₹", 83.2),
    ("JPY", "¥", 156.78),
    ("KRW", "₩", 1392.56),
    ("RUB", "₽", 90.45),
    ("TRY", "₺", 32.45),
    ("VND", "₫", 24000.0),
];

fn lookup(code: &str) -> Option<&'static (&'static str, &'static str, f64)> {
    CURRENCIES
        .iter()
        .find(|(c, _, _)| c.eq_ignore_ascii_case(code))
}

/// Symbol for a currency code; `$` for unknown codes.
pub fn currency_symbol(code: &str) -> &'static str {
    lookup(code).map_or("$", |(_, symbol, _)| *symbol)
}

/// Rate from USD; 1 for unknown codes.
pub fn currency_rate(code: &str) -> f64 {
    lookup(code).map_or(1.0, |(_, _, rate)| *rate)
}

/// Fixed number of decimal places (always prints trailing zeros).
pub fn format_value(n: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, n)
}

fn money_string(n: f64, symbol: &str, decimals: usize) -> String {
    let sign = if n.is_sign_negative() && n != 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, symbol, format_value(n.abs(), decimals))
}

/// Convert a USD amount and format it with the currency's symbol, 2 dp.
pub fn convert_to_currency(amount: f64, code: &str) -> String {
    money_string(amount * currency_rate(code), currency_symbol(code), 2)
}

/// Display text for a number under the given settings.
pub fn display_number(n: f64, settings: &Settings) -> String {
    if settings.show_currency {
        money_string(
            n * currency_rate(&settings.currency),
            &settings.currency_symbol,
            settings.decimal_precision,
        )
    } else {
        format_value(n, settings.decimal_precision)
    }
}

/// Display text for a result: the number, or the error message.
pub fn display_result(result: &CalculationResult, settings: &Settings) -> String {
    match result.number() {
        Some(n) => display_number(n, settings),
        None => result.error_message().unwrap_or_default(),
    }
}
