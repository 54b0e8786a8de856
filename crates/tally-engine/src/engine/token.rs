//! Expression tokenizer.
//!
//! Resolution works on tokens rather than on text, so a substituted value
//! can never be re-matched as a reference or a variable name by a later pass.

use crate::error::{CalcError, Result};

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Ident(String),
    /// `@N`
    LineRef(usize),
    /// `@N:@M`
    Range(usize, usize),
    /// One of `+ - * / % ^`.
    Op(char),
    LParen,
    RParen,
    Comma,
}

const OPERATORS: &[char] = &['+', '-', '*', '/', '%', '^'];

/// Split an expression into tokens.
pub fn tokenize(expression: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = expression.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c.is_ascii_digit() || (c == '.' && next_is_digit(&chars, i)) {
            let (n, next) = scan_number(&chars, i)?;
            tokens.push(Token::Number(n));
            i = next;
        } else if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token::Ident(chars[start..i].iter().collect()));
        } else if c == '@' {
            let (token, next) = scan_reference(&chars, i)?;
            tokens.push(token);
            i = next;
        } else if OPERATORS.contains(&c) {
            tokens.push(Token::Op(c));
            i += 1;
        } else {
            let token = match c {
                '(' => Token::LParen,
                ')' => Token::RParen,
                ',' => Token::Comma,
                _ => {
                    return Err(CalcError::evaluation(format!(
                        "Unexpected character '{}' at position {}",
                        c,
                        i + 1
                    )));
                }
            };
            tokens.push(token);
            i += 1;
        }
    }

    Ok(tokens)
}

fn next_is_digit(chars: &[char], i: usize) -> bool {
    chars.get(i + 1).is_some_and(|c| c.is_ascii_digit())
}

fn scan_digits(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    i
}

fn scan_number(chars: &[char], start: usize) -> Result<(f64, usize)> {
    let mut i = scan_digits(chars, start);
    if i < chars.len() && chars[i] == '.' {
        i = scan_digits(chars, i + 1);
    }
    // Only treat `e` as an exponent when digits follow, so `2e` stays `2` `e`.
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            i = scan_digits(chars, j);
        }
    }

    let text: String = chars[start..i].iter().collect();
    let n = text
        .parse::<f64>()
        .map_err(|_| CalcError::evaluation(format!("Invalid number '{}'", text)))?;
    Ok((n, i))
}

/// Parse the digits after an `@`. Numbers too large for `usize` saturate,
/// which always makes them a forward reference.
fn scan_line_number(chars: &[char], at: usize) -> Option<(usize, usize)> {
    let start = at + 1;
    let end = scan_digits(chars, start);
    if end == start {
        return None;
    }
    let text: String = chars[start..end].iter().collect();
    Some((text.parse::<usize>().unwrap_or(usize::MAX), end))
}

fn scan_reference(chars: &[char], at: usize) -> Result<(Token, usize)> {
    let (start_line, next) = scan_line_number(chars, at).ok_or_else(|| {
        CalcError::evaluation(format!("Expected a line number after '@' at position {}", at + 1))
    })?;

    if chars.get(next) != Some(&':') {
        return Ok((Token::LineRef(start_line), next));
    }

    let bound = next + 1;
    if chars.get(bound) != Some(&'@') {
        return Err(CalcError::MalformedRange(
            "both range bounds must be line references like @1:@3".to_string(),
        ));
    }
    let (end_line, next) = scan_line_number(chars, bound).ok_or_else(|| {
        CalcError::MalformedRange("range end must be a line number".to_string())
    })?;
    Ok((Token::Range(start_line, end_line), next))
}

/// Index of the `)` closing the `(` at `open`.
pub(crate) fn matching_paren(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, token) in tokens[open..].iter().enumerate() {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokenize_arithmetic() {
        assert_eq!(
            tokenize("3.50 + (2 * x_1) ^ 2").unwrap(),
            vec![
                Token::Number(3.5),
                Token::Op('+'),
                Token::LParen,
                Token::Number(2.0),
                Token::Op('*'),
                Token::Ident("x_1".to_string()),
                Token::RParen,
                Token::Op('^'),
                Token::Number(2.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        assert_eq!(tokenize(".5").unwrap(), vec![Token::Number(0.5)]);
        assert_eq!(tokenize("1.5e3").unwrap(), vec![Token::Number(1500.0)]);
        assert_eq!(tokenize("2E-1").unwrap(), vec![Token::Number(0.2)]);
        assert_eq!(
            tokenize("2e").unwrap(),
            vec![Token::Number(2.0), Token::Ident("e".to_string())]
        );
    }

    #[test]
    fn test_tokenize_references() {
        assert_eq!(
            tokenize("sum(@1:@3, @4)").unwrap(),
            vec![
                Token::Ident("sum".to_string()),
                Token::LParen,
                Token::Range(1, 3),
                Token::Comma,
                Token::LineRef(4),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_huge_line_number_saturates() {
        assert_eq!(
            tokenize("@99999999999999999999999").unwrap(),
            vec![Token::LineRef(usize::MAX)]
        );
    }

    #[test]
    fn test_range_without_sigil_is_malformed() {
        assert!(matches!(tokenize("sum(@1:3)"), Err(CalcError::MalformedRange(_))));
        assert!(matches!(tokenize("sum(@1:@x)"), Err(CalcError::MalformedRange(_))));
    }

    #[test]
    fn test_bad_characters() {
        assert!(matches!(tokenize("@x"), Err(CalcError::Evaluation(_))));
        assert!(matches!(tokenize("1; 2"), Err(CalcError::Evaluation(_))));
        assert!(matches!(tokenize("a = 1"), Err(CalcError::Evaluation(_))));
        assert!(matches!(tokenize("\"text\""), Err(CalcError::Evaluation(_))));
    }
}
