use super::token::{Token, matching_paren};

/// Format a number for display.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e10 {
        format!("{:.0}", n)
    } else {
        format!("{:.2}", n)
    }
}

/// Render a number as a float literal the evaluator reads back exactly.
///
/// Negative values are parenthesised so `2 - @1` with `@1 = -3` stays
/// well-formed.
pub(crate) fn float_literal(n: f64) -> String {
    let mut text = format!("{:?}", n);
    if let Some(e) = text.find('e') {
        if !text[..e].contains('.') {
            text.insert_str(e, ".0");
        }
    }
    if n.is_sign_negative() {
        format!("({})", text)
    } else {
        text
    }
}

/// Render resolved tokens as evaluator input.
///
/// Numbers become float literals and `^` becomes `**`, so the arithmetic is
/// always IEEE floating point regardless of how the user wrote the numbers.
/// A unary minus is written as `(-(operand))` around its whole power
/// operand, since Rhai binds unary operators tighter than `**` and
/// `-2 ^ 2` must be `-4`.
pub(crate) fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut prev: Option<&Token> = None;
    // End indices of the open negations, innermost last.
    let mut negations: Vec<usize> = Vec::new();
    let mut glued = false;

    for (i, token) in tokens.iter().enumerate() {
        let call = matches!((prev, token), (Some(Token::Ident(_)), Token::LParen));
        if prev.is_some() && !call && !glued {
            out.push(' ');
        }
        glued = false;

        if is_unary_minus(prev, token) {
            out.push_str("(-(");
            negations.push(power_operand_end(tokens, i + 1));
            glued = true;
        } else {
            match token {
                Token::Number(n) => out.push_str(&float_literal(*n)),
                Token::Ident(name) => out.push_str(name),
                Token::LineRef(line) => {
                    out.push('@');
                    out.push_str(&line.to_string());
                }
                Token::Range(start, end) => out.push_str(&format!("@{}:@{}", start, end)),
                Token::Op('^') => out.push_str("**"),
                Token::Op(op) => out.push(*op),
                Token::LParen => out.push('('),
                Token::RParen => out.push(')'),
                Token::Comma => out.push(','),
            }
        }
        prev = Some(token);

        while negations.last().is_some_and(|&end| end <= i + 1) {
            negations.pop();
            out.push_str("))");
        }
    }
    for _ in negations {
        out.push_str("))");
    }

    out
}

fn is_unary_minus(prev: Option<&Token>, token: &Token) -> bool {
    *token == Token::Op('-')
        && matches!(
            prev,
            None | Some(Token::Op(_)) | Some(Token::LParen) | Some(Token::Comma)
        )
}

/// Index just past the power operand starting at `start`: any unary signs,
/// one primary, then `^` chains with their own operands.
fn power_operand_end(tokens: &[Token], start: usize) -> usize {
    let mut i = start;
    loop {
        while matches!(tokens.get(i), Some(Token::Op('-' | '+'))) {
            i += 1;
        }
        i = match tokens.get(i) {
            Some(Token::Ident(_)) if tokens.get(i + 1) == Some(&Token::LParen) => {
                matching_paren(tokens, i + 1).map_or(tokens.len(), |close| close + 1)
            }
            Some(Token::LParen) => {
                matching_paren(tokens, i).map_or(tokens.len(), |close| close + 1)
            }
            Some(Token::RParen | Token::Comma | Token::Op(_)) | None => return i,
            Some(_) => i + 1,
        };
        if tokens.get(i) != Some(&Token::Op('^')) {
            return i;
        }
        i += 1;
    }
}
