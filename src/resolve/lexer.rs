//! Tokenizer for expression text.
//!
//! The lexer never fails. Characters it does not recognize are dropped and
//! scanning continues, so malformed input degrades the token stream instead
//! of aborting.

use super::ops::{Operator, number_value};
use serde_json::Value;

/// A single lexical unit of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A string, number, boolean, or null literal.
    Literal(Value),
    /// A binary operator.
    Operator(Operator),
    /// A reference path, kept as written (e.g. `inputs.items[0].name`).
    Reference(String),
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | '[' | ']')
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Tokenize an expression left to right with maximal munch.
///
/// # Examples
///
/// ```
/// use dot0n::resolve::{Operator, Token, tokenize};
/// use serde_json::json;
///
/// let tokens = tokenize("inputs.amount * 100");
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Reference("inputs.amount".to_string()),
///         Token::Operator(Operator::Mul),
///         Token::Literal(json!(100)),
///     ]
/// );
/// ```
pub fn tokenize(expr: &str) -> Vec<Token> {
    let chars: Vec<char> = expr.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Quoted string; no escapes, unterminated runs to end of input
        if c == '\'' || c == '"' {
            let start = i + 1;
            let mut end = start;
            while end < chars.len() && chars[end] != c {
                end += 1;
            }
            let text: String = chars[start..end].iter().collect();
            tokens.push(Token::Literal(Value::String(text)));
            i = end + 1;
            continue;
        }

        if let Some(&next) = chars.get(i + 1) {
            let pair: String = [c, next].iter().collect();
            if let Some(op) = Operator::from_symbol(&pair) {
                tokens.push(Token::Operator(op));
                i += 2;
                continue;
            }
        }

        let mut buf = [0u8; 4];
        if let Some(op) = Operator::from_symbol(c.encode_utf8(&mut buf)) {
            tokens.push(Token::Operator(op));
            i += 1;
            continue;
        }

        if is_number_char(c) {
            let start = i;
            while i < chars.len() && is_number_char(chars[i]) {
                i += 1;
            }
            let run: String = chars[start..i].iter().collect();
            match parse_number_prefix(&run) {
                Some(value) => tokens.push(Token::Literal(value)),
                None => tracing::trace!(run = %run, "dropping malformed number"),
            }
            continue;
        }

        if is_ident_start(c) {
            let start = i;
            while i < chars.len() && is_ident_continue(chars[i]) {
                i += 1;
            }
            let ident: String = chars[start..i].iter().collect();
            tokens.push(match ident.as_str() {
                "true" => Token::Literal(Value::Bool(true)),
                "false" => Token::Literal(Value::Bool(false)),
                "null" => Token::Literal(Value::Null),
                _ => Token::Reference(ident),
            });
            continue;
        }

        tracing::trace!(character = %c, position = i, "skipping unrecognized character");
        i += 1;
    }

    tokens
}

/// Parse the longest numeric prefix of a run of digits and dots.
///
/// `1.5.2` reads as `1.5`; a run with no digit before its second dot
/// (such as `.` or `..5`) is not a number.
fn parse_number_prefix(run: &str) -> Option<Value> {
    let prefix = match run.match_indices('.').nth(1) {
        Some((second_dot, _)) => &run[..second_dot],
        None => run,
    };
    if !prefix.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    prefix.parse::<f64>().ok().and_then(number_value)
}
