//! Expression evaluation.
//!
//! Expressions are flat chains of operands and binary operators with no
//! grouping. They are reduced with a value stack and an operator stack;
//! operators of equal precedence reduce left to right.

use super::context::Context;
use super::lexer::{Token, tokenize};
use super::ops::Operator;
use super::reference::{Builtin, resolve_reference};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static BARE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_$][a-zA-Z0-9_.$\[\]]*$").expect("Invalid bare reference regex")
});

/// A token after reference resolution: either an operand or an operator.
#[derive(Debug, Clone, PartialEq)]
enum Resolved {
    Operand(Option<Value>),
    Operator(Operator),
}

/// Evaluate expression text against a context.
///
/// The text is trimmed first. Returns `None` ("undefined") for missing
/// references and for operators that do not apply to their operands.
/// Never fails.
///
/// # Examples
///
/// ```
/// use dot0n::resolve::{Context, evaluate_expression};
/// use serde_json::json;
///
/// let ctx = Context::new();
/// assert_eq!(evaluate_expression("2 + 3 * 4", &ctx), Some(json!(14)));
/// assert_eq!(evaluate_expression("10 / 0", &ctx), Some(json!(0)));
/// ```
pub fn evaluate_expression(expr: &str, context: &Context) -> Option<Value> {
    let trimmed = expr.trim();

    if let Some(builtin) = Builtin::from_name(trimmed) {
        return Some(builtin.value());
    }

    if is_bare_reference(trimmed) {
        return resolve_reference(trimmed, context);
    }

    let tokens = tokenize(trimmed);
    if tokens.is_empty() {
        return Some(Value::String(trimmed.to_string()));
    }

    evaluate_tokens(tokens, context)
}

/// A lone identifier-shaped path that is not a keyword literal.
fn is_bare_reference(text: &str) -> bool {
    BARE_REFERENCE.is_match(text) && !matches!(text, "true" | "false" | "null")
}

/// Resolve references, then reduce the token stream to a single value.
pub fn evaluate_tokens(tokens: Vec<Token>, context: &Context) -> Option<Value> {
    let mut resolved: Vec<Resolved> = tokens
        .into_iter()
        .map(|token| match token {
            Token::Literal(value) => Resolved::Operand(Some(value)),
            Token::Reference(path) => Resolved::Operand(resolve_reference(&path, context)),
            Token::Operator(op) => Resolved::Operator(op),
        })
        .collect();

    if resolved.len() == 1
        && matches!(resolved[0], Resolved::Operand(_))
        && let Some(Resolved::Operand(value)) = resolved.pop()
    {
        return value;
    }

    reduce(resolved)
}

/// Two-stack precedence reduction.
fn reduce(tokens: Vec<Resolved>) -> Option<Value> {
    let mut values: Vec<Option<Value>> = Vec::new();
    let mut ops: Vec<Operator> = Vec::new();

    for token in tokens {
        match token {
            Resolved::Operand(value) => values.push(value),
            Resolved::Operator(incoming) => {
                while let Some(&top) = ops.last() {
                    if top.precedence() < incoming.precedence() {
                        break;
                    }
                    ops.pop();
                    apply_top(top, &mut values);
                }
                ops.push(incoming);
            }
        }
    }

    while let Some(op) = ops.pop() {
        apply_top(op, &mut values);
    }

    values.into_iter().next().flatten()
}

/// Pop two operands (right first), apply `op`, push the result.
fn apply_top(op: Operator, values: &mut Vec<Option<Value>>) {
    let right = values.pop().flatten();
    let left = values.pop().flatten();
    let result = op.apply(left.as_ref(), right.as_ref());
    if result.is_none() {
        tracing::trace!(operator = %op, ?left, ?right, "operator not applicable");
    }
    values.push(result);
}
