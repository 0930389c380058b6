//! Template resolution engine.
//!
//! Resolves `{{expression}}` placeholders embedded anywhere in a JSON-shaped
//! template against a runtime [`Context`].
//!
//! # Expressions
//!
//! ```text
//! {{inputs.x}}              input values
//! {{step_id.nested.field}}  step output references
//! {{env.VAR}}               environment variables
//! {{now}}                   ISO-8601 timestamp
//! {{uuid}}                  random v4 UUID
//! {{amount * 100}}          arithmetic
//! {{grade == 'A'}}          comparisons
//! ```
//!
//! # Typing
//!
//! A string that is exactly one `{{...}}` resolves to the expression's native
//! value (number, boolean, object, ...). A string mixing text and
//! expressions always resolves to a string.
//!
//! # Failure
//!
//! Resolution never fails. Missing references, inapplicable operators, and
//! unrecognized characters degrade the result instead of raising an error.

mod context;
mod eval;
mod lexer;
mod ops;
mod path;
mod reference;


pub use context::Context;
pub use eval::{evaluate_expression, evaluate_tokens};
pub use lexer::{Token, tokenize};
pub use ops::Operator;
pub use path::{deep_get, deep_get_map};
pub use reference::{Builtin, now_iso8601, resolve_reference};

use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(.+?)\}\}").expect("Invalid placeholder regex"));

/// Anchored at both ends, so the lazy interior stretches across any inner
/// `}}`/`{{` pairs: `{{a}} {{b}}` is one expression with interior `a}} {{b`.
static SINGLE_EXPRESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{\{(.+?)\}\}$").expect("Invalid single expression regex"));

/// Resolve every placeholder in `template`.
///
/// Arrays and objects are rebuilt recursively; object keys are resolved as
/// well as values. Non-string scalars pass through unchanged. A single
/// placeholder that resolves to undefined becomes `null`.
///
/// # Examples
///
/// ```
/// use dot0n::resolve::{Context, resolve};
/// use serde_json::json;
///
/// let ctx = Context::from_value(json!({"inputs": {"amount": 42}}));
/// assert_eq!(resolve(&json!("{{inputs.amount}}"), &ctx), json!(42));
/// assert_eq!(resolve(&json!("Total: {{inputs.amount}}"), &ctx), json!("Total: 42"));
/// ```
pub fn resolve(template: &Value, context: &Context) -> Value {
    match template {
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| resolve(item, context)).collect())
        }
        Value::Object(map) => Value::Object(resolve_object(map, context)),
        Value::String(text) => resolve_str(text, context).unwrap_or(Value::Null),
        Value::Null | Value::Bool(_) | Value::Number(_) => template.clone(),
    }
}

fn resolve_object(map: &Map<String, Value>, context: &Context) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| (resolve_key(key, context), resolve(value, context)))
        .collect()
}

/// Keys must stay strings, so a key resolving to a non-string value is
/// stringified the same way a mixed template would.
fn resolve_key(key: &str, context: &Context) -> String {
    match resolve_str(key, context) {
        Some(Value::String(text)) => text,
        other => stringify(other.as_ref()),
    }
}

/// Resolve a single template string.
///
/// Returns `None` only when the string is exactly one placeholder whose
/// expression is undefined.
pub fn resolve_str(text: &str, context: &Context) -> Option<Value> {
    if let Some(expr) = single_expression(text) {
        return evaluate_expression(expr, context);
    }

    if !has_placeholders(text) {
        return Some(Value::String(text.to_string()));
    }

    let rendered = PLACEHOLDER.replace_all(text, |caps: &Captures<'_>| {
        stringify(evaluate_expression(&caps[1], context).as_ref())
    });
    Some(Value::String(rendered.into_owned()))
}

/// The interior of `text` if the whole string is one placeholder.
fn single_expression(text: &str) -> Option<&str> {
    SINGLE_EXPRESSION
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Text substituted for an expression inside a mixed template.
///
/// Null and undefined become the empty string, arrays and objects their
/// compact JSON form, and everything else its plain display form.
pub fn stringify(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Whether a string contains at least one placeholder.
pub fn has_placeholders(text: &str) -> bool {
    PLACEHOLDER.is_match(text)
}
