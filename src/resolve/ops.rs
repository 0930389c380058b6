//! Binary operators understood by expressions.
//!
//! The operator set and its precedence levels are fixed. The lexer and the
//! evaluator both go through [`Operator::from_symbol`], so they can never
//! disagree on what counts as an operator.

use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// Largest integer magnitude an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl Operator {
    /// Every operator, two-character symbols first.
    pub const ALL: [Operator; 11] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Ge,
        Operator::Le,
        Operator::Gt,
        Operator::Lt,
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Rem,
    ];

    /// The source symbol for this operator.
    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Rem => "%",
        }
    }

    /// Binding strength; higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            Operator::Eq
            | Operator::Ne
            | Operator::Gt
            | Operator::Lt
            | Operator::Ge
            | Operator::Le => 1,
            Operator::Add | Operator::Sub => 2,
            Operator::Mul | Operator::Div | Operator::Rem => 3,
        }
    }

    /// Look up an operator by its exact symbol.
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        Operator::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Apply the operator to two possibly-undefined operands.
    ///
    /// Returns `None` when the operator does not apply to the operand types
    /// (for example arithmetic on strings). Division and remainder by zero
    /// yield `0`.
    pub fn apply(self, left: Option<&Value>, right: Option<&Value>) -> Option<Value> {
        match self {
            Operator::Eq => Some(Value::Bool(strict_equals(left, right))),
            Operator::Ne => Some(Value::Bool(!strict_equals(left, right))),
            Operator::Gt => Some(Value::Bool(compare(left, right) == Some(Ordering::Greater))),
            Operator::Lt => Some(Value::Bool(compare(left, right) == Some(Ordering::Less))),
            Operator::Ge => Some(Value::Bool(matches!(
                compare(left, right),
                Some(Ordering::Greater | Ordering::Equal)
            ))),
            Operator::Le => Some(Value::Bool(matches!(
                compare(left, right),
                Some(Ordering::Less | Ordering::Equal)
            ))),
            Operator::Add => arithmetic(left, right, |a, b| a + b),
            Operator::Sub => arithmetic(left, right, |a, b| a - b),
            Operator::Mul => arithmetic(left, right, |a, b| a * b),
            Operator::Div => arithmetic(left, right, |a, b| if b != 0.0 { a / b } else { 0.0 }),
            Operator::Rem => arithmetic(left, right, |a, b| if b != 0.0 { a % b } else { 0.0 }),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Convert an `f64` into a JSON number.
///
/// Integral values within the exactly-representable range become integer
/// numbers so that `2 + 3` compares equal to `json!(5)`. Non-finite values
/// have no JSON form and yield `None`.
pub(crate) fn number_value(n: f64) -> Option<Value> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        // -0.0 collapses to 0 here, matching how it prints.
        Some(Value::from(n as i64))
    } else {
        serde_json::Number::from_f64(n).map(Value::Number)
    }
}

fn arithmetic(
    left: Option<&Value>,
    right: Option<&Value>,
    f: impl Fn(f64, f64) -> f64,
) -> Option<Value> {
    let a = left?.as_f64()?;
    let b = right?.as_f64()?;
    number_value(f(a, b))
}

/// Equality without type coercion.
///
/// Numbers compare by value regardless of integer/float representation;
/// everything else compares structurally. Undefined equals only undefined.
fn strict_equals(left: Option<&Value>, right: Option<&Value>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(Value::Number(a)), Some(Value::Number(b))) => a.as_f64() == b.as_f64(),
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Ordering for the relational operators.
///
/// Only numbers against numbers, strings against strings, and booleans
/// against booleans are ordered; any other pairing is unordered and every
/// relational operator on it is false.
fn compare(left: Option<&Value>, right: Option<&Value>) -> Option<Ordering> {
    match (left?, right?) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
