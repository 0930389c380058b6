//! Reference resolution against a [`Context`].
//!
//! Lookup order:
//!
//! 1. `now` - current time as an ISO-8601 string
//! 2. `uuid` - a fresh random v4 UUID
//! 3. `env.<NAME>` - the environment snapshot
//! 4. `inputs.<path>` - the inputs namespace
//! 5. `<path>` - step outputs, so `fetch_user.id` needs no `steps.` prefix
//! 6. `<path>` - the whole context, for ad-hoc top-level fields

use super::context::Context;
use super::path::{deep_get_map, split_path, walk};
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A zero-argument value computed fresh on every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Now,
    Uuid,
}

impl Builtin {
    /// Recognize a built-in by its exact name.
    pub fn from_name(name: &str) -> Option<Builtin> {
        match name {
            "now" => Some(Builtin::Now),
            "uuid" => Some(Builtin::Uuid),
            _ => None,
        }
    }

    /// Compute the built-in's current value.
    pub fn value(self) -> Value {
        match self {
            Builtin::Now => Value::String(now_iso8601()),
            Builtin::Uuid => Value::String(Uuid::new_v4().to_string()),
        }
    }
}

/// Current UTC time with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Resolve a reference path to a value.
///
/// Returns `None` when nothing in the context matches. Never fails.
pub fn resolve_reference(path: &str, context: &Context) -> Option<Value> {
    if let Some(builtin) = Builtin::from_name(path) {
        return Some(builtin.value());
    }

    let resolved = if let Some(rest) = path.strip_prefix("env.") {
        lookup_env(context, rest)
    } else if let Some(rest) = path.strip_prefix("inputs.") {
        deep_get_map(&context.inputs, rest).cloned()
    } else {
        deep_get_map(&context.steps, path)
            .cloned()
            .or_else(|| lookup_context(context, path))
    };

    if resolved.is_none() {
        tracing::debug!(reference = %path, "reference resolved to undefined");
    }
    resolved
}

/// Look a path up against the context as a whole, where the first segment
/// names a namespace (`inputs`, `steps`, `env`) or an ad-hoc top-level field.
fn lookup_context(context: &Context, path: &str) -> Option<Value> {
    if path.is_empty() {
        return None;
    }
    let segments = split_path(path);
    let (first, rest) = segments.split_first()?;
    match first.as_str() {
        "inputs" => lookup_namespace(&context.inputs, rest),
        "steps" => lookup_namespace(&context.steps, rest),
        "env" => match rest {
            [] => Some(Value::Object(
                context
                    .env
                    .iter()
                    .map(|(name, value)| (name.clone(), Value::String(value.clone())))
                    .collect(),
            )),
            [name] => context.env.get(name).cloned().map(Value::String),
            _ => None,
        },
        field => context.extra.get(field).and_then(|value| walk(value, rest)).cloned(),
    }
}

fn lookup_namespace(map: &Map<String, Value>, rest: &[String]) -> Option<Value> {
    match rest.split_first() {
        None => Some(Value::Object(map.clone())),
        Some((key, tail)) => map.get(key).and_then(|value| walk(value, tail)).cloned(),
    }
}

/// Environment values are flat strings, so only a single segment can match.
fn lookup_env(context: &Context, path: &str) -> Option<Value> {
    if path.is_empty() {
        return None;
    }
    match split_path(path).as_slice() {
        [name] => context.env.get(name).cloned().map(Value::String),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> Context {
        Context::from_value(json!({
            "inputs": {"amount": 42, "user": {"name": "Ada"}},
            "steps": {
                "fetch_user": {"id": 7, "tags": ["a", "b"]},
                "amount": 5
            },
            "env": {"HOME": "/home/ada"},
            "region": "eu-west"
        }))
    }

    #[test]
    fn test_now_is_iso8601() {
        let value = resolve_reference("now", &Context::new()).unwrap();
        let text = value.as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(text).is_ok());
        assert!(text.ends_with('Z'));
    }

    #[test]
    fn test_uuid_is_fresh_v4() {
        let a = resolve_reference("uuid", &Context::new()).unwrap();
        let b = resolve_reference("uuid", &Context::new()).unwrap();
        let parsed = Uuid::parse_str(a.as_str().unwrap()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_ne!(a, b);
    }

    #[test]
    fn test_env_lookup() {
        let ctx = context();
        assert_eq!(resolve_reference("env.HOME", &ctx), Some(json!("/home/ada")));
        assert_eq!(resolve_reference("env.MISSING", &ctx), None);
        assert_eq!(resolve_reference("env.HOME.x", &ctx), None);
    }

    #[test]
    fn test_inputs_lookup() {
        let ctx = context();
        assert_eq!(resolve_reference("inputs.amount", &ctx), Some(json!(42)));
        assert_eq!(resolve_reference("inputs.user.name", &ctx), Some(json!("Ada")));
        assert_eq!(resolve_reference("inputs.nope", &ctx), None);
    }

    #[test]
    fn test_bare_step_lookup() {
        let ctx = context();
        assert_eq!(resolve_reference("fetch_user.id", &ctx), Some(json!(7)));
        assert_eq!(resolve_reference("fetch_user.tags[1]", &ctx), Some(json!("b")));
        assert_eq!(resolve_reference("amount", &ctx), Some(json!(5)));
    }

    #[test]
    fn test_context_fallback() {
        let ctx = context();
        assert_eq!(resolve_reference("region", &ctx), Some(json!("eu-west")));
        assert_eq!(resolve_reference("steps.fetch_user.id", &ctx), Some(json!(7)));
        assert_eq!(resolve_reference("inputs", &ctx), Some(json!({"amount": 42, "user": {"name": "Ada"}})));
    }

    #[test]
    fn test_context_fallback_namespaces() {
        let ctx = context();
        assert_eq!(resolve_reference("env", &ctx), Some(json!({"HOME": "/home/ada"})));
        assert_eq!(resolve_reference("steps.fetch_user.tags[0]", &ctx), Some(json!("a")));
        assert_eq!(resolve_reference("steps.missing", &ctx), None);
        assert_eq!(resolve_reference("region.name", &ctx), None);
    }

    #[test]
    fn test_nested_extra_field() {
        let ctx = Context::from_value(json!({"meta": {"tags": ["x", "y"]}}));
        assert_eq!(resolve_reference("meta.tags[1]", &ctx), Some(json!("y")));
        assert_eq!(resolve_reference("meta", &ctx), Some(json!({"tags": ["x", "y"]})));
    }

    #[test]
    fn test_unknown_reference_is_undefined() {
        assert_eq!(resolve_reference("nothing.here", &context()), None);
        assert_eq!(resolve_reference("anything", &Context::new()), None);
    }

    #[test]
    fn test_builtin_names_are_exact() {
        assert_eq!(Builtin::from_name("now"), Some(Builtin::Now));
        assert_eq!(Builtin::from_name("uuid"), Some(Builtin::Uuid));
        assert_eq!(Builtin::from_name("now.date"), None);
    }
}
