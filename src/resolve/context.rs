//! Runtime context that templates are resolved against.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Values visible to `{{...}}` expressions.
///
/// Every field is optional on the wire; a missing namespace behaves like an
/// empty one. Unknown top-level fields are kept in `extra` and remain
/// addressable through the final context fallback of reference resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    /// User-supplied inputs, addressed as `inputs.<path>`.
    pub inputs: Map<String, Value>,

    /// Outputs of prior pipeline steps, keyed by step id.
    pub steps: Map<String, Value>,

    /// Environment snapshot, addressed as `env.<NAME>`.
    pub env: BTreeMap<String, String>,

    /// Ad-hoc top-level fields outside the inputs/steps/env triple.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inputs namespace.
    pub fn with_inputs(mut self, inputs: Map<String, Value>) -> Self {
        self.inputs = inputs;
        self
    }

    /// Set the step outputs namespace.
    pub fn with_steps(mut self, steps: Map<String, Value>) -> Self {
        self.steps = steps;
        self
    }

    /// Set the environment snapshot.
    pub fn with_env<I, K, V>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = env.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    /// Snapshot the current process environment into `env`.
    ///
    /// This is the only place the process environment is read; evaluation
    /// itself only sees the snapshot.
    pub fn with_process_env(self) -> Self {
        self.with_env(std::env::vars())
    }

    /// Record the output of a finished step under its id.
    pub fn insert_step(&mut self, id: impl Into<String>, output: Value) {
        self.steps.insert(id.into(), output);
    }

    /// Build a context from an arbitrary JSON object.
    ///
    /// Each namespace is taken independently: `inputs` and `steps` are kept
    /// when they are objects, `env` keeps only its string entries, and any
    /// other top-level field lands in `extra`. A namespace of the wrong shape
    /// is empty without affecting the others. A non-object yields an empty
    /// context.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut root) = value else {
            return Self::default();
        };

        let mut namespace = |key: &str| match root.remove(key) {
            Some(Value::Object(map)) => map,
            Some(other) => {
                tracing::debug!(namespace = key, value = %other, "ignoring non-object context namespace");
                Map::new()
            }
            None => Map::new(),
        };
        let inputs = namespace("inputs");
        let steps = namespace("steps");
        let env = namespace("env")
            .into_iter()
            .filter_map(|(name, value)| match value {
                Value::String(text) => Some((name, text)),
                _ => None,
            })
            .collect();

        Self {
            inputs,
            steps,
            env,
            extra: root,
        }
    }

    /// The whole context as a single JSON object.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_namespaces_default_to_empty() {
        let ctx = Context::from_value(json!({"inputs": {"a": 1}}));
        assert_eq!(ctx.inputs.get("a"), Some(&json!(1)));
        assert!(ctx.steps.is_empty());
        assert!(ctx.env.is_empty());
    }

    #[test]
    fn test_extra_fields_are_kept() {
        let ctx = Context::from_value(json!({"amount": 5, "steps": {}}));
        assert_eq!(ctx.extra.get("amount"), Some(&json!(5)));
    }

    #[test]
    fn test_to_value_contains_all_namespaces() {
        let ctx = Context::new()
            .with_env([("HOME", "/home/me")])
            .with_inputs(json!({"x": 1}).as_object().unwrap().clone());
        let value = ctx.to_value();
        assert_eq!(value["env"]["HOME"], json!("/home/me"));
        assert_eq!(value["inputs"]["x"], json!(1));
        assert_eq!(value["steps"], json!({}));
    }

    #[test]
    fn test_insert_step() {
        let mut ctx = Context::new();
        ctx.insert_step("fetch_user", json!({"id": 7}));
        assert_eq!(ctx.steps["fetch_user"], json!({"id": 7}));
    }

    #[test]
    fn test_non_object_yields_empty_context() {
        assert_eq!(Context::from_value(json!([1, 2])), Context::default());
        assert_eq!(Context::from_value(json!("inputs")), Context::default());
    }

    #[test]
    fn test_non_string_env_entries_are_dropped() {
        let ctx = Context::from_value(json!({
            "inputs": {"amount": 42},
            "env": {"PORT": 8080, "MODE": "test"}
        }));
        assert_eq!(ctx.inputs.get("amount"), Some(&json!(42)));
        assert_eq!(ctx.env.len(), 1);
        assert_eq!(ctx.env.get("MODE").map(String::as_str), Some("test"));
    }

    #[test]
    fn test_malformed_namespace_leaves_others_intact() {
        let ctx = Context::from_value(json!({
            "inputs": {"amount": 42},
            "steps": [],
            "env": 5,
            "region": "eu-west"
        }));
        assert_eq!(ctx.inputs.get("amount"), Some(&json!(42)));
        assert!(ctx.steps.is_empty());
        assert!(ctx.env.is_empty());
        assert_eq!(ctx.extra.get("region"), Some(&json!("eu-west")));
        assert!(!ctx.extra.contains_key("steps"));
    }
}
