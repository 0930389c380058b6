//! Implementation of the `dot0n resolve` command.

use crate::cli::ResolveArgs;
use crate::error::{Result, ZeronError};
use crate::fs::read_to_string;
use crate::resolve::{Context, resolve};
use serde_json::{Map, Value};

/// Parse a JSON argument that must be an object.
fn parse_object(flag: &str, raw: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(raw)? {
        Value::Object(map) => Ok(map),
        _ => Err(ZeronError::UserError(format!(
            "--{} must be a JSON object",
            flag
        ))),
    }
}

/// Split `key=value`; the value is JSON if it parses, otherwise a string.
pub(crate) fn parse_input_pair(raw: &str) -> Result<(String, Value)> {
    let (key, value) = raw.split_once('=').ok_or_else(|| {
        ZeronError::UserError(format!("invalid --input '{}': expected KEY=VALUE", raw))
    })?;
    if key.is_empty() {
        return Err(ZeronError::UserError(format!(
            "invalid --input '{}': key is empty",
            raw
        )));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Build the resolution context from command arguments, without the
/// process environment.
pub(crate) fn build_context(args: &ResolveArgs) -> Result<Context> {
    let mut inputs = match &args.inputs {
        Some(raw) => parse_object("inputs", raw)?,
        None => Map::new(),
    };
    for pair in &args.input {
        let (key, value) = parse_input_pair(pair)?;
        inputs.insert(key, value);
    }

    let steps = match &args.steps {
        Some(raw) => parse_object("steps", raw)?,
        None => Map::new(),
    };

    Ok(Context::new().with_inputs(inputs).with_steps(steps))
}

/// Execute the `dot0n resolve` command.
pub fn cmd_resolve(args: ResolveArgs) -> Result<()> {
    let template: Value = serde_json::from_str(&read_to_string(&args.file)?)?;
    let context = build_context(&args)?.with_process_env();

    let resolved = resolve(&template, &context);
    println!("{}", serde_json::to_string_pretty(&resolved)?);

    Ok(())
}
