//! Sequential workflow execution.
//!
//! Each step's `params` are resolved against the context built so far, the
//! step is handed to a [`StepExecutor`], and its output becomes addressable
//! by later steps as `{{<step id>.<path>}}`. The workflow's `outputs` block
//! is resolved last.

use super::model::Step;
use super::operations::workflow_steps;
use crate::error::Result;
use crate::resolve::{Context, resolve};
use serde::Serialize;
use serde_json::Value;

/// Performs the service call behind a step.
pub trait StepExecutor {
    /// Run `step` with its already-resolved parameters and return its output.
    fn execute(&mut self, step: &Step, params: Value) -> Result<Value>;
}

impl<F> StepExecutor for F
where
    F: FnMut(&Step, Value) -> Result<Value>,
{
    fn execute(&mut self, step: &Step, params: Value) -> Result<Value> {
        self(step, params)
    }
}

/// What happens when a step fails, from `error_handling.on_error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnError {
    Stop,
    Continue,
}

impl OnError {
    fn from_document(document: &Value) -> Self {
        match document
            .pointer("/error_handling/on_error")
            .and_then(Value::as_str)
        {
            Some("continue") => OnError::Continue,
            _ => OnError::Stop,
        }
    }
}

/// A step that failed under `on_error: continue`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepFailure {
    pub step: String,
    pub message: String,
}

/// Result of running a workflow to completion.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowRun {
    /// Final context, with every step's output recorded.
    #[serde(skip)]
    pub context: Context,
    /// Ids of steps that ran, in order.
    pub executed: Vec<String>,
    /// Steps that failed but did not stop the run.
    pub failures: Vec<StepFailure>,
    /// The resolved `outputs` block (null when the workflow has none).
    pub outputs: Value,
}

/// Resolve a step's parameter payload against `context`.
pub fn resolve_step_params(step: &Step, context: &Context) -> Value {
    resolve(&step.params, context)
}

/// Run every step of a workflow document in order.
///
/// With the default `on_error: stop`, the first executor error is returned.
/// With `on_error: continue`, the failing step's output is recorded as
/// `null` and the run goes on.
pub fn run_workflow<E: StepExecutor>(
    document: &Value,
    mut context: Context,
    executor: &mut E,
) -> Result<WorkflowRun> {
    let steps = workflow_steps(document)?;
    let on_error = OnError::from_document(document);
    let mut executed = Vec::with_capacity(steps.len());
    let mut failures = Vec::new();

    for step in &steps {
        let params = resolve_step_params(step, &context);
        tracing::info!(step = %step.id, service = %step.service, action = %step.action, "executing step");

        let output = match executor.execute(step, params) {
            Ok(output) => output,
            Err(err) if on_error == OnError::Continue => {
                tracing::warn!(step = %step.id, error = %err, "step failed, continuing");
                failures.push(StepFailure {
                    step: step.id.clone(),
                    message: err.to_string(),
                });
                Value::Null
            }
            Err(err) => return Err(err),
        };

        context.insert_step(step.id.clone(), output);
        executed.push(step.id.clone());
    }

    let outputs = document
        .get("outputs")
        .map(|template| resolve(template, &context))
        .unwrap_or(Value::Null);

    Ok(WorkflowRun {
        context,
        executed,
        failures,
        outputs,
    })
}
