//! `.0n` document model.
//!
//! Every document carries a `$0n` envelope naming its type and version:
//!
//! ```json
//! {
//!   "$0n": { "type": "workflow", "version": "1.0.0", "name": "Invoice" },
//!   "steps": [
//!     { "id": "charge", "service": "stripe", "action": "charge",
//!       "params": { "amount": "{{inputs.amount * 100}}" } }
//!   ]
//! }
//! ```
//!
//! This module validates envelopes, parses and creates documents, saves them
//! back to disk, and feeds workflow step parameters through the template
//! resolver.

mod model;
mod operations;
mod pipeline;
mod validation;


pub use model::{CreateOptions, DocumentType, ENVELOPE_KEY, ParsedDocument, Step, TYPES, VERSION};
pub use operations::{create, parse, parse_value, save, workflow_steps};
pub use pipeline::{StepExecutor, StepFailure, WorkflowRun, resolve_step_params, run_workflow};
pub use validation::{ValidationReport, is_document_file, validate, validate_directory, validate_file};
