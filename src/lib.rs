//! dot0n: validator, store, and template resolver for `.0n` configuration
//! documents.
//!
//! The heart of the crate is [`resolve`], which substitutes `{{expression}}`
//! placeholders in JSON-shaped templates against a runtime context of
//! inputs, step outputs, and environment variables. Around it sit document
//! validation ([`document`]), the per-user store ([`store`]), and the CLI.

pub mod cli;
pub mod commands;
pub mod document;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod resolve;
pub mod settings;
pub mod store;

pub use error::{Result, ZeronError};
pub use resolve::{Context, deep_get, evaluate_expression, resolve};
