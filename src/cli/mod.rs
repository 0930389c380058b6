//! CLI argument parsing for dot0n.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// dot0n: validate, store, and resolve `.0n` configuration documents.
///
/// Documents are JSON files with a `$0n` envelope:
/// - connections describe how to reach a service
/// - workflows chain service actions whose parameters use `{{...}}` templates
/// - snapshots capture a deployable set of components
#[derive(Parser, Debug)]
#[command(name = "dot0n")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). Overrides RUST_LOG.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse arguments from the process command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for dot0n.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a document or every document under a directory.
    ///
    /// Directories are walked recursively; hidden directories are skipped and
    /// only `.0n` / `.0n.json` files are checked.
    Validate(ValidateArgs),

    /// Run conformance tests over a directory of sample documents.
    Test(TestArgs),

    /// Initialize the `~/.0n/` store.
    ///
    /// Creates the type directories and a default `config.json`. Safe to run
    /// more than once.
    Init,

    /// Print (or write) a skeleton document of the given type.
    Create(CreateArgs),

    /// List stored documents of the given type.
    List(ListArgs),

    /// Resolve `{{...}}` templates in a JSON file.
    ///
    /// The process environment is available as `env`, inputs as `inputs`,
    /// and step outputs by step id.
    Resolve(ResolveArgs),
}

/// Arguments for the `validate` command.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// File or directory to validate.
    pub path: PathBuf,
}

/// Arguments for the `test` command.
#[derive(Parser, Debug)]
pub struct TestArgs {
    /// Directory of sample documents.
    #[arg(default_value = "conformance")]
    pub dir: PathBuf,
}

/// Arguments for the `create` command.
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Document type (connection, workflow, snapshot, config, execution).
    pub doc_type: String,

    /// Document name.
    #[arg(long)]
    pub name: Option<String>,

    /// Document description.
    #[arg(long)]
    pub description: Option<String>,

    /// Service name (connections).
    #[arg(long)]
    pub service: Option<String>,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `list` command.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Document type to list.
    pub doc_type: String,
}

/// Arguments for the `resolve` command.
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// JSON template file.
    pub file: PathBuf,

    /// Inputs as a JSON object.
    #[arg(long)]
    pub inputs: Option<String>,

    /// Individual inputs as key=value; values are parsed as JSON when
    /// possible, otherwise taken as strings.
    #[arg(long = "input", value_name = "KEY=VALUE")]
    pub input: Vec<String>,

    /// Step outputs as a JSON object keyed by step id.
    #[arg(long)]
    pub steps: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_validate() {
        let cli = Cli::try_parse_from(["dot0n", "validate", "flows/"]).unwrap();
        match cli.command {
            Command::Validate(args) => assert_eq!(args.path, PathBuf::from("flows/")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_dir_has_default() {
        let cli = Cli::try_parse_from(["dot0n", "test"]).unwrap();
        match cli.command {
            Command::Test(args) => assert_eq!(args.dir, PathBuf::from("conformance")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_repeated_inputs_and_verbosity() {
        let cli = Cli::try_parse_from([
            "dot0n", "-vv", "resolve", "t.json", "--input", "a=1", "--input", "b=x",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Resolve(args) => assert_eq!(args.input, vec!["a=1", "b=x"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn validate_requires_path() {
        assert!(Cli::try_parse_from(["dot0n", "validate"]).is_err());
    }
}
