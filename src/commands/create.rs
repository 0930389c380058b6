//! Implementation of the `dot0n create` command.

use super::{Marker, marked};
use crate::cli::CreateArgs;
use crate::document::{CreateOptions, DocumentType, create, save};
use crate::error::{Result, ZeronError};

/// Parse a document type argument into a user-facing error on failure.
pub(crate) fn parse_doc_type(raw: &str) -> Result<DocumentType> {
    raw.parse().map_err(ZeronError::UserError)
}

/// Execute the `dot0n create` command.
pub fn cmd_create(args: CreateArgs) -> Result<()> {
    let doc_type = parse_doc_type(&args.doc_type)?;
    let options = CreateOptions {
        name: args.name,
        description: args.description,
        service: args.service,
        ..Default::default()
    };
    let mut document = create(doc_type, &options);

    match args.output {
        Some(path) => {
            save(&mut document, &path)?;
            println!("{}", marked(Marker::Success, format!("Created {}", path.display())));
        }
        None => println!("{}", serde_json::to_string_pretty(&document)?),
    }

    Ok(())
}
