//! Implementation of the `dot0n list` command.

use super::create::parse_doc_type;
use crate::cli::ListArgs;
use crate::error::Result;
use crate::store::Store;

/// Execute the `dot0n list` command.
pub fn cmd_list(args: ListArgs) -> Result<()> {
    let doc_type = parse_doc_type(&args.doc_type)?;
    let store = Store::locate()?;
    let documents = store.list(doc_type)?;

    if documents.is_empty() {
        println!("No {} documents in {}.", doc_type, store.type_dir(doc_type).display());
        return Ok(());
    }

    println!("{} ({}):", doc_type.dir_name(), documents.len());
    for listed in &documents {
        let name = listed.document.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("-");
        println!("  {:<32} {:<24} v{}", listed.file, name, listed.document.version);
    }

    Ok(())
}
