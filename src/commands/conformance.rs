//! Implementation of the `dot0n test` command.
//!
//! Every `.0n` document under the conformance directory is expected to be
//! valid; each one is reported as PASS or FAIL.

use super::{Marker, detail, marked};
use crate::cli::TestArgs;
use crate::document::{ValidationReport, validate_directory};
use crate::error::{Result, ZeronError};

/// Render PASS/FAIL lines, returning `(lines, passed, failed)`.
pub(crate) fn render_conformance(reports: &[ValidationReport]) -> (Vec<String>, usize, usize) {
    let mut lines = Vec::new();
    let (mut passed, mut failed) = (0, 0);

    for report in reports {
        let name = report
            .file
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if report.valid {
            lines.push(marked(Marker::Success, format!("PASS: {}", name)));
            passed += 1;
        } else {
            lines.push(marked(Marker::Error, format!("FAIL: {}", name)));
            lines.extend(report.errors.iter().map(detail));
            failed += 1;
        }
    }

    (lines, passed, failed)
}

/// Execute the `dot0n test` command.
pub fn cmd_test(args: TestArgs) -> Result<()> {
    println!("{}", marked(Marker::Info, "Running conformance tests..."));

    if !args.dir.is_dir() {
        println!(
            "{}",
            marked(
                Marker::Warn,
                format!("No conformance directory found at {}", args.dir.display())
            )
        );
        return Ok(());
    }

    let reports = validate_directory(&args.dir)?;
    let (lines, passed, failed) = render_conformance(&reports);
    for line in lines {
        println!("{}", line);
    }
    println!();
    println!("Tests: {} passed, {} failed", passed, failed);

    if failed > 0 {
        return Err(ZeronError::ValidationFailed(format!(
            "{} conformance test(s) failed",
            failed
        )));
    }

    Ok(())
}
