//! Implementation of the `dot0n validate` command.

use super::{Marker, detail, marked};
use crate::cli::ValidateArgs;
use crate::document::{ValidationReport, validate_directory, validate_file};
use crate::error::{Result, ZeronError};

/// Valid/invalid counts for a batch of reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Tally {
    pub valid: usize,
    pub invalid: usize,
}

/// Render reports as output lines and count the outcomes.
pub(crate) fn render_reports(reports: &[ValidationReport]) -> (Vec<String>, Tally) {
    let mut lines = Vec::new();
    let mut tally = Tally::default();

    for report in reports {
        let file = report
            .file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<document>".to_string());

        if report.valid {
            lines.push(marked(Marker::Success, &file));
            tally.valid += 1;
        } else {
            lines.push(marked(Marker::Error, &file));
            lines.extend(report.errors.iter().map(detail));
            tally.invalid += 1;
        }
        lines.extend(report.warnings.iter().map(|w| detail(format!("warning: {}", w))));
    }

    (lines, tally)
}

/// Execute the `dot0n validate` command.
///
/// # Exit Codes
///
/// - 0: Every document is valid
/// - 1: Path does not exist
/// - 2: At least one document is invalid
pub fn cmd_validate(args: ValidateArgs) -> Result<()> {
    let path = std::path::absolute(&args.path).unwrap_or(args.path.clone());

    if !path.exists() {
        return Err(ZeronError::UserError(format!(
            "path not found: {}",
            path.display()
        )));
    }

    let reports = if path.is_dir() {
        println!("{}", marked(Marker::Info, format!("Validating directory: {}", path.display())));
        validate_directory(&path)?
    } else {
        vec![validate_file(&path)]
    };

    let (lines, tally) = render_reports(&reports);
    println!();
    for line in lines {
        println!("{}", line);
    }
    println!();
    println!("Results: {} valid, {} invalid", tally.valid, tally.invalid);

    if tally.invalid > 0 {
        return Err(ZeronError::ValidationFailed(format!(
            "{} of {} documents invalid",
            tally.invalid,
            reports.len()
        )));
    }

    Ok(())
}
