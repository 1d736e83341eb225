//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use seedling::{AnalysisReport, Decision, DispatchOutcome, IntakeError, PullRequestLocator};

/// Message written when the prompt receives no number.
pub const NO_PR_MESSAGE: &str = "No PR number entered. Exiting.";

/// Message written when a guard clause stops the analysis.
pub const SKIPPED_MESSAGE: &str = "PR is not ready for analysis. Skipping.";

/// Message written when the score falls short of the threshold.
pub const BELOW_THRESHOLD_MESSAGE: &str =
    "Score below threshold. Not suitable for beginner-friendly label.";

/// Writes the analysis summary to stdout.
pub fn write_analysis_summary(
    locator: &PullRequestLocator,
    report: &AnalysisReport,
) -> Result<(), IntakeError> {
    let mut stdout = io::stdout().lock();
    write_analysis_summary_to(&mut stdout, locator, report)
}

/// Writes score, triggered rules, decision, and writes performed.
pub fn write_analysis_summary_to<W: Write>(
    writer: &mut W,
    locator: &PullRequestLocator,
    report: &AnalysisReport,
) -> Result<(), IntakeError> {
    let snapshot = &report.snapshot;
    writeln!(
        writer,
        "Analysed {locator}: \"{}\" by @{}",
        snapshot.title(),
        snapshot.author_login()
    )
    .map_err(|e| io_error(&e))?;

    match &report.decision {
        Decision::Skipped { reason } => {
            writeln!(writer, "Decision: skipped ({reason})").map_err(|e| io_error(&e))?;
            writeln!(writer, "{SKIPPED_MESSAGE}").map_err(|e| io_error(&e))?;
        }
        Decision::NotQualified {
            breakdown,
            threshold,
        }
        | Decision::Qualified {
            breakdown,
            threshold,
        } => {
            writeln!(writer, "Score: {} (threshold {threshold})", breakdown.total())
                .map_err(|e| io_error(&e))?;
            if breakdown.reasons().is_empty() {
                writeln!(writer, "Triggered rules: none").map_err(|e| io_error(&e))?;
            } else {
                writeln!(writer, "Triggered rules:").map_err(|e| io_error(&e))?;
                for reason in breakdown.reasons() {
                    writeln!(writer, "  - {} (+{})", reason.label(), reason.points())
                        .map_err(|e| io_error(&e))?;
                }
            }
            if report.decision.is_qualified() {
                writeln!(writer, "Decision: qualified").map_err(|e| io_error(&e))?;
            } else {
                writeln!(writer, "Decision: not qualified").map_err(|e| io_error(&e))?;
                writeln!(writer, "{BELOW_THRESHOLD_MESSAGE}").map_err(|e| io_error(&e))?;
            }
        }
    }

    write_outcome(writer, &report.outcome)
}

fn write_outcome<W: Write>(writer: &mut W, outcome: &DispatchOutcome) -> Result<(), IntakeError> {
    match outcome {
        DispatchOutcome::NotAttempted => {
            writeln!(writer, "No label or comment was written.").map_err(|e| io_error(&e))
        }
        DispatchOutcome::Preview(prepared) => {
            writeln!(
                writer,
                "Dry run: would add label '{}' and post this comment:",
                prepared.label()
            )
            .map_err(|e| io_error(&e))?;
            writeln!(writer).map_err(|e| io_error(&e))?;
            write!(writer, "{}", prepared.body()).map_err(|e| io_error(&e))
        }
        DispatchOutcome::Applied(report) => {
            writeln!(writer, "Label '{}' added.", report.label()).map_err(|e| io_error(&e))?;
            let comment = report.comment();
            match comment.html_url.as_deref() {
                Some(url) => writeln!(writer, "Comment posted: {url}"),
                None => writeln!(writer, "Comment posted (id {}).", comment.id),
            }
            .map_err(|e| io_error(&e))
        }
    }
}

/// Writes a single line to the given writer.
pub fn write_line<W: Write>(writer: &mut W, message: &str) -> Result<(), IntakeError> {
    writeln!(writer, "{message}").map_err(|e| io_error(&e))
}

/// Converts an I/O error into an [`IntakeError::Io`].
pub fn io_error(error: &io::Error) -> IntakeError {
    IntakeError::Io {
        message: error.to_string(),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
