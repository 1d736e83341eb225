//! Interactive prompt for a pull request number.

use std::io::{BufRead, Write};

use seedling::IntakeError;
use seedling::github::PullRequestNumber;

use super::output::io_error;

/// Prompt written before reading a number.
pub const PROMPT: &str = "Enter PR number to analyze: ";

/// Asks for a pull request number.
///
/// Returns `Ok(None)` when the user enters nothing (or input is closed).
///
/// # Errors
///
/// Returns [`IntakeError::Io`] when reading or writing fails and
/// [`IntakeError::InvalidPullRequestNumber`] when the input is not a positive
/// integer.
pub fn read_pr_number<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<PullRequestNumber>, IntakeError> {
    write!(output, "{PROMPT}").map_err(|e| io_error(&e))?;
    output.flush().map_err(|e| io_error(&e))?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(|e| io_error(&e))?;

    let trimmed = line.trim().trim_start_matches('#');
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value = trimmed
        .parse::<u64>()
        .map_err(|_| IntakeError::InvalidPullRequestNumber)?;
    PullRequestNumber::new(value).map(Some)
}
