//! CLI handlers.
//!
//! - [`analyse`]: Resolve the pull request, run the analysis, print a summary
//! - [`prompt`]: Interactive pull request number prompt
//!
//! Output formatting utilities are in [`output`].

pub mod analyse;
pub mod output;
pub mod prompt;
