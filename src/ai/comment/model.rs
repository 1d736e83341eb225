//! Shared domain models for generating the explanatory comment.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::github::models::{ChangedFile, RepositoryContext};

/// First line of every generated comment.
pub const COMMENT_HEADING: &str = "## Beginner-Friendly PR";

/// Sentence that follows the heading.
pub const COMMENT_INTRO: &str = "This pull request has been automatically labeled as \
`beginner-friendly` based on its characteristics.";

/// Section headings every comment body carries, in order.
pub const SECTION_HEADINGS: [&str; 7] = [
    "Summary",
    "Project Context",
    "Technical Details",
    "Code Changes Analysis",
    "Why This is Beginner-Friendly",
    "Review Checklist",
    "Additional Resources",
];

/// Attribution appended below a horizontal rule at the end of every comment.
pub const ATTRIBUTION_FOOTER: &str =
    "*This label was added automatically. Maintainers can remove it if they disagree.*";

/// Which generator drafts the comment body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentSource {
    /// Deterministic built-in (or user-supplied) template.
    #[default]
    Template,
    /// OpenAI-compatible chat completions endpoint.
    Ai,
}

impl ContentSource {
    /// Configuration value for this source.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Ai => "ai",
        }
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// Parse error for [`ContentSource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported comment source '{value}': valid options are 'template' or 'ai'")]
pub struct ContentSourceParseError {
    value: String,
}

impl FromStr for ContentSource {
    type Err = ContentSourceParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "template" => Ok(Self::Template),
            "ai" => Ok(Self::Ai),
            _ => Err(ContentSourceParseError {
                value: value.to_owned(),
            }),
        }
    }
}

/// Repository facts fetched at dispatch time to inform the comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentContext {
    repository: RepositoryContext,
    files: Vec<ChangedFile>,
}

impl CommentContext {
    /// Bundles repository metadata and the changed file list.
    #[must_use]
    pub const fn new(repository: RepositoryContext, files: Vec<ChangedFile>) -> Self {
        Self { repository, files }
    }

    /// Repository description, language, and topics.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryContext {
        &self.repository
    }

    /// Files changed by the pull request.
    #[must_use]
    pub fn files(&self) -> &[ChangedFile] {
        &self.files
    }
}
