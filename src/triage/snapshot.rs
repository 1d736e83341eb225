//! Normalised pull request facts the heuristics are evaluated against.
//!
//! A [`PullRequestSnapshot`] is built once per analysis and never mutated.
//! Construction goes through [`SnapshotBuilder`], which accepts the signed
//! counters a hosting platform might report and rejects anything that cannot
//! describe a real pull request.

use crate::github::error::IntakeError;
use crate::github::locator::PullRequestNumber;

/// Immutable view of a pull request's metadata and diff statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSnapshot {
    number: PullRequestNumber,
    title: String,
    body: String,
    is_draft: bool,
    author_login: String,
    additions: u64,
    deletions: u64,
    changed_files: u64,
    commit_count: u64,
}

impl PullRequestSnapshot {
    /// Starts building a snapshot for the given pull request number.
    #[must_use]
    pub fn builder(number: u64) -> SnapshotBuilder {
        SnapshotBuilder::new(number)
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    /// Pull request title.
    #[must_use]
    pub const fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Pull request description; empty when the author left none.
    #[must_use]
    pub const fn body(&self) -> &str {
        self.body.as_str()
    }

    /// Whether the pull request is marked as a draft.
    #[must_use]
    pub const fn is_draft(&self) -> bool {
        self.is_draft
    }

    /// Login of the pull request author.
    #[must_use]
    pub const fn author_login(&self) -> &str {
        self.author_login.as_str()
    }

    /// Lines added across the diff.
    #[must_use]
    pub const fn additions(&self) -> u64 {
        self.additions
    }

    /// Lines removed across the diff.
    #[must_use]
    pub const fn deletions(&self) -> u64 {
        self.deletions
    }

    /// Number of files touched by the diff.
    #[must_use]
    pub const fn changed_files(&self) -> u64 {
        self.changed_files
    }

    /// Number of commits on the pull request branch.
    #[must_use]
    pub const fn commit_count(&self) -> u64 {
        self.commit_count
    }

    /// Total changed lines (additions plus deletions).
    #[must_use]
    pub const fn changed_lines(&self) -> u64 {
        self.additions.saturating_add(self.deletions)
    }
}

/// Builder that validates raw pull request fields.
///
/// Counters are accepted as signed integers so that malformed upstream data
/// is rejected with [`IntakeError::InvalidSnapshot`] instead of wrapping.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    number: u64,
    title: String,
    body: String,
    is_draft: bool,
    author_login: String,
    additions: i64,
    deletions: i64,
    changed_files: i64,
    commit_count: i64,
}

impl SnapshotBuilder {
    fn new(number: u64) -> Self {
        Self {
            number,
            ..Self::default()
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the description body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Marks the pull request as a draft (or not).
    #[must_use]
    pub const fn draft(mut self, is_draft: bool) -> Self {
        self.is_draft = is_draft;
        self
    }

    /// Sets the author login.
    #[must_use]
    pub fn author(mut self, login: impl Into<String>) -> Self {
        self.author_login = login.into();
        self
    }

    /// Sets the added and removed line counts.
    #[must_use]
    pub const fn lines(mut self, additions: i64, deletions: i64) -> Self {
        self.additions = additions;
        self.deletions = deletions;
        self
    }

    /// Sets the number of changed files.
    #[must_use]
    pub const fn changed_files(mut self, changed_files: i64) -> Self {
        self.changed_files = changed_files;
        self
    }

    /// Sets the number of commits.
    #[must_use]
    pub const fn commits(mut self, commit_count: i64) -> Self {
        self.commit_count = commit_count;
        self
    }

    /// Validates the collected fields and produces a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::InvalidSnapshot`] when the number is zero or any
    /// counter is negative.
    pub fn build(self) -> Result<PullRequestSnapshot, IntakeError> {
        let number = PullRequestNumber::new(self.number)
            .map_err(|_| invalid("number", "must be positive"))?;

        Ok(PullRequestSnapshot {
            number,
            title: self.title,
            body: self.body,
            is_draft: self.is_draft,
            author_login: self.author_login,
            additions: non_negative("additions", self.additions)?,
            deletions: non_negative("deletions", self.deletions)?,
            changed_files: non_negative("changed_files", self.changed_files)?,
            commit_count: non_negative("commits", self.commit_count)?,
        })
    }
}

fn non_negative(field: &str, value: i64) -> Result<u64, IntakeError> {
    u64::try_from(value)
        .map_err(|_| invalid(field, &format!("must not be negative (got {value})")))
}

fn invalid(field: &str, message: &str) -> IntakeError {
    IntakeError::InvalidSnapshot {
        field: field.to_owned(),
        message: message.to_owned(),
    }
}
