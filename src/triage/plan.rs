//! Turns a qualifying decision into a data-only action plan.
//!
//! The plan names the label to add and carries everything the comment
//! generator needs. Executing it is the job of [`crate::dispatch`], which adds
//! the label first and only then posts the comment.

use std::fmt;

use crate::github::error::IntakeError;
use crate::github::locator::{PullRequestLocator, RepositoryLocator};

use super::decision::Decision;
use super::scoring::ScoreBreakdown;
use super::snapshot::PullRequestSnapshot;

/// Label applied to qualifying pull requests unless configured otherwise.
pub const DEFAULT_LABEL: &str = "beginner-friendly";

/// Non-blank label text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelName(String);

impl LabelName {
    /// Validates and trims a label.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Configuration`] when the label is blank.
    pub fn new(value: impl AsRef<str>) -> Result<Self, IntakeError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IntakeError::Configuration {
                message: "label must not be blank".to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the label text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for LabelName {
    fn default() -> Self {
        Self(DEFAULT_LABEL.to_owned())
    }
}

impl fmt::Display for LabelName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Input handed to the comment content generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRequest {
    locator: PullRequestLocator,
    breakdown: ScoreBreakdown,
    snapshot: PullRequestSnapshot,
}

impl CommentRequest {
    /// Target pull request (repository plus number).
    #[must_use]
    pub const fn locator(&self) -> &PullRequestLocator {
        &self.locator
    }

    /// Repository the pull request belongs to.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryLocator {
        self.locator.repository_locator()
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.locator.number().get()
    }

    /// Score breakdown that qualified the pull request.
    #[must_use]
    pub const fn breakdown(&self) -> &ScoreBreakdown {
        &self.breakdown
    }

    /// Snapshot the decision was made from.
    #[must_use]
    pub const fn snapshot(&self) -> &PullRequestSnapshot {
        &self.snapshot
    }
}

/// Writes to perform for a qualifying pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPlan {
    label: LabelName,
    comment: CommentRequest,
}

impl ActionPlan {
    /// Label to add.
    #[must_use]
    pub const fn label(&self) -> &LabelName {
        &self.label
    }

    /// Comment generation request.
    #[must_use]
    pub const fn comment(&self) -> &CommentRequest {
        &self.comment
    }

    /// Splits the plan into its label and comment request.
    #[must_use]
    pub fn into_parts(self) -> (LabelName, CommentRequest) {
        (self.label, self.comment)
    }
}

/// Builds action plans for one repository.
#[derive(Debug, Clone)]
pub struct ActionPlanner {
    repository: RepositoryLocator,
    label: LabelName,
}

impl ActionPlanner {
    /// Creates a planner that labels pull requests in `repository`.
    #[must_use]
    pub const fn new(repository: RepositoryLocator, label: LabelName) -> Self {
        Self { repository, label }
    }

    /// Returns a plan for qualified decisions and `None` otherwise.
    #[must_use]
    pub fn plan(
        &self,
        decision: &Decision,
        snapshot: &PullRequestSnapshot,
    ) -> Option<ActionPlan> {
        let Decision::Qualified { breakdown, .. } = decision else {
            return None;
        };

        Some(ActionPlan {
            label: self.label.clone(),
            comment: CommentRequest {
                locator: PullRequestLocator::new(self.repository.clone(), snapshot.number()),
                breakdown: breakdown.clone(),
                snapshot: snapshot.clone(),
            },
        })
    }
}
