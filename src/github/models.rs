//! Data models for pull request facts and repository context.
//!
//! `Api*` types mirror the GitHub REST payloads and stay private to the
//! `github` module; conversions into the public types validate and normalise
//! the fields the triage engine relies on.

use serde::{Deserialize, Serialize};

use super::error::IntakeError;
use crate::triage::snapshot::PullRequestSnapshot;

/// Repository metadata used to give the generated comment project context.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RepositoryContext {
    /// `owner/repo` as reported by GitHub.
    pub full_name: Option<String>,
    /// Repository description.
    pub description: Option<String>,
    /// Primary language detected by GitHub.
    pub language: Option<String>,
    /// Repository topics.
    pub topics: Vec<String>,
    /// HTML URL of the repository.
    pub html_url: Option<String>,
}

/// A file touched by the pull request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ChangedFile {
    /// Path relative to the repository root.
    pub path: String,
    /// Change status (`added`, `modified`, `removed`, `renamed`, ...).
    pub status: String,
    /// Lines added in this file.
    pub additions: u64,
    /// Lines removed in this file.
    pub deletions: u64,
}

/// A comment created on the pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedComment {
    /// Comment identifier.
    pub id: u64,
    /// HTML URL for displaying to a user.
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequest {
    pub(super) number: u64,
    pub(super) title: Option<String>,
    pub(super) body: Option<String>,
    pub(super) draft: Option<bool>,
    pub(super) user: Option<ApiUser>,
    pub(super) additions: Option<i64>,
    pub(super) deletions: Option<i64>,
    pub(super) changed_files: Option<i64>,
    pub(super) commits: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiRepository {
    pub(super) full_name: Option<String>,
    pub(super) description: Option<String>,
    pub(super) language: Option<String>,
    #[serde(default)]
    pub(super) topics: Vec<String>,
    pub(super) html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequestFile {
    pub(super) filename: String,
    pub(super) status: Option<String>,
    #[serde(default)]
    pub(super) additions: u64,
    #[serde(default)]
    pub(super) deletions: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiComment {
    pub(super) id: u64,
    pub(super) html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiLabel {
    pub(super) name: String,
}

impl TryFrom<ApiPullRequest> for PullRequestSnapshot {
    type Error = IntakeError;

    /// Diff counters are required: a payload without them cannot be scored
    /// and is rejected rather than defaulted to zero.
    fn try_from(value: ApiPullRequest) -> Result<Self, Self::Error> {
        Self::builder(value.number)
            .title(value.title.unwrap_or_default())
            .body(value.body.unwrap_or_default())
            .draft(value.draft.unwrap_or(false))
            .author(value.user.and_then(|user| user.login).unwrap_or_default())
            .lines(
                required("additions", value.additions)?,
                required("deletions", value.deletions)?,
            )
            .changed_files(required("changed_files", value.changed_files)?)
            .commits(required("commits", value.commits)?)
            .build()
    }
}

fn required(field: &str, value: Option<i64>) -> Result<i64, IntakeError> {
    value.ok_or_else(|| IntakeError::InvalidSnapshot {
        field: field.to_owned(),
        message: "is missing from the GitHub response".to_owned(),
    })
}

impl From<ApiRepository> for RepositoryContext {
    fn from(value: ApiRepository) -> Self {
        Self {
            full_name: value.full_name,
            description: value.description,
            language: value.language,
            topics: value.topics,
            html_url: value.html_url,
        }
    }
}

impl From<ApiPullRequestFile> for ChangedFile {
    fn from(value: ApiPullRequestFile) -> Self {
        Self {
            path: value.filename,
            status: value.status.unwrap_or_else(|| "modified".to_owned()),
            additions: value.additions,
            deletions: value.deletions,
        }
    }
}

impl From<ApiComment> for PostedComment {
    fn from(value: ApiComment) -> Self {
        Self {
            id: value.id,
            html_url: value.html_url,
        }
    }
}
