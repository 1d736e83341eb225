//! Gateways for reading and writing pull requests through Octocrab.
//!
//! The trait-based design lets the dispatch layer and tests substitute a mock
//! while [`OctocrabGateway`] handles real HTTP requests.

mod client;
mod error_mapping;
mod pull_request;
#[cfg(test)]
pub(crate) mod test_support;

pub use pull_request::OctocrabGateway;

use async_trait::async_trait;

use crate::github::error::IntakeError;
use crate::github::locator::{PullRequestLocator, RepositoryLocator};
use crate::github::models::{ChangedFile, PostedComment, RepositoryContext};
use crate::triage::snapshot::PullRequestSnapshot;

/// Hosting API operations the triage pipeline depends on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// Fetch the pull request and normalise it into a snapshot.
    async fn pull_request_snapshot(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<PullRequestSnapshot, IntakeError>;

    /// Fetch repository description, language, and topics.
    async fn repository_context(
        &self,
        locator: &RepositoryLocator,
    ) -> Result<RepositoryContext, IntakeError>;

    /// Fetch the files changed by the pull request.
    async fn pull_request_files(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<ChangedFile>, IntakeError>;

    /// Add labels to the pull request's issue.
    async fn add_labels(
        &self,
        locator: &PullRequestLocator,
        labels: &[String],
    ) -> Result<(), IntakeError>;

    /// Post an issue comment on the pull request.
    async fn create_comment(
        &self,
        locator: &PullRequestLocator,
        body: &str,
    ) -> Result<PostedComment, IntakeError>;
}
