//! Octocrab implementation of the pull request gateway.

use async_trait::async_trait;
use octocrab::{Octocrab, Page};
use serde::Serialize;
use tracing::debug;

use crate::github::error::IntakeError;
use crate::github::locator::{PersonalAccessToken, PullRequestLocator, RepositoryLocator};
use crate::github::models::{
    ApiComment, ApiLabel, ApiPullRequest, ApiPullRequestFile, ApiRepository, ChangedFile,
    PostedComment, RepositoryContext,
};
use crate::triage::snapshot::PullRequestSnapshot;

use super::PullRequestGateway;
use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;

/// Octocrab-backed gateway.
pub struct OctocrabGateway {
    client: Octocrab,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and repository.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidUrl` when the base URI cannot be parsed or
    /// `IntakeError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &RepositoryLocator,
    ) -> Result<Self, IntakeError> {
        let octocrab = build_octocrab_client(token, locator.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }
}

#[derive(Serialize)]
struct LabelsPayload<'a> {
    labels: &'a [String],
}

#[derive(Serialize)]
struct CommentPayload<'a> {
    body: &'a str,
}

#[async_trait]
impl PullRequestGateway for OctocrabGateway {
    async fn pull_request_snapshot(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<PullRequestSnapshot, IntakeError> {
        let api = self
            .client
            .get::<ApiPullRequest, _, _>(locator.pull_request_path(), None::<&()>)
            .await
            .map_err(|error| map_octocrab_error("pull request", &error))?;

        PullRequestSnapshot::try_from(api)
    }

    async fn repository_context(
        &self,
        locator: &RepositoryLocator,
    ) -> Result<RepositoryContext, IntakeError> {
        self.client
            .get::<ApiRepository, _, _>(locator.repository_path(), None::<&()>)
            .await
            .map(ApiRepository::into)
            .map_err(|error| map_octocrab_error("repository", &error))
    }

    async fn pull_request_files(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<ChangedFile>, IntakeError> {
        let page = self
            .client
            .get::<Page<ApiPullRequestFile>, _, _>(locator.files_path(), None::<&()>)
            .await
            .map_err(|error| map_octocrab_error("pull request files", &error))?;

        self.client
            .all_pages(page)
            .await
            .map(|files| files.into_iter().map(ApiPullRequestFile::into).collect())
            .map_err(|error| map_octocrab_error("pull request files", &error))
    }

    async fn add_labels(
        &self,
        locator: &PullRequestLocator,
        labels: &[String],
    ) -> Result<(), IntakeError> {
        let applied = self
            .client
            .post::<_, Vec<ApiLabel>>(locator.labels_path(), Some(&LabelsPayload { labels }))
            .await
            .map_err(|error| map_octocrab_error("add label", &error))?;

        debug!(
            pull_request = %locator,
            labels = ?applied.iter().map(|label| label.name.as_str()).collect::<Vec<_>>(),
            "labels now on pull request"
        );
        Ok(())
    }

    async fn create_comment(
        &self,
        locator: &PullRequestLocator,
        body: &str,
    ) -> Result<PostedComment, IntakeError> {
        self.client
            .post::<_, ApiComment>(locator.comments_path(), Some(&CommentPayload { body }))
            .await
            .map(ApiComment::into)
            .map_err(|error| map_octocrab_error("create comment", &error))
    }
}
