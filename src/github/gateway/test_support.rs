//! Test-support gateway that can hang on a chosen read.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::github::error::IntakeError;
use crate::github::locator::{PullRequestLocator, RepositoryLocator};
use crate::github::models::{ChangedFile, PostedComment, RepositoryContext};
use crate::triage::snapshot::PullRequestSnapshot;

use super::PullRequestGateway;

/// How long a stalled call sleeps; far beyond any timeout used in tests.
pub(crate) const STALL: Duration = Duration::from_secs(600);

/// Read operation that never answers in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StalledCall {
    Snapshot,
    RepositoryContext,
    Files,
}

/// Gateway serving one snapshot and counting every write it receives.
pub(crate) struct StallingGateway {
    snapshot: PullRequestSnapshot,
    stalled: Option<StalledCall>,
    writes: AtomicUsize,
}

impl StallingGateway {
    #[must_use]
    pub(crate) const fn new(snapshot: PullRequestSnapshot) -> Self {
        Self {
            snapshot,
            stalled: None,
            writes: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub(crate) const fn stalling(mut self, call: StalledCall) -> Self {
        self.stalled = Some(call);
        self
    }

    /// Number of label and comment writes attempted so far.
    #[must_use]
    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    async fn pause_if(&self, call: StalledCall) {
        if self.stalled == Some(call) {
            tokio::time::sleep(STALL).await;
        }
    }
}

#[async_trait]
impl PullRequestGateway for StallingGateway {
    async fn pull_request_snapshot(
        &self,
        _locator: &PullRequestLocator,
    ) -> Result<PullRequestSnapshot, IntakeError> {
        self.pause_if(StalledCall::Snapshot).await;
        Ok(self.snapshot.clone())
    }

    async fn repository_context(
        &self,
        _locator: &RepositoryLocator,
    ) -> Result<RepositoryContext, IntakeError> {
        self.pause_if(StalledCall::RepositoryContext).await;
        Ok(RepositoryContext::default())
    }

    async fn pull_request_files(
        &self,
        _locator: &PullRequestLocator,
    ) -> Result<Vec<ChangedFile>, IntakeError> {
        self.pause_if(StalledCall::Files).await;
        Ok(Vec::new())
    }

    async fn add_labels(
        &self,
        _locator: &PullRequestLocator,
        _labels: &[String],
    ) -> Result<(), IntakeError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn create_comment(
        &self,
        _locator: &PullRequestLocator,
        _body: &str,
    ) -> Result<PostedComment, IntakeError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(PostedComment {
            id: 1,
            html_url: None,
        })
    }
}
