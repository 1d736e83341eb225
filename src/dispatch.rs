//! Executes an [`ActionPlan`] against the hosting API.
//!
//! Dispatch happens in two phases. [`PlanDispatcher::prepare`] gathers
//! repository context and drafts the comment without touching the pull
//! request; [`PlanDispatcher::apply`] then adds the label and, only once that
//! succeeded, posts the comment. A failed or timed-out context fetch or
//! generation therefore never leaves a label behind, and a failed label write
//! never produces a comment.

use std::future::Future;
use std::time::Duration;

use crate::ai::comment::{CommentContentService, CommentContext, finalise_comment};
use crate::github::models::PostedComment;
use crate::github::{IntakeError, PullRequestGateway, PullRequestLocator};
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};
use crate::triage::plan::{ActionPlan, CommentRequest, LabelName};

/// Default limit applied to each hosting or generation call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A label and finished comment body ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedComment {
    label: LabelName,
    locator: PullRequestLocator,
    body: String,
}

impl PreparedComment {
    /// Bundles a label, target pull request, and finished body.
    #[must_use]
    pub const fn new(label: LabelName, locator: PullRequestLocator, body: String) -> Self {
        Self {
            label,
            locator,
            body,
        }
    }

    /// Label that will be added.
    #[must_use]
    pub const fn label(&self) -> &LabelName {
        &self.label
    }

    /// Pull request that will be written to.
    #[must_use]
    pub const fn locator(&self) -> &PullRequestLocator {
        &self.locator
    }

    /// Markdown comment body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Outcome of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    label: LabelName,
    comment: PostedComment,
}

impl DispatchReport {
    /// Records a label write followed by a created comment.
    #[must_use]
    pub const fn new(label: LabelName, comment: PostedComment) -> Self {
        Self { label, comment }
    }

    /// Label that was added.
    #[must_use]
    pub const fn label(&self) -> &LabelName {
        &self.label
    }

    /// Comment that was created.
    #[must_use]
    pub const fn comment(&self) -> &PostedComment {
        &self.comment
    }
}

/// Runs action plans with a per-call time limit.
pub struct PlanDispatcher<'a, G: ?Sized, C: ?Sized> {
    gateway: &'a G,
    content: &'a C,
    telemetry: &'a dyn TelemetrySink,
    timeout: Duration,
}

impl<'a, G, C> PlanDispatcher<'a, G, C>
where
    G: PullRequestGateway + ?Sized,
    C: CommentContentService + ?Sized,
{
    /// Creates a dispatcher with [`DEFAULT_REQUEST_TIMEOUT`] and no telemetry.
    #[must_use]
    pub const fn new(gateway: &'a G, content: &'a C) -> Self {
        Self {
            gateway,
            content,
            telemetry: &NoopTelemetrySink,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Overrides the per-call time limit.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Records label and comment writes to `telemetry`.
    #[must_use]
    pub const fn with_telemetry(mut self, telemetry: &'a dyn TelemetrySink) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Gathers context and drafts the comment without writing anything.
    ///
    /// # Errors
    ///
    /// Returns the gateway error when repository context or the changed file
    /// list cannot be fetched, [`IntakeError::ContentGeneration`] or
    /// [`IntakeError::Configuration`] from the generator, or
    /// [`IntakeError::Timeout`] when any of these calls exceeds the limit.
    pub async fn prepare(&self, plan: ActionPlan) -> Result<PreparedComment, IntakeError> {
        let (label, request) = plan.into_parts();
        let context = self.comment_context(&request).await?;

        let generated = bounded(
            "generate comment",
            self.timeout,
            self.content.generate_comment(&request, &context),
        )
        .await?;
        let body = finalise_comment(&generated)?;

        Ok(PreparedComment::new(label, request.locator().clone(), body))
    }

    /// Adds the label, then posts the comment.
    ///
    /// # Errors
    ///
    /// Returns the label write error unchanged (nothing was written), or
    /// [`IntakeError::CommentAfterLabel`] when the comment fails after the
    /// label was added.
    pub async fn apply(&self, prepared: PreparedComment) -> Result<DispatchReport, IntakeError> {
        let PreparedComment {
            label,
            locator,
            body,
        } = prepared;
        let labels = [label.as_str().to_owned()];

        bounded(
            "add labels",
            self.timeout,
            self.gateway.add_labels(&locator, &labels),
        )
        .await?;
        tracing::info!(pull_request = %locator, label = %label, "label applied");
        self.telemetry.record(TelemetryEvent::LabelApplied {
            pull_request: locator.to_string(),
            label: label.to_string(),
        });

        let comment = bounded(
            "create comment",
            self.timeout,
            self.gateway.create_comment(&locator, &body),
        )
        .await
        .map_err(|error| {
            tracing::error!(pull_request = %locator, %error, "comment failed after label was applied");
            IntakeError::CommentAfterLabel {
                label: label.to_string(),
                message: error.to_string(),
            }
        })?;
        tracing::info!(pull_request = %locator, comment_id = comment.id, "comment posted");
        self.telemetry.record(TelemetryEvent::CommentPosted {
            pull_request: locator.to_string(),
            comment_id: comment.id,
        });

        Ok(DispatchReport::new(label, comment))
    }

    /// Prepares and applies `plan`.
    ///
    /// # Errors
    ///
    /// See [`Self::prepare`] and [`Self::apply`].
    pub async fn dispatch(&self, plan: ActionPlan) -> Result<DispatchReport, IntakeError> {
        let prepared = self.prepare(plan).await?;
        self.apply(prepared).await
    }

    async fn comment_context(
        &self,
        request: &CommentRequest,
    ) -> Result<CommentContext, IntakeError> {
        let repository = bounded(
            "fetch repository context",
            self.timeout,
            self.gateway.repository_context(request.repository()),
        )
        .await
        .inspect_err(|error| {
            tracing::error!(pull_request = %request.locator(), %error, "repository context unavailable");
        })?;

        let files = bounded(
            "list pull request files",
            self.timeout,
            self.gateway.pull_request_files(request.locator()),
        )
        .await
        .inspect_err(|error| {
            tracing::error!(pull_request = %request.locator(), %error, "changed files unavailable");
        })?;

        Ok(CommentContext::new(repository, files))
    }
}

/// Awaits `future`, failing with [`IntakeError::Timeout`] after `limit`.
///
/// # Errors
///
/// Returns the future's own error, or [`IntakeError::Timeout`].
pub(crate) async fn bounded<T, F>(
    operation: &'static str,
    limit: Duration,
    future: F,
) -> Result<T, IntakeError>
where
    F: Future<Output = Result<T, IntakeError>>,
{
    tokio::time::timeout(limit, future)
        .await
        .unwrap_or_else(|_elapsed| {
            tracing::warn!(operation, seconds = limit.as_secs(), "operation timed out");
            Err(IntakeError::Timeout {
                operation: operation.to_owned(),
                seconds: limit.as_secs(),
            })
        })
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
