//! End-to-end analysis of one pull request.
//!
//! [`PullRequestAnalysis`] fetches the snapshot, evaluates it, records the
//! decision, and hands a qualifying plan to [`PlanDispatcher`]. In dry-run
//! mode the comment is drafted but nothing is written.

use std::time::Duration;

use crate::ai::comment::CommentContentService;
use crate::dispatch::{
    DEFAULT_REQUEST_TIMEOUT, DispatchReport, PlanDispatcher, PreparedComment, bounded,
};
use crate::github::{IntakeError, PullRequestGateway, PullRequestLocator};
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};
use crate::triage::decision::{Decision, Threshold, evaluate};
use crate::triage::plan::{ActionPlanner, LabelName};
use crate::triage::scoring::ScoreBreakdown;
use crate::triage::snapshot::PullRequestSnapshot;

/// Settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Minimum qualifying score.
    pub threshold: Threshold,
    /// Label applied to qualifying pull requests.
    pub label: LabelName,
    /// Limit for each hosting or generation call.
    pub request_timeout: Duration,
    /// Draft the comment without writing anything.
    pub dry_run: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            threshold: Threshold::DEFAULT,
            label: LabelName::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            dry_run: false,
        }
    }
}

/// What happened after the decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The pull request did not qualify.
    NotAttempted,
    /// Dry run: the comment that would have been posted.
    Preview(PreparedComment),
    /// Label added and comment posted.
    Applied(DispatchReport),
}

/// Result of analysing one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    /// Normalised pull request data.
    pub snapshot: PullRequestSnapshot,
    /// Skip, qualify, or not-qualify decision.
    pub decision: Decision,
    /// Writes performed (or previewed).
    pub outcome: DispatchOutcome,
}

/// Runs the triage pipeline against a hosting gateway.
pub struct PullRequestAnalysis<'a, G: ?Sized, C: ?Sized> {
    gateway: &'a G,
    content: &'a C,
    telemetry: &'a dyn TelemetrySink,
    options: AnalysisOptions,
}

impl<'a, G, C> PullRequestAnalysis<'a, G, C>
where
    G: PullRequestGateway + ?Sized,
    C: CommentContentService + ?Sized,
{
    /// Creates an analysis without telemetry.
    #[must_use]
    pub const fn new(gateway: &'a G, content: &'a C, options: AnalysisOptions) -> Self {
        Self {
            gateway,
            content,
            telemetry: &NoopTelemetrySink,
            options,
        }
    }

    /// Records decisions and writes to `telemetry`.
    #[must_use]
    pub const fn with_telemetry(mut self, telemetry: &'a dyn TelemetrySink) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Analyses the pull request at `locator`.
    ///
    /// # Errors
    ///
    /// Returns hosting errors from fetching the snapshot, or any error from
    /// [`PlanDispatcher::prepare`] and [`PlanDispatcher::apply`].
    pub async fn analyse(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<AnalysisReport, IntakeError> {
        let snapshot = bounded(
            "fetch pull request",
            self.options.request_timeout,
            self.gateway.pull_request_snapshot(locator),
        )
        .await?;

        let decision = evaluate(&snapshot, self.options.threshold);
        let score = decision.breakdown().map(ScoreBreakdown::total);
        tracing::info!(
            pull_request = %locator,
            decision = decision.kind(),
            score,
            threshold = self.options.threshold.get(),
            "pull request evaluated"
        );
        self.telemetry.record(TelemetryEvent::DecisionRecorded {
            pull_request: locator.to_string(),
            decision: decision.kind().to_owned(),
            score,
            threshold: self.options.threshold.get(),
        });

        let planner = ActionPlanner::new(
            locator.repository_locator().clone(),
            self.options.label.clone(),
        );
        let Some(plan) = planner.plan(&decision, &snapshot) else {
            return Ok(AnalysisReport {
                snapshot,
                decision,
                outcome: DispatchOutcome::NotAttempted,
            });
        };

        let dispatcher = PlanDispatcher::new(self.gateway, self.content)
            .with_timeout(self.options.request_timeout)
            .with_telemetry(self.telemetry);
        let outcome = if self.options.dry_run {
            tracing::info!(pull_request = %locator, "dry run: skipping label and comment writes");
            DispatchOutcome::Preview(dispatcher.prepare(plan).await?)
        } else {
            DispatchOutcome::Applied(dispatcher.dispatch(plan).await?)
        };

        Ok(AnalysisReport {
            snapshot,
            decision,
            outcome,
        })
    }
}

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod tests;
