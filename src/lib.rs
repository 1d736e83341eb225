//! Seedling library crate for beginner-friendly pull request triage.
//!
//! The library fetches a pull request through Octocrab, scores it with a
//! fixed set of heuristics, and, when the score clears the threshold, adds a
//! label and posts an explanatory comment. The decision engine in [`triage`]
//! is pure; all network access sits behind the [`PullRequestGateway`] and
//! [`CommentContentService`] traits.

pub mod ai;
pub mod analysis;
pub mod config;
pub mod dispatch;
pub mod github;
pub mod telemetry;
pub mod triage;

pub use ai::{CommentContentService, ContentSource, OpenAiCommentService, TemplateCommentService};
pub use analysis::{AnalysisOptions, AnalysisReport, DispatchOutcome, PullRequestAnalysis};
pub use config::SeedlingConfig;
pub use dispatch::{DispatchReport, PlanDispatcher, PreparedComment};
pub use github::{
    IntakeError, OctocrabGateway, PersonalAccessToken, PullRequestGateway, PullRequestLocator,
    RepositoryLocator,
};
pub use triage::{Decision, PullRequestSnapshot, Threshold, evaluate};
