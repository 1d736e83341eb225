//! Heuristic decision engine for beginner-friendly triage.
//!
//! The engine is pure and synchronous: [`evaluate`] runs the guard clauses,
//! scores the snapshot against the [`RULEBOOK`], and applies the threshold.
//! [`ActionPlanner`] converts a qualifying decision into the writes a
//! dispatcher should perform.

pub mod decision;
pub mod guard;
pub mod plan;
pub mod scoring;
pub mod snapshot;

pub use decision::{Decision, Threshold, decide, evaluate};
pub use guard::SkipReason;
pub use plan::{ActionPlan, ActionPlanner, CommentRequest, DEFAULT_LABEL, LabelName};
pub use scoring::{RULEBOOK, Rule, RuleId, ScoreBreakdown, ScoredReason, score};
pub use snapshot::{PullRequestSnapshot, SnapshotBuilder};
