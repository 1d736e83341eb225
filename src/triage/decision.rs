//! Threshold decision over a score breakdown.

use std::fmt;

use super::guard::{self, SkipReason};
use super::scoring::{self, ScoreBreakdown};
use super::snapshot::PullRequestSnapshot;

/// Minimum score a pull request needs to qualify (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Threshold(u32);

impl Threshold {
    /// Default threshold of 65 points.
    pub const DEFAULT: Self = Self(65);

    /// Wraps a raw point value.
    #[must_use]
    pub const fn new(points: u32) -> Self {
        Self(points)
    }

    /// Returns the raw point value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Outcome of evaluating one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// A guard clause excluded the pull request before scoring.
    Skipped {
        /// Guard that fired.
        reason: SkipReason,
    },
    /// The score fell below the threshold.
    NotQualified {
        /// Itemised score.
        breakdown: ScoreBreakdown,
        /// Threshold that was applied.
        threshold: Threshold,
    },
    /// The score met or exceeded the threshold.
    Qualified {
        /// Itemised score.
        breakdown: ScoreBreakdown,
        /// Threshold that was applied.
        threshold: Threshold,
    },
}

impl Decision {
    /// Whether the pull request qualifies for labelling.
    #[must_use]
    pub const fn is_qualified(&self) -> bool {
        matches!(self, Self::Qualified { .. })
    }

    /// Score breakdown, absent when the pull request was skipped.
    #[must_use]
    pub const fn breakdown(&self) -> Option<&ScoreBreakdown> {
        match self {
            Self::Skipped { .. } => None,
            Self::NotQualified { breakdown, .. } | Self::Qualified { breakdown, .. } => {
                Some(breakdown)
            }
        }
    }

    /// Short machine-friendly name of the variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Skipped { .. } => "skipped",
            Self::NotQualified { .. } => "not_qualified",
            Self::Qualified { .. } => "qualified",
        }
    }
}

/// Produces a decision from an optional skip reason and a deferred score.
///
/// `score` is only invoked when no skip reason is present, so a skipped pull
/// request is never scored.
pub fn decide<F>(skip: Option<SkipReason>, score: F, threshold: Threshold) -> Decision
where
    F: FnOnce() -> ScoreBreakdown,
{
    if let Some(reason) = skip {
        return Decision::Skipped { reason };
    }

    let breakdown = score();
    if breakdown.total() < threshold.get() {
        Decision::NotQualified {
            breakdown,
            threshold,
        }
    } else {
        Decision::Qualified {
            breakdown,
            threshold,
        }
    }
}

/// Runs guards, scoring, and the threshold decision for one snapshot.
#[must_use]
pub fn evaluate(snapshot: &PullRequestSnapshot, threshold: Threshold) -> Decision {
    decide(
        guard::evaluate(snapshot),
        || scoring::score(snapshot),
        threshold,
    )
}
