//! Additive heuristic scoring driven by a fixed rulebook.
//!
//! Each [`Rule`] pairs a condition with the points it awards and the label
//! reported when it fires. Rules are evaluated in [`RULEBOOK`] order; the
//! order only affects how reasons are listed, never the total. The two size
//! tiers are written so that at most one of them can match.

use super::snapshot::PullRequestSnapshot;

/// Largest diff (additions plus deletions) that counts as tiny.
pub const TINY_CHANGE_MAX_LINES: u64 = 10;
/// Largest diff (additions plus deletions) that counts as small.
pub const SMALL_CHANGE_MAX_LINES: u64 = 40;
/// Largest number of files a focused change may touch.
pub const FOCUSED_CHANGE_MAX_FILES: u64 = 2;

const BOT_AUTHOR_MARKERS: [&str; 2] = ["dependabot", "renovate"];
const DOCUMENTATION_KEYWORD: &str = "docs";
const CHERRY_PICK_KEYWORDS: [&str; 2] = ["cherry-pick", "cherry pick"];

/// Stable identifier for each rule in the rulebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleId {
    /// Diff of at most [`TINY_CHANGE_MAX_LINES`] lines.
    TinyChange,
    /// Diff of at most [`SMALL_CHANGE_MAX_LINES`] lines that is not tiny.
    SmallChange,
    /// At most [`FOCUSED_CHANGE_MAX_FILES`] files changed.
    FocusedChange,
    /// Authored by a dependency bot.
    DependencyUpdate,
    /// Fewer than two commits.
    SingleCommit,
    /// Mentions documentation in the title or body.
    Documentation,
    /// Mentions a cherry-pick in the title or body.
    CherryPick,
}

/// A single condition → points → label entry.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    id: RuleId,
    points: u32,
    label: &'static str,
    condition: fn(&PullRequestSnapshot) -> bool,
}

impl Rule {
    /// Rule identifier.
    #[must_use]
    pub const fn id(&self) -> RuleId {
        self.id
    }

    /// Points awarded when the rule matches.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.points
    }

    /// Reason label reported when the rule matches.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Evaluates the rule against a snapshot.
    #[must_use]
    pub fn matches(&self, snapshot: &PullRequestSnapshot) -> bool {
        (self.condition)(snapshot)
    }

    const fn award(&self) -> ScoredReason {
        ScoredReason {
            rule: self.id,
            points: self.points,
            label: self.label,
        }
    }
}

/// The rulebook in evaluation order.
pub const RULEBOOK: [Rule; 7] = [
    Rule {
        id: RuleId::TinyChange,
        points: 40,
        label: "Tiny change",
        condition: is_tiny_change,
    },
    Rule {
        id: RuleId::SmallChange,
        points: 20,
        label: "Small change",
        condition: is_small_change,
    },
    Rule {
        id: RuleId::FocusedChange,
        points: 20,
        label: "Focused change",
        condition: is_focused_change,
    },
    Rule {
        id: RuleId::DependencyUpdate,
        points: 25,
        label: "Dependency update",
        condition: is_bot_author,
    },
    Rule {
        id: RuleId::SingleCommit,
        points: 20,
        label: "Single commit",
        condition: is_single_commit,
    },
    Rule {
        id: RuleId::Documentation,
        points: 20,
        label: "Documentation change",
        condition: mentions_documentation,
    },
    Rule {
        id: RuleId::CherryPick,
        points: 15,
        label: "Cherry-picked change",
        condition: mentions_cherry_pick,
    },
];

/// A rule that fired, with the points it contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredReason {
    rule: RuleId,
    points: u32,
    label: &'static str,
}

impl ScoredReason {
    /// Rule that produced this reason.
    #[must_use]
    pub const fn rule(&self) -> RuleId {
        self.rule
    }

    /// Points contributed.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.points
    }

    /// Short reason label, e.g. "Tiny change".
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }
}

#[cfg(test)]
impl ScoredReason {
    /// Reason with arbitrary points for exercising threshold boundaries.
    pub(crate) const fn synthetic(points: u32) -> Self {
        Self {
            rule: RuleId::TinyChange,
            points,
            label: "Synthetic",
        }
    }
}

/// Ordered reasons with a derived total.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScoreBreakdown {
    reasons: Vec<ScoredReason>,
}

impl ScoreBreakdown {
    /// Reasons in rule-evaluation order.
    #[must_use]
    pub fn reasons(&self) -> &[ScoredReason] {
        &self.reasons
    }

    /// Sum of all contributed points.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.reasons
            .iter()
            .fold(0_u32, |total, reason| total.saturating_add(reason.points))
    }

    /// Whether the given rule contributed to this breakdown.
    #[must_use]
    pub fn contains(&self, rule: RuleId) -> bool {
        self.reasons.iter().any(|reason| reason.rule == rule)
    }

    /// Reason labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.reasons.iter().map(ScoredReason::label)
    }
}

impl FromIterator<ScoredReason> for ScoreBreakdown {
    fn from_iter<I: IntoIterator<Item = ScoredReason>>(iter: I) -> Self {
        Self {
            reasons: iter.into_iter().collect(),
        }
    }
}

/// Scores a snapshot against the full rulebook.
#[must_use]
pub fn score(snapshot: &PullRequestSnapshot) -> ScoreBreakdown {
    RULEBOOK
        .iter()
        .filter(|rule| rule.matches(snapshot))
        .map(Rule::award)
        .collect()
}

fn is_tiny_change(snapshot: &PullRequestSnapshot) -> bool {
    snapshot.changed_lines() <= TINY_CHANGE_MAX_LINES
}

fn is_small_change(snapshot: &PullRequestSnapshot) -> bool {
    !is_tiny_change(snapshot) && snapshot.changed_lines() <= SMALL_CHANGE_MAX_LINES
}

fn is_focused_change(snapshot: &PullRequestSnapshot) -> bool {
    snapshot.changed_files() <= FOCUSED_CHANGE_MAX_FILES
}

fn is_bot_author(snapshot: &PullRequestSnapshot) -> bool {
    let login = snapshot.author_login().to_lowercase();
    BOT_AUTHOR_MARKERS
        .iter()
        .any(|marker| login.contains(marker))
}

fn is_single_commit(snapshot: &PullRequestSnapshot) -> bool {
    snapshot.commit_count() < 2
}

fn mentions_documentation(snapshot: &PullRequestSnapshot) -> bool {
    mentions_any(snapshot, &[DOCUMENTATION_KEYWORD])
}

fn mentions_cherry_pick(snapshot: &PullRequestSnapshot) -> bool {
    mentions_any(snapshot, &CHERRY_PICK_KEYWORDS)
}

/// Case-insensitive substring search over title and body.
fn mentions_any(snapshot: &PullRequestSnapshot, keywords: &[&str]) -> bool {
    let title = snapshot.title().to_lowercase();
    let body = snapshot.body().to_lowercase();
    keywords
        .iter()
        .any(|keyword| title.contains(keyword) || body.contains(keyword))
}
