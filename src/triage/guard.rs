//! Guard clauses that exclude a pull request from scoring.

use std::fmt;

use super::snapshot::PullRequestSnapshot;

/// Reason a pull request was not scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The pull request is still a draft.
    Draft,
    /// The title flags the pull request as work in progress.
    WorkInProgress,
}

impl SkipReason {
    /// Human-readable explanation shown to users.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Draft => "PR is a draft",
            Self::WorkInProgress => "Title indicates work-in-progress",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.message())
    }
}

/// Returns the first guard that disqualifies the snapshot, if any.
///
/// Drafts are checked before the title so a draft WIP pull request reports
/// [`SkipReason::Draft`].
#[must_use]
pub fn evaluate(snapshot: &PullRequestSnapshot) -> Option<SkipReason> {
    if snapshot.is_draft() {
        return Some(SkipReason::Draft);
    }

    if has_wip_marker(snapshot.title()) {
        return Some(SkipReason::WorkInProgress);
    }

    None
}

/// Matches a leading `WIP` token in any case.
///
/// One opening bracket is tolerated so `[WIP] ...` counts, and the token must
/// end at a non-alphanumeric character so `Wipe cache` does not.
fn has_wip_marker(title: &str) -> bool {
    let trimmed = title.trim_start();
    let unbracketed = trimmed.strip_prefix(['[', '(']).unwrap_or(trimmed);
    let mut characters = unbracketed.chars();
    let token: String = characters.by_ref().take(3).collect();

    token.eq_ignore_ascii_case("wip")
        && characters
            .next()
            .is_none_or(|character| !character.is_alphanumeric())
}
