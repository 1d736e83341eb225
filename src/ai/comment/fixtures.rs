//! Shared `rstest` fixtures for comment generation tests.

use rstest::fixture;

use crate::github::locator::RepositoryLocator;
use crate::github::models::{ChangedFile, RepositoryContext};
use crate::triage::decision::{Threshold, evaluate};
use crate::triage::plan::{ActionPlanner, CommentRequest, LabelName};
use crate::triage::snapshot::PullRequestSnapshot;

use super::model::CommentContext;

pub(crate) fn changed_file(path: &str, status: &str, additions: u64, deletions: u64) -> ChangedFile {
    ChangedFile {
        path: path.to_owned(),
        status: status.to_owned(),
        additions,
        deletions,
    }
}

/// Request for a one-file documentation fix scoring 100 points.
#[fixture]
pub(crate) fn comment_request() -> CommentRequest {
    let snapshot = PullRequestSnapshot::builder(42)
        .title("Fix typo in docs")
        .body("Corrects a spelling mistake in the installation guide.")
        .author("alice")
        .lines(3, 1)
        .changed_files(1)
        .commits(1)
        .build()
        .expect("snapshot should build");
    let decision = evaluate(&snapshot, Threshold::DEFAULT);
    let repository =
        RepositoryLocator::from_owner_repo("octo", "guide").expect("repository should build");

    ActionPlanner::new(repository, LabelName::default())
        .plan(&decision, &snapshot)
        .expect("example pull request should qualify")
        .into_parts()
        .1
}

#[fixture]
pub(crate) fn comment_context() -> CommentContext {
    CommentContext::new(
        RepositoryContext {
            full_name: Some("octo/guide".to_owned()),
            description: Some("A friendly guide".to_owned()),
            language: Some("Rust".to_owned()),
            topics: vec!["docs".to_owned(), "tutorial".to_owned()],
            html_url: Some("https://github.com/octo/guide".to_owned()),
        },
        vec![changed_file("docs/install.md", "modified", 3, 1)],
    )
}
