//! Tests for label-then-comment dispatch.

use std::time::Duration;

use mockall::Sequence;
use rstest::{fixture, rstest};

use super::{PlanDispatcher, bounded};
use crate::ai::comment::test_support::DelayedCommentService;
use crate::ai::comment::{COMMENT_HEADING, MockCommentContentService};
use crate::github::gateway::test_support::{STALL, StallingGateway, StalledCall};
use crate::github::models::{PostedComment, RepositoryContext};
use crate::github::{IntakeError, MockPullRequestGateway, RepositoryLocator};
use crate::telemetry::{RecordingTelemetrySink, TelemetryEvent};
use crate::triage::decision::{Threshold, evaluate};
use crate::triage::plan::{ActionPlan, ActionPlanner, LabelName};
use crate::triage::snapshot::PullRequestSnapshot;

fn qualifying_snapshot() -> PullRequestSnapshot {
    PullRequestSnapshot::builder(7)
        .title("Fix typo")
        .author("alice")
        .lines(2, 1)
        .changed_files(1)
        .commits(1)
        .build()
        .expect("snapshot should build")
}

#[fixture]
fn plan() -> ActionPlan {
    let snapshot = qualifying_snapshot();
    let decision = evaluate(&snapshot, Threshold::DEFAULT);
    let repository =
        RepositoryLocator::from_owner_repo("octo", "repo").expect("repository should build");

    ActionPlanner::new(repository, LabelName::default())
        .plan(&decision, &snapshot)
        .expect("tiny single-commit change should qualify")
}

fn api_error(message: &str) -> IntakeError {
    IntakeError::Api {
        message: message.to_owned(),
    }
}

fn gateway_with_context() -> MockPullRequestGateway {
    let mut gateway = MockPullRequestGateway::new();
    gateway
        .expect_repository_context()
        .returning(|_| Ok(RepositoryContext::default()));
    gateway.expect_pull_request_files().returning(|_| Ok(Vec::new()));
    gateway
}

fn content_returning(text: &'static str) -> MockCommentContentService {
    let mut content = MockCommentContentService::new();
    content
        .expect_generate_comment()
        .times(1)
        .returning(move |_, _| Ok(text.to_owned()));
    content
}

#[rstest]
#[tokio::test]
async fn labels_before_commenting(plan: ActionPlan) {
    let mut gateway = gateway_with_context();
    let mut sequence = Sequence::new();
    gateway
        .expect_add_labels()
        .withf(|locator, labels| {
            locator.to_string() == "octo/repo#7"
                && labels.iter().map(String::as_str).eq(["beginner-friendly"])
        })
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_, _| Ok(()));
    gateway
        .expect_create_comment()
        .withf(|_, body| body.starts_with(COMMENT_HEADING))
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_, _| {
            Ok(PostedComment {
                id: 99,
                html_url: None,
            })
        });
    let content = content_returning("### Summary\nTiny fix.");
    let telemetry = RecordingTelemetrySink::default();

    let report = PlanDispatcher::new(&gateway, &content)
        .with_telemetry(&telemetry)
        .dispatch(plan)
        .await
        .expect("dispatch should succeed");

    assert_eq!(report.label().as_str(), "beginner-friendly");
    assert_eq!(report.comment().id, 99);
    assert_eq!(
        telemetry.take(),
        vec![
            TelemetryEvent::LabelApplied {
                pull_request: "octo/repo#7".to_owned(),
                label: "beginner-friendly".to_owned(),
            },
            TelemetryEvent::CommentPosted {
                pull_request: "octo/repo#7".to_owned(),
                comment_id: 99,
            },
        ]
    );
}

#[rstest]
#[tokio::test]
async fn label_failure_skips_comment(plan: ActionPlan) {
    let mut gateway = gateway_with_context();
    gateway
        .expect_add_labels()
        .times(1)
        .returning(|_, _| Err(api_error("label missing")));
    gateway.expect_create_comment().never();
    let content = content_returning("body");

    let error = PlanDispatcher::new(&gateway, &content)
        .dispatch(plan)
        .await
        .expect_err("label failure should abort");

    assert_eq!(error, api_error("label missing"));
}

#[rstest]
#[tokio::test]
async fn comment_failure_reports_label_left_behind(plan: ActionPlan) {
    let mut gateway = gateway_with_context();
    gateway.expect_add_labels().times(1).returning(|_, _| Ok(()));
    gateway
        .expect_create_comment()
        .times(1)
        .returning(|_, _| Err(api_error("locked conversation")));
    let content = content_returning("body");
    let telemetry = RecordingTelemetrySink::default();

    let error = PlanDispatcher::new(&gateway, &content)
        .with_telemetry(&telemetry)
        .dispatch(plan)
        .await
        .expect_err("comment failure should surface");

    match error {
        IntakeError::CommentAfterLabel { label, message } => {
            assert_eq!(label, "beginner-friendly");
            assert!(message.contains("locked conversation"), "got {message}");
        }
        other => panic!("expected CommentAfterLabel, got {other:?}"),
    }
    assert_eq!(telemetry.take().len(), 1, "only the label write is recorded");
}

#[rstest]
#[tokio::test]
async fn generation_failure_writes_nothing(plan: ActionPlan) {
    let mut gateway = gateway_with_context();
    gateway.expect_add_labels().never();
    gateway.expect_create_comment().never();
    let mut content = MockCommentContentService::new();
    content.expect_generate_comment().times(1).returning(|_, _| {
        Err(IntakeError::ContentGeneration {
            message: "provider down".to_owned(),
        })
    });

    let error = PlanDispatcher::new(&gateway, &content)
        .dispatch(plan)
        .await
        .expect_err("generation failure should abort");

    assert!(
        matches!(error, IntakeError::ContentGeneration { .. }),
        "got {error:?}"
    );
}

#[rstest]
#[tokio::test]
async fn blank_generation_writes_nothing(plan: ActionPlan) {
    let mut gateway = gateway_with_context();
    gateway.expect_add_labels().never();
    let content = content_returning("   ");

    let error = PlanDispatcher::new(&gateway, &content)
        .prepare(plan)
        .await
        .expect_err("blank comment should be rejected");

    assert!(
        matches!(error, IntakeError::ContentGeneration { .. }),
        "got {error:?}"
    );
}

#[rstest]
#[case::repository(true, false)]
#[case::files(false, true)]
#[tokio::test]
async fn context_failure_writes_nothing(
    plan: ActionPlan,
    #[case] repository_fails: bool,
    #[case] files_fail: bool,
) {
    let mut gateway = MockPullRequestGateway::new();
    gateway.expect_repository_context().returning(move |_| {
        if repository_fails {
            Err(api_error("repository not found"))
        } else {
            Ok(RepositoryContext::default())
        }
    });
    gateway.expect_pull_request_files().returning(move |_| {
        if files_fail {
            Err(api_error("files not found"))
        } else {
            Ok(Vec::new())
        }
    });
    gateway.expect_add_labels().never();
    gateway.expect_create_comment().never();
    let mut content = MockCommentContentService::new();
    content.expect_generate_comment().never();

    let error = PlanDispatcher::new(&gateway, &content)
        .dispatch(plan)
        .await
        .expect_err("context failure should abort before any write");

    assert!(matches!(error, IntakeError::Api { .. }), "got {error:?}");
}

#[rstest]
#[case::repository(StalledCall::RepositoryContext, "fetch repository context")]
#[case::files(StalledCall::Files, "list pull request files")]
#[tokio::test(start_paused = true)]
async fn stalled_context_fetch_writes_nothing(
    plan: ActionPlan,
    #[case] call: StalledCall,
    #[case] operation: &str,
) {
    let gateway = StallingGateway::new(qualifying_snapshot()).stalling(call);
    let content = DelayedCommentService::new(Duration::ZERO);

    let result = PlanDispatcher::new(&gateway, &content)
        .with_timeout(Duration::from_secs(5))
        .dispatch(plan)
        .await;

    assert_eq!(
        result,
        Err(IntakeError::Timeout {
            operation: operation.to_owned(),
            seconds: 5,
        })
    );
    assert_eq!(gateway.writes(), 0, "no label or comment after a timeout");
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn stalled_generation_writes_nothing(plan: ActionPlan) {
    let gateway = StallingGateway::new(qualifying_snapshot());
    let content = DelayedCommentService::new(STALL);

    let result = PlanDispatcher::new(&gateway, &content)
        .with_timeout(Duration::from_secs(5))
        .dispatch(plan)
        .await;

    assert!(
        matches!(result, Err(IntakeError::Timeout { ref operation, .. }) if operation == "generate comment"),
        "got {result:?}"
    );
    assert_eq!(gateway.writes(), 0, "no label or comment after a timeout");
}

#[tokio::test(start_paused = true)]
async fn bounded_times_out_slow_operations() {
    let slow = async {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok::<_, IntakeError>(())
    };

    let result = bounded("add labels", Duration::from_secs(5), slow).await;

    assert_eq!(
        result,
        Err(IntakeError::Timeout {
            operation: "add labels".to_owned(),
            seconds: 5,
        })
    );
}

#[tokio::test]
async fn bounded_passes_through_results() {
    let result = bounded("noop", Duration::from_secs(5), async { Ok::<_, IntakeError>(3) }).await;

    assert_eq!(result, Ok(3));
}
