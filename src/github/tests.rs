//! Unit tests for the GitHub collaborator.

use rstest::{fixture, rstest};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{
    IntakeError, OctocrabGateway, PersonalAccessToken, PullRequestGateway, PullRequestLocator,
    RepositoryLocator,
};

#[rstest]
fn parses_standard_github_url() {
    let locator = PullRequestLocator::parse("https://github.com/octo/repo/pull/12/files")
        .expect("should parse standard GitHub URL");
    let repository = locator.repository_locator();
    assert_eq!(repository.owner().as_str(), "octo", "owner mismatch");
    assert_eq!(repository.repository().as_str(), "repo", "repository mismatch");
    assert_eq!(locator.number().get(), 12_u64, "number mismatch");
    assert_eq!(
        locator.api_base().as_str(),
        "https://api.github.com/",
        "api base mismatch"
    );
    assert_eq!(locator.to_string(), "octo/repo#12");
}

#[rstest]
fn parses_enterprise_url() {
    let locator = PullRequestLocator::parse("https://ghe.example.com/foo/bar/pull/7")
        .expect("should parse enterprise URL");
    assert_eq!(
        locator.api_base().as_str(),
        "https://ghe.example.com/api/v3",
        "enterprise api base mismatch"
    );
}

#[rstest]
#[case::missing_number("https://github.com/octo/repo/pull/")]
#[case::issues_path("https://github.com/octo/repo/issues/4")]
#[case::pulls_collection("https://github.com/octo/repo/pulls/4")]
fn rejects_non_pull_request_paths(#[case] url: &str) {
    let result = PullRequestLocator::parse(url);
    assert!(
        matches!(result, Err(IntakeError::MissingPathSegments)),
        "expected MissingPathSegments for {url}, got {result:?}"
    );
}

#[rstest]
#[case::non_numeric("https://github.com/octo/repo/pull/not-a-number")]
#[case::zero("https://github.com/octo/repo/pull/0")]
fn rejects_invalid_numbers(#[case] url: &str) {
    let result = PullRequestLocator::parse(url);
    assert!(
        matches!(result, Err(IntakeError::InvalidPullRequestNumber)),
        "expected InvalidPullRequestNumber for {url}, got {result:?}"
    );
}

#[rstest]
fn rejects_invalid_url() {
    let result = PullRequestLocator::parse("octo/repo/pull/4");
    assert!(
        matches!(result, Err(IntakeError::InvalidUrl(_))),
        "expected InvalidUrl for malformed URL, got {result:?}"
    );
}

#[rstest]
fn rejects_empty_token() {
    let result = PersonalAccessToken::new(String::new());
    assert!(
        matches!(result, Err(IntakeError::MissingToken)),
        "expected MissingToken, got {result:?}"
    );
}

#[rstest]
#[case("octo/repo", true)]
#[case("  octo/repo ", true)]
#[case("octo", false)]
#[case("octo/", false)]
#[case("/repo", false)]
#[case("octo/repo/extra", false)]
fn parses_repository_slugs(#[case] slug: &str, #[case] valid: bool) {
    let result = RepositoryLocator::parse_slug(slug);
    assert_eq!(result.is_ok(), valid, "slug {slug:?} gave {result:?}");
}

#[rstest]
fn builds_write_paths() {
    let locator = PullRequestLocator::parse("https://github.com/octo/repo/pull/9")
        .expect("locator should parse");

    assert_eq!(locator.pull_request_path(), "/repos/octo/repo/pulls/9");
    assert_eq!(locator.files_path(), "/repos/octo/repo/pulls/9/files");
    assert_eq!(locator.labels_path(), "/repos/octo/repo/issues/9/labels");
    assert_eq!(locator.comments_path(), "/repos/octo/repo/issues/9/comments");
}

struct GatewayHarness {
    server: MockServer,
    locator: PullRequestLocator,
    gateway: OctocrabGateway,
}

#[fixture]
async fn harness() -> GatewayHarness {
    let server = MockServer::start().await;
    let locator = PullRequestLocator::parse(&format!("{}/octo/repo/pull/4", server.uri()))
        .expect("mock server locator should parse");
    let token = PersonalAccessToken::new("ghp_test").expect("token should be valid");
    let gateway = OctocrabGateway::for_token(&token, locator.repository_locator())
        .expect("gateway should build");

    GatewayHarness {
        server,
        locator,
        gateway,
    }
}

#[rstest]
#[tokio::test]
async fn fetches_pull_request_snapshot(#[future(awt)] harness: GatewayHarness) {
    Mock::given(method("GET"))
        .and(path("/api/v3/repos/octo/repo/pulls/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": 4,
            "title": "docs: fix link",
            "body": "",
            "draft": false,
            "user": { "login": "alice" },
            "additions": 2,
            "deletions": 1,
            "changed_files": 1,
            "commits": 1
        })))
        .mount(&harness.server)
        .await;

    let snapshot = harness
        .gateway
        .pull_request_snapshot(&harness.locator)
        .await
        .expect("snapshot should load");

    assert_eq!(snapshot.number().get(), 4);
    assert_eq!(snapshot.title(), "docs: fix link");
    assert_eq!(snapshot.changed_lines(), 3);
}

#[rstest]
#[tokio::test]
async fn maps_unauthorised_response_to_authentication_error(#[future(awt)] harness: GatewayHarness) {
    Mock::given(method("GET"))
        .and(path("/api/v3/repos/octo/repo/pulls/4"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
        )
        .mount(&harness.server)
        .await;

    let result = harness.gateway.pull_request_snapshot(&harness.locator).await;

    assert!(
        matches!(result, Err(IntakeError::Authentication { ref message }) if message.contains("pull request")),
        "expected authentication error naming the operation, got {result:?}"
    );
}

#[rstest]
#[tokio::test]
async fn maps_rate_limit_response(#[future(awt)] harness: GatewayHarness) {
    Mock::given(method("GET"))
        .and(path("/api/v3/repos/octo/repo"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "API rate limit exceeded for user",
            "documentation_url": "https://docs.github.com/rest/overview/rate-limits"
        })))
        .mount(&harness.server)
        .await;

    let result = harness
        .gateway
        .repository_context(harness.locator.repository_locator())
        .await;

    assert!(
        matches!(result, Err(IntakeError::RateLimitExceeded { .. })),
        "expected rate limit error, got {result:?}"
    );
}

#[rstest]
#[tokio::test]
async fn posts_labels_and_comment(#[future(awt)] harness: GatewayHarness) {
    Mock::given(method("POST"))
        .and(path("/api/v3/repos/octo/repo/issues/4/labels"))
        .and(body_json(json!({ "labels": ["beginner-friendly"] })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "name": "beginner-friendly" }])),
        )
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v3/repos/octo/repo/issues/4/comments"))
        .and(body_json(json!({ "body": "hello" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 99,
            "html_url": "https://github.com/octo/repo/pull/4#issuecomment-99"
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    harness
        .gateway
        .add_labels(&harness.locator, &["beginner-friendly".to_owned()])
        .await
        .expect("label write should succeed");
    let posted = harness
        .gateway
        .create_comment(&harness.locator, "hello")
        .await
        .expect("comment write should succeed");

    assert_eq!(posted.id, 99);
}

#[rstest]
#[tokio::test]
async fn loads_repository_context_and_files(#[future(awt)] harness: GatewayHarness) {
    Mock::given(method("GET"))
        .and(path("/api/v3/repos/octo/repo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "full_name": "octo/repo",
            "description": "A demo project",
            "language": "Rust",
            "topics": ["cli", "github"]
        })))
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/repos/octo/repo/pulls/4/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "filename": "README.md", "status": "modified", "additions": 2, "deletions": 1 }
        ])))
        .mount(&harness.server)
        .await;

    let context = harness
        .gateway
        .repository_context(harness.locator.repository_locator())
        .await
        .expect("repository context should load");
    let files = harness
        .gateway
        .pull_request_files(&harness.locator)
        .await
        .expect("files should load");

    assert_eq!(context.topics, vec!["cli".to_owned(), "github".to_owned()]);
    assert_eq!(files.len(), 1);
    assert_eq!(files.first().map(|file| file.path.as_str()), Some("README.md"));
}
