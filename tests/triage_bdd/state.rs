//! Scenario state and analysis runner for the triage BDD tests.

use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use seedling::{
    AnalysisOptions, AnalysisReport, IntakeError, OctocrabGateway, PersonalAccessToken,
    PullRequestAnalysis, PullRequestLocator, TemplateCommentService,
};
use serde_json::Value;
use wiremock::{Mock, MockServer};

use super::mock_github::{SharedRuntime, ensure_runtime_and_server, resolve_server_url};

const TEST_TOKEN: &str = "ghp_test_token";

#[derive(ScenarioState, Default)]
pub(crate) struct TriageState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) dry_run: Slot<bool>,
    pub(crate) report: Slot<AnalysisReport>,
    pub(crate) error: Slot<IntakeError>,
}

fn runtime(triage_state: &TriageState) -> Result<SharedRuntime, IntakeError> {
    ensure_runtime_and_server(&triage_state.runtime, &triage_state.server).map_err(|error| {
        IntakeError::Io {
            message: error.to_string(),
        }
    })
}

fn server_uri(triage_state: &TriageState) -> Result<String, IntakeError> {
    triage_state
        .server
        .with_ref(MockServer::uri)
        .ok_or_else(|| IntakeError::Api {
            message: "mock server not initialised".to_owned(),
        })
}

/// Mounts `mock` on the scenario's server, starting it if needed.
pub(crate) fn mount(triage_state: &TriageState, mock: Mock) -> Result<(), IntakeError> {
    let shared_runtime = runtime(triage_state)?;
    triage_state
        .server
        .with_ref(|server| shared_runtime.block_on(mock.mount(server)))
        .ok_or_else(|| IntakeError::Api {
            message: "mock server not initialised".to_owned(),
        })
}

/// Runs the analysis with the built-in template and stores the outcome.
pub(crate) fn run_analysis(triage_state: &TriageState, pr_url: &str) -> Result<(), IntakeError> {
    let shared_runtime = runtime(triage_state)?;
    let resolved_url = resolve_server_url(&server_uri(triage_state)?, pr_url);
    let locator = PullRequestLocator::parse(&resolved_url)?;
    let options = AnalysisOptions {
        dry_run: triage_state.dry_run.get().unwrap_or(false),
        ..AnalysisOptions::default()
    };

    let result = shared_runtime.block_on(async {
        let token = PersonalAccessToken::new(TEST_TOKEN)?;
        let gateway = OctocrabGateway::for_token(&token, locator.repository_locator())?;
        let content = TemplateCommentService::builtin()?;
        PullRequestAnalysis::new(&gateway, &content, options)
            .analyse(&locator)
            .await
    });

    match result {
        Ok(report) => {
            drop(triage_state.error.take());
            triage_state.report.set(report);
        }
        Err(error) => {
            drop(triage_state.report.take());
            triage_state.error.set(error);
        }
    }
    Ok(())
}

/// JSON bodies of POST requests whose path ends with `suffix`.
pub(crate) fn posted_bodies(
    triage_state: &TriageState,
    suffix: &str,
) -> Result<Vec<Value>, IntakeError> {
    let shared_runtime = runtime(triage_state)?;
    let requests = triage_state
        .server
        .with_ref(|server| shared_runtime.block_on(server.received_requests()))
        .flatten()
        .ok_or_else(|| IntakeError::Api {
            message: "request recording is disabled".to_owned(),
        })?;

    Ok(requests
        .iter()
        .filter(|request| request.method.as_str() == "POST")
        .filter(|request| request.url.path().ends_with(suffix))
        .filter_map(|request| request.body_json::<Value>().ok())
        .collect())
}
