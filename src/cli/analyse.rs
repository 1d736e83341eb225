//! Single pull request analysis operation.

use std::io::{self, BufRead, Write};

use seedling::ai::comment::CommentContentService;
use seedling::telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink};
use seedling::{
    AnalysisOptions, ContentSource, IntakeError, OctocrabGateway, OpenAiCommentService,
    PersonalAccessToken, PullRequestAnalysis, PullRequestLocator, SeedlingConfig,
    TemplateCommentService,
};

use super::output::{NO_PR_MESSAGE, write_analysis_summary, write_line};
use super::prompt::read_pr_number;

/// Analyses one pull request and prints the summary.
///
/// # Errors
///
/// Returns [`IntakeError::Configuration`] if required configuration is
/// missing, hosting errors if the GitHub API fails, and content generation
/// errors if the comment cannot be drafted.
pub async fn run(config: &SeedlingConfig) -> Result<(), IntakeError> {
    let resolved = {
        let mut stdin = io::stdin().lock();
        let mut stdout = io::stdout().lock();
        resolve_locator(config, &mut stdin, &mut stdout)?
    };
    let Some(locator) = resolved else {
        return write_line(&mut io::stdout().lock(), NO_PR_MESSAGE);
    };

    let source = config.content_source()?;
    let token_value = config.resolve_token().inspect_err(|_| {
        tracing::warn!("no GitHub token configured (set SEEDLING_TOKEN or GITHUB_TOKEN)");
    })?;
    let token = PersonalAccessToken::new(token_value)?;

    let gateway = OctocrabGateway::for_token(&token, locator.repository_locator())?;
    let content = build_content_service(config, source)?;
    let telemetry: Box<dyn TelemetrySink> = if config.telemetry {
        Box::new(StderrJsonlTelemetrySink)
    } else {
        Box::new(NoopTelemetrySink)
    };
    let options = AnalysisOptions {
        threshold: config.threshold(),
        label: config.label()?,
        request_timeout: config.request_timeout(),
        dry_run: config.dry_run,
    };

    let report = PullRequestAnalysis::new(&gateway, content.as_ref(), options)
        .with_telemetry(telemetry.as_ref())
        .analyse(&locator)
        .await?;

    write_analysis_summary(&locator, &report)
}

/// Resolves the pull request from configuration, prompting for a number
/// when only the repository is known.
///
/// Returns `Ok(None)` when the prompt receives no input.
///
/// # Errors
///
/// Returns configuration and parsing errors from [`SeedlingConfig`] or the
/// prompt.
pub fn resolve_locator<R: BufRead, W: Write>(
    config: &SeedlingConfig,
    input: &mut R,
    output: &mut W,
) -> Result<Option<PullRequestLocator>, IntakeError> {
    if let Some(locator) = config.resolve_pull_request()? {
        return Ok(Some(locator));
    }

    let repository = config
        .resolve_repository()?
        .ok_or(IntakeError::MissingPullRequest)?;
    tracing::debug!(repository = %repository, "no pull request number configured; prompting");

    Ok(read_pr_number(input, output)?
        .map(|number| PullRequestLocator::new(repository, number)))
}

/// Builds the configured comment generator.
///
/// # Errors
///
/// Returns [`IntakeError::Io`] or [`IntakeError::Configuration`] when a
/// custom template cannot be read or compiled.
pub fn build_content_service(
    config: &SeedlingConfig,
    source: ContentSource,
) -> Result<Box<dyn CommentContentService>, IntakeError> {
    match source {
        ContentSource::Template => {
            let service = match config.load_comment_template()? {
                Some(template) => TemplateCommentService::new(template)?,
                None => TemplateCommentService::builtin()?,
            };
            Ok(Box::new(service))
        }
        ContentSource::Ai => {
            let openai = config.openai_config();
            if openai.api_key.is_none() {
                tracing::warn!(
                    "comment_source is 'ai' but no AI API key is configured \
                     (set SEEDLING_AI_API_KEY or OPENAI_API_KEY)"
                );
            }
            Ok(Box::new(OpenAiCommentService::new(openai)))
        }
    }
}
