//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.seedling.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `SEEDLING_PR_URL`, `SEEDLING_TOKEN`, or
//!    legacy `GITHUB_TOKEN` / `GITHUB_ACCESS_TOKEN`
//! 4. **Command-line arguments** – `--pr-url`/`-u`, `--token`/`-t`, ...
//!
//! # Configuration File
//!
//! ```toml
//! owner = "agno-agi"
//! repo = "agno"
//! threshold = 65
//! label = "beginner-friendly"
//! comment_source = "template"
//! ```

use std::env;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::ai::comment::{
    ContentSource, DEFAULT_AI_BASE_URL, DEFAULT_AI_MODEL, DEFAULT_AI_TIMEOUT_SECS,
    OpenAiCommentConfig,
};
use crate::github::error::IntakeError;
use crate::github::locator::{PullRequestLocator, PullRequestNumber, RepositoryLocator};
use crate::triage::decision::Threshold;
use crate::triage::plan::{DEFAULT_LABEL, LabelName};

/// Legacy token variables consulted after `SEEDLING_TOKEN`, in order.
pub const LEGACY_TOKEN_VARIABLES: [&str; 2] = ["GITHUB_TOKEN", "GITHUB_ACCESS_TOKEN"];
/// Fallback variable holding the AI provider key.
pub const LEGACY_AI_KEY_VARIABLE: &str = "OPENAI_API_KEY";
/// Fallback variable holding the repository as `owner/repo`.
pub const LEGACY_REPOSITORY_VARIABLE: &str = "REPO_NAME";

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `SEEDLING_PR_URL` or `--pr-url`: Pull request URL
/// - `SEEDLING_OWNER` / `SEEDLING_REPO` (or legacy `REPO_NAME=owner/repo`)
/// - `SEEDLING_PR_NUMBER` or `--pr-number`: Pull request number
/// - `SEEDLING_TOKEN`, `GITHUB_TOKEN`, `GITHUB_ACCESS_TOKEN`, or `--token`
/// - `SEEDLING_AI_API_KEY`, `OPENAI_API_KEY`, or `--ai-api-key`
///
/// # Example
///
/// ```no_run
/// use seedling::SeedlingConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = SeedlingConfig::load().expect("failed to load configuration");
/// let threshold = config.threshold();
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "SEEDLING",
    discovery(
        dotfile_name = ".seedling.toml",
        config_file_name = "seedling.toml",
        app_name = "seedling"
    )
)]
pub struct SeedlingConfig {
    /// GitHub pull request URL to analyse.
    ///
    /// Can be provided via:
    /// - CLI: `--pr-url <URL>` or `-u <URL>`
    /// - Environment: `SEEDLING_PR_URL`
    /// - Config file: `pr_url = "..."`
    #[ortho_config(cli_short = 'u')]
    pub pr_url: Option<String>,

    /// Repository owner (e.g., "agno-agi").
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name (e.g., "agno").
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Pull request number within `owner/repo`.
    ///
    /// When neither this nor `pr_url` is set, the CLI prompts for a number.
    #[ortho_config(cli_short = 'n')]
    pub pr_number: Option<u64>,

    /// Personal access token for GitHub API authentication.
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Minimum score a pull request needs to be labelled.
    #[ortho_config()]
    pub threshold: u32,

    /// Label added to qualifying pull requests.
    #[ortho_config(cli_short = 'l')]
    pub label: String,

    /// Comment generator: `template` (default) or `ai`.
    #[ortho_config()]
    pub comment_source: String,

    /// Path to a Jinja2 template replacing the built-in comment template.
    #[ortho_config()]
    pub comment_template: Option<Utf8PathBuf>,

    /// Base URL of the OpenAI-compatible API.
    #[ortho_config()]
    pub ai_base_url: String,

    /// Model used when `comment_source = "ai"`.
    #[ortho_config()]
    pub ai_model: String,

    /// API key for the AI provider.
    ///
    /// Falls back to `OPENAI_API_KEY` when unset.
    #[ortho_config()]
    pub ai_api_key: Option<String>,

    /// HTTP timeout for AI requests, in seconds.
    #[ortho_config()]
    pub ai_timeout_seconds: u64,

    /// Limit for each GitHub or generation call, in seconds.
    #[ortho_config()]
    pub request_timeout_seconds: u64,

    /// Evaluates and renders the comment without writing to GitHub.
    ///
    /// Can be provided via:
    /// - CLI: `--dry-run` / `-d`
    /// - Config file: `dry_run = true`
    #[ortho_config(cli_short = 'd')]
    pub dry_run: bool,

    /// Emits telemetry events to stderr as JSON lines.
    #[ortho_config()]
    pub telemetry: bool,
}

impl Default for SeedlingConfig {
    fn default() -> Self {
        Self {
            pr_url: None,
            owner: None,
            repo: None,
            pr_number: None,
            token: None,
            threshold: Threshold::DEFAULT.get(),
            label: DEFAULT_LABEL.to_owned(),
            comment_source: ContentSource::default().label().to_owned(),
            comment_template: None,
            ai_base_url: DEFAULT_AI_BASE_URL.to_owned(),
            ai_model: DEFAULT_AI_MODEL.to_owned(),
            ai_api_key: None,
            ai_timeout_seconds: DEFAULT_AI_TIMEOUT_SECS,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            dry_run: false,
            telemetry: false,
        }
    }
}

impl SeedlingConfig {
    /// Resolves the token from configuration or the legacy environment
    /// variables `GITHUB_TOKEN` and `GITHUB_ACCESS_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingToken`] when no token source provides a
    /// value.
    pub fn resolve_token(&self) -> Result<String, IntakeError> {
        self.token
            .clone()
            .or_else(|| {
                LEGACY_TOKEN_VARIABLES
                    .iter()
                    .find_map(|name| non_empty_var(name))
            })
            .ok_or(IntakeError::MissingToken)
    }

    /// Resolves the AI key from configuration or `OPENAI_API_KEY`.
    #[must_use]
    pub fn resolve_ai_api_key(&self) -> Option<String> {
        self.ai_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| non_empty_var(LEGACY_AI_KEY_VARIABLE))
    }

    /// Checks that the pull request is identified one way only.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Configuration`] when both `pr_url` and
    /// `pr_number` are set.
    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.pr_url.is_some() && self.pr_number.is_some() {
            return Err(IntakeError::Configuration {
                message: "use either --pr-url or --pr-number, not both".to_owned(),
            });
        }
        Ok(())
    }

    /// Resolves the target repository from `owner`/`repo` or `REPO_NAME`.
    ///
    /// Returns `Ok(None)` when no repository is configured.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Configuration`] when only one of owner and repo
    /// is set, or [`IntakeError::InvalidRepository`] when `REPO_NAME` is not
    /// `owner/repo`.
    pub fn resolve_repository(&self) -> Result<Option<RepositoryLocator>, IntakeError> {
        match (self.owner.as_deref(), self.repo.as_deref()) {
            (Some(owner), Some(repo)) => RepositoryLocator::from_owner_repo(owner, repo).map(Some),
            (Some(_), None) => Err(IntakeError::Configuration {
                message: "repository name is required (use --repo or -r)".to_owned(),
            }),
            (None, Some(_)) => Err(IntakeError::Configuration {
                message: "repository owner is required (use --owner or -o)".to_owned(),
            }),
            (None, None) => non_empty_var(LEGACY_REPOSITORY_VARIABLE)
                .map(|slug| RepositoryLocator::parse_slug(&slug))
                .transpose(),
        }
    }

    /// Resolves the pull request from `pr_url` or repository plus
    /// `pr_number`.
    ///
    /// Returns `Ok(None)` when a repository is known but no number was
    /// given, leaving the caller to ask for one.
    ///
    /// # Errors
    ///
    /// Returns URL parsing errors, [`IntakeError::MissingPullRequest`] when no
    /// repository can be resolved, or [`IntakeError::InvalidPullRequestNumber`]
    /// for a zero number.
    pub fn resolve_pull_request(&self) -> Result<Option<PullRequestLocator>, IntakeError> {
        self.validate()?;
        if let Some(url) = self.pr_url.as_deref() {
            return PullRequestLocator::parse(url).map(Some);
        }

        let repository = self
            .resolve_repository()?
            .ok_or(IntakeError::MissingPullRequest)?;
        self.pr_number
            .map(|number| {
                PullRequestNumber::new(number)
                    .map(|valid| PullRequestLocator::new(repository, valid))
            })
            .transpose()
    }

    /// Score threshold in force.
    #[must_use]
    pub const fn threshold(&self) -> Threshold {
        Threshold::new(self.threshold)
    }

    /// Validated label text.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Configuration`] when the label is blank.
    pub fn label(&self) -> Result<LabelName, IntakeError> {
        LabelName::new(&self.label)
    }

    /// Parsed comment generator choice.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Configuration`] for unknown values.
    pub fn content_source(&self) -> Result<ContentSource, IntakeError> {
        self.comment_source
            .parse::<ContentSource>()
            .map_err(|error| IntakeError::Configuration {
                message: error.to_string(),
            })
    }

    /// Limit applied to each GitHub or generation call.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Settings for the OpenAI-compatible generator.
    #[must_use]
    pub fn openai_config(&self) -> OpenAiCommentConfig {
        OpenAiCommentConfig::new(
            self.ai_base_url.as_str(),
            self.ai_model.as_str(),
            self.resolve_ai_api_key(),
            Duration::from_secs(self.ai_timeout_seconds),
        )
    }

    /// Reads the custom comment template, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Io`] when the path has no file name or the file
    /// cannot be read.
    pub fn load_comment_template(&self) -> Result<Option<String>, IntakeError> {
        self.comment_template
            .as_deref()
            .map(read_template)
            .transpose()
    }
}

fn read_template(path: &Utf8Path) -> Result<String, IntakeError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| IntakeError::Io {
        message: format!("invalid comment template path '{path}': no file name"),
    })?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        IntakeError::Io {
            message: format!("failed to open comment template directory '{parent}': {error}"),
        }
    })?;
    dir.read_to_string(file_name)
        .map_err(|error| IntakeError::Io {
            message: format!("failed to read comment template '{path}': {error}"),
        })
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests;
