//! Error types shared by the triage pipeline and its collaborators.

use thiserror::Error;

/// Errors surfaced while parsing input, talking to GitHub, or generating
/// comment content.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntakeError {
    /// Neither a pull request URL nor a pull request number was supplied.
    #[error("pull request is required (use --pr-url or --pr-number)")]
    MissingPullRequest,

    /// The provided URL could not be parsed.
    #[error("pull request URL is invalid: {0}")]
    InvalidUrl(String),

    /// The pull request path is incomplete.
    #[error("pull request URL must match /owner/repo/pull/<number>")]
    MissingPathSegments,

    /// The repository identifier is not `owner/repo`.
    #[error("repository must be given as owner/repo: {0}")]
    InvalidRepository(String),

    /// The pull request number is not a valid integer.
    #[error("pull request number must be a positive integer")]
    InvalidPullRequestNumber,

    /// Pull request data could not describe a real pull request.
    #[error("pull request data is invalid: {field} {message}")]
    InvalidSnapshot {
        /// Offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Rate limit exceeded - the API returned 403/429 with a rate limit message.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Error message from GitHub.
        message: String,
    },

    /// A boundary call did not finish in time.
    #[error("{operation} timed out after {seconds}s")]
    Timeout {
        /// Operation that was abandoned.
        operation: String,
        /// Configured limit.
        seconds: u64,
    },

    /// The comment generator failed or produced nothing usable.
    #[error("comment generation failed: {message}")]
    ContentGeneration {
        /// Provider or template failure detail.
        message: String,
    },

    /// The label was applied but posting the comment failed.
    #[error("label '{label}' was applied but posting the comment failed: {message}")]
    CommentAfterLabel {
        /// Label that remains on the pull request.
        label: String,
        /// Underlying failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}
