//! GitHub hosting collaborator.
//!
//! This module wraps Octocrab to parse pull request and repository
//! identifiers, validate personal access tokens, fetch the facts the triage
//! engine scores, and perform the label and comment writes. Errors are mapped
//! into user-friendly variants so that callers can surface the failed
//! operation without exposing Octocrab internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;

pub use error::IntakeError;
pub use gateway::{OctocrabGateway, PullRequestGateway};
pub use locator::{
    PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryLocator, RepositoryName,
    RepositoryOwner,
};
pub use models::{ChangedFile, PostedComment, RepositoryContext};

#[cfg(test)]
pub use gateway::MockPullRequestGateway;

#[cfg(test)]
mod tests;
