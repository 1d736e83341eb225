//! Service contract for comment generation and the shared finishing step.

use async_trait::async_trait;

use crate::github::IntakeError;
use crate::triage::plan::CommentRequest;

use super::model::{ATTRIBUTION_FOOTER, COMMENT_HEADING, COMMENT_INTRO, CommentContext};

/// Drafts the explanatory comment for a qualifying pull request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentContentService: Send + Sync {
    /// Generate the comment body.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::ContentGeneration`] when the generator fails, or
    /// [`IntakeError::Configuration`] when it is not usable as configured.
    async fn generate_comment(
        &self,
        request: &CommentRequest,
        context: &CommentContext,
    ) -> Result<String, IntakeError>;
}

/// Normalises generated text into the published comment layout.
///
/// Whatever the generator returned, the result starts with
/// [`COMMENT_HEADING`] and ends with the [`ATTRIBUTION_FOOTER`].
///
/// # Errors
///
/// Returns [`IntakeError::ContentGeneration`] when the text is blank.
pub fn finalise_comment(generated: &str) -> Result<String, IntakeError> {
    let trimmed = generated.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::ContentGeneration {
            message: "generator returned an empty comment".to_owned(),
        });
    }

    let mut comment = String::new();
    if !trimmed.starts_with(COMMENT_HEADING) {
        comment.push_str(COMMENT_HEADING);
        comment.push_str("\n\n");
        comment.push_str(COMMENT_INTRO);
        comment.push_str("\n\n");
    }
    comment.push_str(trimmed);

    if !trimmed.ends_with(ATTRIBUTION_FOOTER) {
        comment.push_str("\n\n---\n");
        comment.push_str(ATTRIBUTION_FOOTER);
    }
    comment.push('\n');

    Ok(comment)
}
