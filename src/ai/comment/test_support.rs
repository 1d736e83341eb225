//! Test-support comment generator that answers after a delay.

use std::time::Duration;

use async_trait::async_trait;

use crate::github::IntakeError;
use crate::triage::plan::CommentRequest;

use super::{CommentContentService, CommentContext};

/// Generator that sleeps before returning a fixed body.
pub(crate) struct DelayedCommentService {
    delay: Duration,
}

impl DelayedCommentService {
    #[must_use]
    pub(crate) const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl CommentContentService for DelayedCommentService {
    async fn generate_comment(
        &self,
        _request: &CommentRequest,
        _context: &CommentContext,
    ) -> Result<String, IntakeError> {
        tokio::time::sleep(self.delay).await;
        Ok("### Summary\nEventually drafted.".to_owned())
    }
}
