//! Explanatory comment generation for qualifying pull requests.

mod model;
mod openai;
mod service;
mod template;

#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(test)]
pub(crate) mod test_support;

pub use model::{
    ATTRIBUTION_FOOTER, COMMENT_HEADING, COMMENT_INTRO, CommentContext, ContentSource,
    ContentSourceParseError, SECTION_HEADINGS,
};
pub use openai::{
    DEFAULT_BASE_URL as DEFAULT_AI_BASE_URL, DEFAULT_MODEL as DEFAULT_AI_MODEL,
    DEFAULT_TIMEOUT_SECS as DEFAULT_AI_TIMEOUT_SECS, OpenAiCommentConfig, OpenAiCommentService,
};
pub use service::{CommentContentService, finalise_comment};
pub use template::{DEFAULT_COMMENT_TEMPLATE, TemplateCommentService};

#[cfg(test)]
pub use service::MockCommentContentService;
