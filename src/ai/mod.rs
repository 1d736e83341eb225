//! AI-assisted and template-based content generation.

pub mod comment;

pub use comment::{
    CommentContentService, CommentContext, ContentSource, OpenAiCommentConfig,
    OpenAiCommentService, TemplateCommentService, finalise_comment,
};
