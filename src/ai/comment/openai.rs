//! OpenAI-compatible HTTP implementation of comment generation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::github::IntakeError;
use crate::triage::plan::CommentRequest;

use super::model::{
    ATTRIBUTION_FOOTER, COMMENT_HEADING, COMMENT_INTRO, CommentContext, SECTION_HEADINGS,
};
use super::service::CommentContentService;

/// Default chat-completions API base.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default HTTP timeout for one generation request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

const MAX_PROMPT_FILES: usize = 50;
const ERROR_BODY_CHARS: usize = 160;

/// Configuration for [`OpenAiCommentService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiCommentConfig {
    /// Base API URL (e.g., `https://api.openai.com/v1`).
    pub base_url: String,
    /// Model identifier sent in chat-completions requests.
    pub model: String,
    /// API key used for bearer authentication.
    pub api_key: Option<String>,
    /// HTTP timeout.
    pub timeout: Duration,
}

impl Default for OpenAiCommentConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl OpenAiCommentConfig {
    /// Constructs configuration with explicit API settings.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            timeout,
        }
    }
}

/// Comment generator backed by an OpenAI-compatible chat completions API.
#[derive(Debug, Clone, Default)]
pub struct OpenAiCommentService {
    config: OpenAiCommentConfig,
}

impl OpenAiCommentService {
    /// Creates a service from explicit configuration.
    #[must_use]
    pub const fn new(config: OpenAiCommentConfig) -> Self {
        Self { config }
    }

    fn extract_api_key(&self) -> Result<&str, IntakeError> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| IntakeError::Configuration {
                message: concat!(
                    "AI API key is required for comment_source = \"ai\" (use --ai-api-key, ",
                    "SEEDLING_AI_API_KEY, or OPENAI_API_KEY)"
                )
                .to_owned(),
            })
    }

    fn create_http_client(&self) -> Result<Client, IntakeError> {
        Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|error| IntakeError::Configuration {
                message: format!("failed to configure AI HTTP client: {error}"),
            })
    }
}

#[async_trait]
impl CommentContentService for OpenAiCommentService {
    async fn generate_comment(
        &self,
        request: &CommentRequest,
        context: &CommentContext,
    ) -> Result<String, IntakeError> {
        let api_key = self.extract_api_key()?;
        let endpoint = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let payload = ChatCompletionsRequest {
            model: self.config.model.as_str(),
            messages: vec![
                ChatCompletionsMessage {
                    role: "system",
                    content: build_system_prompt(),
                },
                ChatCompletionsMessage {
                    role: "user",
                    content: build_prompt(request, context),
                },
            ],
        };
        let client = self.create_http_client()?;

        tracing::debug!(model = %self.config.model, pr = request.number(), "requesting AI comment");
        let response = client
            .post(endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|error| IntakeError::ContentGeneration {
                message: format!("AI request transport failed: {error}"),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.map_or_else(
                |_| "(failed to read error response body)".to_owned(),
                |content| truncate_for_message(content.as_str(), ERROR_BODY_CHARS),
            );
            return Err(IntakeError::ContentGeneration {
                message: format!("AI request failed with status {}: {body}", status.as_u16()),
            });
        }

        let response_payload: ChatCompletionsResponse =
            response
                .json()
                .await
                .map_err(|error| IntakeError::ContentGeneration {
                    message: format!("AI response JSON decoding failed: {error}"),
                })?;

        response_payload
            .choices
            .first()
            .and_then(|choice| parse_content_value(&choice.message.content))
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .map(ToOwned::to_owned)
            .ok_or_else(|| IntakeError::ContentGeneration {
                message: "AI response did not contain assistant text".to_owned(),
            })
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionsMessage>,
}

#[derive(Debug, Serialize)]
struct ChatCompletionsMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChatContent {
    Text(String),
    Parts(Vec<ChatContentPart>),
}

#[derive(Debug, Deserialize)]
struct ChatContentPart {
    text: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: ChatContent,
}

fn build_system_prompt() -> String {
    let sections = SECTION_HEADINGS
        .iter()
        .map(|heading| format!("### {heading}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        concat!(
            "You write short, welcoming pull-request comments that explain why a change ",
            "is a good first review for newcomers. Write GitHub Markdown. ",
            "Start with the heading \"{heading}\" followed by the line \"{intro}\". ",
            "Then write these sections in order:\n{sections}\n",
            "Ground every statement in the facts provided; do not invent files or features. ",
            "Use \"- [ ]\" items for the review checklist. ",
            "End with a horizontal rule and the line \"{footer}\". ",
            "Do not mention being an AI model."
        ),
        heading = COMMENT_HEADING,
        intro = COMMENT_INTRO,
        sections = sections,
        footer = ATTRIBUTION_FOOTER,
    )
}

fn build_prompt(request: &CommentRequest, context: &CommentContext) -> String {
    let snapshot = request.snapshot();
    let repository = context.repository();

    let mut prompt = String::new();
    push_line(&mut prompt, "Repository", &request.repository().to_string());
    if let Some(description) = repository.description.as_deref() {
        push_line(&mut prompt, "Description", description);
    }
    if let Some(language) = repository.language.as_deref() {
        push_line(&mut prompt, "Primary language", language);
    }
    if !repository.topics.is_empty() {
        push_line(&mut prompt, "Topics", &repository.topics.join(", "));
    }

    push_line(&mut prompt, "Pull request", &format!("#{}", request.number()));
    push_line(&mut prompt, "Title", snapshot.title());
    push_line(&mut prompt, "Author", snapshot.author_login());
    push_line(
        &mut prompt,
        "Size",
        &format!(
            "+{} / -{} lines in {} files across {} commits",
            snapshot.additions(),
            snapshot.deletions(),
            snapshot.changed_files(),
            snapshot.commit_count()
        ),
    );

    let breakdown = request.breakdown();
    push_line(&mut prompt, "Score", &format!("{} points", breakdown.total()));
    for reason in breakdown.reasons() {
        push_line(
            &mut prompt,
            "Triggered rule",
            &format!("{} (+{})", reason.label(), reason.points()),
        );
    }

    if !context.files().is_empty() {
        prompt.push_str("Changed files:\n");
        for file in context.files().iter().take(MAX_PROMPT_FILES) {
            prompt.push_str(&format!(
                "- {} ({}, +{} / -{})\n",
                file.path, file.status, file.additions, file.deletions
            ));
        }
    }

    if !snapshot.body().trim().is_empty() {
        prompt.push_str("Description:\n");
        prompt.push_str(snapshot.body().trim());
        prompt.push('\n');
    }

    prompt
}

fn push_line(prompt: &mut String, label: &str, value: &str) {
    prompt.push_str(label);
    prompt.push_str(": ");
    prompt.push_str(value);
    prompt.push('\n');
}

fn parse_content_value(content: &ChatContent) -> Option<&str> {
    match content {
        ChatContent::Text(text) => Some(text.as_str()),
        ChatContent::Parts(parts) => parts
            .iter()
            .find_map(|part| part.text.as_deref().or(part.content.as_deref())),
    }
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}

#[cfg(test)]
#[path = "openai_tests.rs"]
mod tests;
