//! Deterministic comment generation with a Jinja2-compatible template.
//!
//! The built-in template renders every section from the score breakdown,
//! repository context, and changed-file list without calling any external
//! service. Users may supply their own template; it sees the same variables:
//!
//! - `heading`, `intro`, `footer`: fixed comment scaffolding
//! - `repository_name`: `owner/repo`
//! - `number`, `title`, `author`, `body_excerpt`
//! - `additions`, `deletions`, `changed_files`, `commits`, `total`
//! - `reasons`: list of `{ label, points }`
//! - `repository`: `{ full_name, description, language, topics, html_url }`
//! - `files`: list of `{ path, status, additions, deletions }`
//! - `areas`: top-level directories touched
//! - `status_counts`: list of `{ status, count }`
//! - `checklist`: suggested review items

use std::collections::BTreeMap;

use async_trait::async_trait;
use minijinja::{Environment, context};
use serde::Serialize;

use crate::github::IntakeError;
use crate::github::models::ChangedFile;
use crate::triage::plan::CommentRequest;
use crate::triage::scoring::RuleId;

use super::model::{ATTRIBUTION_FOOTER, COMMENT_HEADING, COMMENT_INTRO, CommentContext};
use super::service::CommentContentService;

const TEMPLATE_NAME: &str = "comment";
const BODY_EXCERPT_CHARS: usize = 280;
const DOCUMENTATION_EXTENSIONS: [&str; 4] = [".md", ".rst", ".adoc", ".txt"];

/// Built-in comment template.
pub const DEFAULT_COMMENT_TEMPLATE: &str = r#"{{ heading }}

{{ intro }}

### Summary
PR #{{ number }} "{{ title }}" by @{{ author }} touches {{ changed_files }} file{% if changed_files != 1 %}s{% endif %} (+{{ additions }} / -{{ deletions }}) across {{ commits }} commit{% if commits != 1 %}s{% endif %}.
{% if body_excerpt %}

> {{ body_excerpt }}
{% endif %}

### Project Context
{% if repository.description %}
**{{ repository_name }}**: {{ repository.description }}
{% else %}
**{{ repository_name }}** does not publish a description.
{% endif %}
{% if repository.language %}
- Primary language: {{ repository.language }}
{% endif %}
{% if repository.topics %}
- Topics: {{ repository.topics | join(", ") }}
{% endif %}
{% if areas %}
- Areas touched: {{ areas | join(", ") }}
{% endif %}

### Technical Details
{% for file in files %}
- `{{ file.path }}` ({{ file.status }}, +{{ file.additions }} / -{{ file.deletions }})
{% else %}
- The changed file list was not available.
{% endfor %}

### Code Changes Analysis
The diff adds {{ additions }} and removes {{ deletions }} line{% if deletions != 1 %}s{% endif %}.
{% for entry in status_counts %}
- {{ entry.count }} file{% if entry.count != 1 %}s{% endif %} {{ entry.status }}
{% endfor %}

### Why This is Beginner-Friendly
Heuristic score: **{{ total }}** points.
{% for reason in reasons %}
- {{ reason.label }} (+{{ reason.points }})
{% endfor %}
- Change size: {{ additions }} additions, {{ deletions }} deletions
- Number of files: {{ changed_files }}

### Review Checklist
{% for item in checklist %}
- [ ] {{ item }}
{% endfor %}

### Additional Resources
{% if repository.html_url %}
- Repository: {{ repository.html_url }}
{% endif %}
{% for file in files %}{% if file.is_documentation %}
- Documentation touched: `{{ file.path }}`
{% endif %}{% endfor %}
- Contributing guidelines in the repository, if present, describe the review process.

---
{{ footer }}
"#;

/// Template-backed [`CommentContentService`].
#[derive(Debug, Clone)]
pub struct TemplateCommentService {
    source: String,
}

impl TemplateCommentService {
    /// Compiles a user-supplied template.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Configuration`] when the template has syntax
    /// errors.
    pub fn new(template: impl Into<String>) -> Result<Self, IntakeError> {
        let service = Self {
            source: template.into(),
        };
        service
            .environment()
            .map_err(|error| IntakeError::Configuration {
                message: format!("invalid comment template syntax: {error}"),
            })?;

        Ok(service)
    }

    /// Service using [`DEFAULT_COMMENT_TEMPLATE`].
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Configuration`] if the built-in template fails
    /// to compile.
    pub fn builtin() -> Result<Self, IntakeError> {
        Self::new(DEFAULT_COMMENT_TEMPLATE)
    }

    fn environment(&self) -> Result<Environment<'_>, minijinja::Error> {
        let mut environment = Environment::new();
        environment.set_auto_escape_callback(|_| minijinja::AutoEscape::None);
        environment.set_trim_blocks(true);
        environment.set_lstrip_blocks(true);
        environment.add_template(TEMPLATE_NAME, &self.source)?;
        Ok(environment)
    }

    /// Renders the comment synchronously.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::ContentGeneration`] when rendering fails.
    pub fn render(
        &self,
        request: &CommentRequest,
        context: &CommentContext,
    ) -> Result<String, IntakeError> {
        let environment = self
            .environment()
            .map_err(|error| generation_error(&error))?;
        let template = environment
            .get_template(TEMPLATE_NAME)
            .map_err(|error| generation_error(&error))?;
        let snapshot = request.snapshot();
        let files: Vec<TemplateFile<'_>> = context.files().iter().map(TemplateFile::from).collect();
        let reasons: Vec<TemplateReason> = request
            .breakdown()
            .reasons()
            .iter()
            .map(|reason| TemplateReason {
                label: reason.label(),
                points: reason.points(),
            })
            .collect();

        template
            .render(context! {
                heading => COMMENT_HEADING,
                intro => COMMENT_INTRO,
                footer => ATTRIBUTION_FOOTER,
                repository_name => request.repository().to_string(),
                number => request.number(),
                title => snapshot.title(),
                author => snapshot.author_login(),
                body_excerpt => excerpt(snapshot.body(), BODY_EXCERPT_CHARS),
                additions => snapshot.additions(),
                deletions => snapshot.deletions(),
                changed_files => snapshot.changed_files(),
                commits => snapshot.commit_count(),
                total => request.breakdown().total(),
                reasons => reasons,
                repository => context.repository(),
                files => files,
                areas => touched_areas(context.files()),
                status_counts => status_counts(context.files()),
                checklist => review_checklist(request, context.files()),
            })
            .map_err(|error| generation_error(&error))
    }
}

#[async_trait]
impl CommentContentService for TemplateCommentService {
    async fn generate_comment(
        &self,
        request: &CommentRequest,
        context: &CommentContext,
    ) -> Result<String, IntakeError> {
        self.render(request, context)
    }
}

#[derive(Debug, Serialize)]
struct TemplateReason {
    label: &'static str,
    points: u32,
}

#[derive(Debug, Serialize)]
struct TemplateFile<'a> {
    path: &'a str,
    status: &'a str,
    additions: u64,
    deletions: u64,
    is_documentation: bool,
}

impl<'a> From<&'a ChangedFile> for TemplateFile<'a> {
    fn from(file: &'a ChangedFile) -> Self {
        Self {
            path: file.path.as_str(),
            status: file.status.as_str(),
            additions: file.additions,
            deletions: file.deletions,
            is_documentation: is_documentation_file(&file.path),
        }
    }
}

#[derive(Debug, Serialize)]
struct StatusCount {
    status: String,
    count: usize,
}

fn generation_error(error: &minijinja::Error) -> IntakeError {
    IntakeError::ContentGeneration {
        message: format!("comment template rendering failed: {error}"),
    }
}

fn is_documentation_file(path: &str) -> bool {
    let lowered = path.to_lowercase();
    lowered.starts_with("docs/")
        || DOCUMENTATION_EXTENSIONS
            .iter()
            .any(|extension| lowered.ends_with(extension))
}

/// First paragraph of the body, cut at `max_chars` characters.
fn excerpt(body: &str, max_chars: usize) -> String {
    let paragraph = body.trim().split("\n\n").next().unwrap_or_default();
    let flattened = paragraph.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut characters = flattened.chars();
    let mut output: String = characters.by_ref().take(max_chars).collect();

    if characters.next().is_some() {
        output.push_str("...");
    }
    output
}

fn touched_areas(files: &[ChangedFile]) -> Vec<String> {
    let mut areas: Vec<String> = files
        .iter()
        .map(|file| {
            file.path
                .split_once('/')
                .map_or_else(|| "repository root".to_owned(), |(top, _)| format!("{top}/"))
        })
        .collect();
    areas.sort();
    areas.dedup();
    areas
}

fn status_counts(files: &[ChangedFile]) -> Vec<StatusCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for file in files {
        *counts.entry(file.status.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(status, count)| StatusCount {
            status: status.to_owned(),
            count,
        })
        .collect()
}

fn review_checklist(request: &CommentRequest, files: &[ChangedFile]) -> Vec<&'static str> {
    let breakdown = request.breakdown();
    let mut checklist = vec!["Confirm the change does what the title and description say"];

    if breakdown.contains(RuleId::Documentation)
        || files.iter().any(|file| is_documentation_file(&file.path))
    {
        checklist.push("Preview the rendered documentation and check any links");
    }
    if breakdown.contains(RuleId::DependencyUpdate) {
        checklist.push("Skim the upstream changelog for breaking changes");
    }
    if breakdown.contains(RuleId::CherryPick) {
        checklist.push("Check the cherry-picked commit applies cleanly to this branch");
    }
    checklist.push("Make sure CI passes and existing tests still cover the touched code");

    checklist
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
