//! Orchestration of generation, conversion, and fallbacks. Every public
//! operation here returns a structurally valid value; backend failures and
//! malformed payloads are absorbed into deterministic local synthesis.

use crate::backend::CompletionBackend;
use crate::backend::parse::{find_json_array, find_json_object};
use crate::content::types::{
    BlogParts, ContentFormat, GeneratedPost, ProductInfo, TargetPersona, Tone,
};
use crate::content::{fallback, prompt, sanitize};
use crate::error::BackendError;
use std::sync::Arc;

const BLOG_ERROR_TITLES: [&str; 3] = [
    "An error occurred while generating the article.",
    "Fallback title 2",
    "Fallback title 3",
];
const BLOG_ERROR_BODY: &str =
    "Sorry, the draft could not be generated. Please try again in a moment.";
const BLOG_ERROR_HASHTAG: &str = "#generation-error";

pub struct ContentPipeline {
    backend: Arc<dyn CompletionBackend>,
}

impl ContentPipeline {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Propose target-reader personas for a product. Falls back to the
    /// fixed catalog when the backend fails or returns junk.
    pub async fn generate_personas(&self, product: &ProductInfo) -> Vec<TargetPersona> {
        match self.try_personas(product).await {
            Ok(personas) => personas,
            Err(err) => {
                tracing::warn!(error = %err, "persona generation failed, using the fixed catalog");
                fallback::personas()
            }
        }
    }

    async fn try_personas(
        &self,
        product: &ProductInfo,
    ) -> Result<Vec<TargetPersona>, BackendError> {
        let raw = self
            .backend
            .complete(&prompt::persona_prompt(product))
            .await
            .map_err(|err| BackendError::Call(err.to_string()))?;
        let value = find_json_array(&raw).ok_or(BackendError::Parse)?;
        let personas: Vec<TargetPersona> =
            serde_json::from_value(value).map_err(|_| BackendError::Validation)?;
        if personas.is_empty() {
            return Err(BackendError::Validation);
        }
        Ok(personas)
    }

    /// Generate a post in the requested primary format. Never fails: a bad
    /// backend run degrades to an apology blog or a synthesized thread.
    pub async fn generate_post(
        &self,
        product: &ProductInfo,
        persona: &TargetPersona,
        tone: Tone,
        format: ContentFormat,
    ) -> GeneratedPost {
        match format {
            ContentFormat::Blog => self.generate_blog(product, persona, tone).await,
            ContentFormat::Thread => self.generate_thread(product, persona, tone).await,
        }
    }

    async fn generate_blog(
        &self,
        product: &ProductInfo,
        persona: &TargetPersona,
        tone: Tone,
    ) -> GeneratedPost {
        let parts = match self
            .complete_blog(&prompt::blog_prompt(product, persona, tone))
            .await
        {
            Ok(parts) => parts,
            Err(err) => {
                tracing::warn!(error = %err, "blog generation failed, returning the apology draft");
                BlogParts {
                    titles: BLOG_ERROR_TITLES.iter().map(ToString::to_string).collect(),
                    content: BLOG_ERROR_BODY.to_string(),
                    hashtags: vec![BLOG_ERROR_HASHTAG.to_string()],
                }
            }
        };

        GeneratedPost {
            titles: parts.titles,
            content: parts.content,
            hashtags: parts.hashtags,
            threads: Vec::new(),
            primary_format: ContentFormat::Blog,
        }
    }

    async fn generate_thread(
        &self,
        product: &ProductInfo,
        persona: &TargetPersona,
        tone: Tone,
    ) -> GeneratedPost {
        match self
            .complete_thread(&prompt::thread_prompt(product, persona, tone))
            .await
        {
            Ok(parts) => {
                return GeneratedPost {
                    titles: vec![thread_title(product, persona, "thread digest", "thread")],
                    content: String::new(),
                    hashtags: parts.hashtags,
                    threads: parts.threads,
                    primary_format: ContentFormat::Thread,
                };
            }
            Err(err) => {
                tracing::warn!(error = %err, "thread generation failed, synthesizing locally");
            }
        }

        let title = thread_title(product, persona, "key points", "key points");
        let content = synthetic_thread_body(product, persona);
        let hashtags = sanitize::extract_hashtags_from_text(&format!(
            "#{} #{} {}",
            product.name.replace(' ', ""),
            persona.title.replace(' ', ""),
            sanitize::DEFAULT_HASHTAG
        ));
        let threads = fallback::threads_from_blog(
            std::slice::from_ref(&title),
            &content,
            &hashtags,
        );

        GeneratedPost {
            titles: vec![title],
            content: String::new(),
            hashtags,
            threads,
            primary_format: ContentFormat::Thread,
        }
    }

    /// Recast an existing blog post as a thread. A post with no blog body
    /// cannot be converted and yields an empty list.
    pub async fn convert_blog_to_threads(&self, post: &GeneratedPost, tone: Tone) -> Vec<String> {
        if post.content.trim().is_empty() {
            return Vec::new();
        }

        match self
            .complete_thread(&prompt::blog_to_thread_prompt(post, tone))
            .await
        {
            Ok(parts) => parts.threads,
            Err(err) => {
                tracing::warn!(error = %err, "blog to thread conversion failed, chunking locally");
                fallback::threads_from_blog(&post.titles, &post.content, &post.hashtags)
            }
        }
    }

    /// Expand thread posts into blog parts. Empty input degrades to the
    /// deterministic local assembly rather than a backend round trip.
    pub async fn convert_threads_to_blog(&self, threads: &[String], tone: Tone) -> BlogParts {
        let clean: Vec<String> = threads
            .iter()
            .map(|post| sanitize::strip_thread_prefix(post))
            .filter(|post| !post.is_empty())
            .collect();
        let harvested = sanitize::extract_hashtags_from_text(&clean.join(" "));

        if clean.is_empty() {
            return fallback::blog_from_threads(threads, &harvested);
        }

        match self
            .complete_blog(&prompt::thread_to_blog_prompt(&clean, tone))
            .await
        {
            Ok(parts) => parts,
            Err(err) => {
                tracing::warn!(error = %err, "thread to blog conversion failed, assembling locally");
                fallback::blog_from_threads(threads, &harvested)
            }
        }
    }

    async fn complete_blog(&self, prompt: &str) -> Result<BlogParts, BackendError> {
        let value = self.complete_object(prompt).await?;
        sanitize::validate_blog_payload(&value).ok_or(BackendError::Validation)
    }

    async fn complete_thread(&self, prompt: &str) -> Result<sanitize::ThreadParts, BackendError> {
        let value = self.complete_object(prompt).await?;
        sanitize::validate_thread_payload(&value).ok_or(BackendError::Validation)
    }

    async fn complete_object(&self, prompt: &str) -> Result<serde_json::Value, BackendError> {
        let raw = self
            .backend
            .complete(prompt)
            .await
            .map_err(|err| BackendError::Call(err.to_string()))?;
        find_json_object(&raw).ok_or(BackendError::Parse)
    }
}

fn thread_title(
    product: &ProductInfo,
    persona: &TargetPersona,
    with_product: &str,
    with_persona: &str,
) -> String {
    let name = product.name.trim();
    if name.is_empty() {
        format!("{} {with_persona}", persona.title)
    } else {
        format!("{name} {with_product}")
    }
}

/// Three plain sentences the chunker can split into a passable thread when
/// the backend is unreachable.
fn synthetic_thread_body(product: &ProductInfo, persona: &TargetPersona) -> String {
    let name = if product.name.trim().is_empty() {
        "This product"
    } else {
        product.name.trim()
    };
    let description = if product.description.trim().is_empty() {
        "It solves a real everyday problem without getting in the way.".to_string()
    } else {
        product.description.trim().to_string()
    };
    let link_line = if product.link.trim().is_empty() {
        "Details are in the product description.".to_string()
    } else {
        format!("Full details at {}.", product.link.trim())
    };

    format!(
        "{name} is worth a look for {}.\n\n{description}\n\n{link_line}",
        persona.title.to_lowercase()
    )
}
