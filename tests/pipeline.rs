//! Pipeline behavior against a canned completion backend: happy paths,
//! malformed payloads, and the deterministic fallbacks behind them.

use async_trait::async_trait;
use copymill::backend::CompletionBackend;
use copymill::content::fallback;
use copymill::{ContentFormat, ContentPipeline, GeneratedPost, ProductInfo, TargetPersona, Tone};
use std::sync::Arc;

struct StubBackend {
    response: String,
}

impl StubBackend {
    fn pipeline(response: &str) -> ContentPipeline {
        ContentPipeline::new(Arc::new(Self {
            response: response.to_string(),
        }))
    }
}

#[async_trait]
impl CompletionBackend for StubBackend {
    async fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
        Ok(self.response.clone())
    }
}

struct FailingBackend;

#[async_trait]
impl CompletionBackend for FailingBackend {
    async fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("backend unreachable"))
    }
}

fn product() -> ProductInfo {
    ProductInfo {
        name: "Walnut desk".into(),
        link: "https://shop.example/desk".into(),
        description: "A height adjustable walnut desk.".into(),
        ..ProductInfo::default()
    }
}

fn persona() -> TargetPersona {
    fallback::personas().remove(0)
}

// ─── Personas ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn personas_parse_from_a_prose_wrapped_array() {
    let response = r#"Here are your personas:
        [
            {"id": "1", "title": "Desk upgraders", "description": "Replacing a worn desk",
             "icon": "🪑", "recommendedTone": "friendly"},
            {"id": "2", "title": "Home office pros", "description": "All-day sitters",
             "icon": "💼", "recommendedTone": "professional"}
        ]
        Let me know if you need more."#;
    let personas = StubBackend::pipeline(response)
        .generate_personas(&product())
        .await;
    assert_eq!(personas.len(), 2);
    assert_eq!(personas[0].title, "Desk upgraders");
    assert_eq!(personas[1].recommended_tone, Tone::Professional);
}

#[tokio::test]
async fn garbage_personas_fall_back_to_the_fixed_catalog() {
    let personas = StubBackend::pipeline("no json at all")
        .generate_personas(&product())
        .await;
    assert_eq!(personas.len(), 4);
    assert_eq!(personas[0].title, "Value shoppers");
}

#[tokio::test]
async fn backend_failure_falls_back_to_the_fixed_catalog() {
    let pipeline = ContentPipeline::new(Arc::new(FailingBackend));
    let personas = pipeline.generate_personas(&product()).await;
    assert_eq!(personas.len(), 4);
}

// ─── Blog generation ────────────────────────────────────────────────────────

#[tokio::test]
async fn blog_payload_is_sanitized_before_returning() {
    let response = r##"{
        "titles": ["Best", "Second", "Third", "Fourth", "Fifth"],
        "content": "Hook: Your back hurts.\n\nStory - We built a fix.\n\nOffer: Try it.",
        "hashtags": ["desk", "#setup"]
    }"##;
    let post = StubBackend::pipeline(response)
        .generate_post(&product(), &persona(), Tone::Friendly, ContentFormat::Blog)
        .await;

    assert_eq!(post.primary_format, ContentFormat::Blog);
    assert_eq!(post.titles.len(), 3);
    assert!(!post.content.contains("Hook:"));
    assert!(post.content.contains("Your back hurts."));
    assert_eq!(post.hashtags, vec!["#desk", "#setup"]);
    assert!(post.threads.is_empty());
}

#[tokio::test]
async fn unusable_blog_payload_degrades_to_the_apology_draft() {
    let post = StubBackend::pipeline("{\"titles\": [\"only titles\"]}")
        .generate_post(&product(), &persona(), Tone::Friendly, ContentFormat::Blog)
        .await;

    assert!(post.titles[0].contains("error occurred"));
    assert!(post.content.contains("could not be generated"));
    assert_eq!(post.hashtags, vec!["#generation-error"]);
}

// ─── Thread generation ──────────────────────────────────────────────────────

#[tokio::test]
async fn thread_posts_are_renumbered_after_stripping() {
    let response = r#"{
        "threads": ["3/5 First point", "Second point", "Third point",
                    "Fourth point", "Fifth point"],
        "hashtags": ["desk"]
    }"#;
    let post = StubBackend::pipeline(response)
        .generate_post(&product(), &persona(), Tone::Friendly, ContentFormat::Thread)
        .await;

    assert_eq!(post.primary_format, ContentFormat::Thread);
    assert_eq!(post.threads.len(), 5);
    assert_eq!(post.threads[0], "1/5\nFirst point");
    assert_eq!(post.threads[4], "5/5\nFifth point");
    assert!(post.content.is_empty());
    assert_eq!(post.titles, vec!["Walnut desk thread digest"]);
}

#[tokio::test]
async fn oversized_threads_are_capped_at_seven() {
    let posts: Vec<String> = (1..=9).map(|i| format!("\"Point number {i}\"")).collect();
    let response = format!("{{\"threads\": [{}], \"hashtags\": []}}", posts.join(", "));
    let post = StubBackend::pipeline(&response)
        .generate_post(&product(), &persona(), Tone::Friendly, ContentFormat::Thread)
        .await;
    assert_eq!(post.threads.len(), 7);
    assert!(post.threads[6].starts_with("7/7\n"));
}

#[tokio::test]
async fn undersized_threads_trigger_local_synthesis() {
    let response = r#"{"threads": ["one", "two", "three"], "hashtags": []}"#;
    let post = StubBackend::pipeline(response)
        .generate_post(&product(), &persona(), Tone::Friendly, ContentFormat::Thread)
        .await;

    assert!(post.threads.len() >= 4);
    assert!(post.threads.len() <= 7);
    assert!(post.titles[0].contains("key points"));
    // The synthesized thread still references the product.
    assert!(post.threads.iter().any(|p| p.contains("Walnut desk")));
}

#[tokio::test]
async fn thread_synthesis_survives_a_dead_backend() {
    let pipeline = ContentPipeline::new(Arc::new(FailingBackend));
    let post = pipeline
        .generate_post(&product(), &persona(), Tone::Friendly, ContentFormat::Thread)
        .await;

    assert!(post.threads.len() >= 4);
    let total = post.threads.len();
    for (i, item) in post.threads.iter().enumerate() {
        assert!(item.starts_with(&format!("{}/{total}\n", i + 1)));
    }
}

// ─── Conversions ────────────────────────────────────────────────────────────

fn blog_post() -> GeneratedPost {
    GeneratedPost {
        titles: vec!["The last desk you will buy".into()],
        content: "Your back deserves better.\n\nDual motors lift 120kg without a wobble.\n\n\
                  Order this week for free shipping."
            .into(),
        hashtags: vec!["#desk".into()],
        threads: vec![],
        primary_format: ContentFormat::Blog,
    }
}

#[tokio::test]
async fn blog_converts_to_threads_via_the_backend() {
    let response = r#"{
        "threads": ["Hook post", "Motor post", "Wobble post", "Shipping post"],
        "hashtags": ["desk"]
    }"#;
    let threads = StubBackend::pipeline(response)
        .convert_blog_to_threads(&blog_post(), Tone::Friendly)
        .await;
    assert_eq!(threads.len(), 4);
    assert_eq!(threads[0], "1/4\nHook post");
}

#[tokio::test]
async fn failed_conversion_chunks_the_blog_locally() {
    let pipeline = ContentPipeline::new(Arc::new(FailingBackend));
    let threads = pipeline
        .convert_blog_to_threads(&blog_post(), Tone::Friendly)
        .await;

    assert!(threads.len() >= 4);
    assert!(threads[0].contains("The last desk you will buy"));
    assert!(threads.last().unwrap().contains("#desk"));
}

#[tokio::test]
async fn empty_blog_content_cannot_be_converted() {
    let mut post = blog_post();
    post.content = "   ".into();
    let threads = StubBackend::pipeline("{}")
        .convert_blog_to_threads(&post, Tone::Friendly)
        .await;
    assert!(threads.is_empty());
}

#[tokio::test]
async fn threads_convert_to_a_blog_via_the_backend() {
    let response = r#"{
        "titles": ["From thread to post"],
        "content": "Expanded body text.",
        "hashtags": ["desk"]
    }"#;
    let threads = vec!["1/2\nFirst".to_string(), "2/2\nSecond".to_string()];
    let blog = StubBackend::pipeline(response)
        .convert_threads_to_blog(&threads, Tone::Friendly)
        .await;
    assert_eq!(blog.titles, vec!["From thread to post"]);
    assert_eq!(blog.content, "Expanded body text.");
}

#[tokio::test]
async fn failed_thread_conversion_assembles_the_blog_locally() {
    let pipeline = ContentPipeline::new(Arc::new(FailingBackend));
    let threads = vec![
        "1/2\nFirst point #desk".to_string(),
        "2/2\nSecond point".to_string(),
    ];
    let blog = pipeline.convert_threads_to_blog(&threads, Tone::Friendly).await;

    assert_eq!(blog.content, "First point #desk\n\nSecond point");
    assert_eq!(blog.hashtags, vec!["#desk"]);
}

#[tokio::test]
async fn round_trip_through_fallbacks_keeps_the_content() {
    let threads = fallback::threads_from_blog(
        &["Round trip".to_string()],
        "Paragraph one.\n\nParagraph two.",
        &["tag".to_string()],
    );
    let blog = fallback::blog_from_threads(&threads, &["tag".to_string()]);
    assert!(blog.content.contains("Paragraph one."));
    assert!(blog.content.contains("Round trip"));
}
