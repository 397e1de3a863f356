//! Link-context extraction: fetch an untrusted product page and boil it down
//! to a small, bounded, labeled text digest suitable as grounding input for
//! generation prompts.

pub mod normalize;
pub mod scan;

use crate::config::ExtractConfig;
use crate::content::types::LinkContextData;
use crate::error::ExtractError;
use normalize::strip_tags;
use url::Url;

/// Hard cap applied to the response body before any parsing, bounding
/// worst-case processing cost on adversarial pages.
pub const MAX_HTML_CHARS: usize = 800_000;
/// Cap on the assembled multi-line digest.
pub const MAX_CONTEXT_CHARS: usize = 3_000;
/// Cap on the main-section body snippet inside the digest.
pub const MAX_SNIPPET_CHARS: usize = 1_600;
/// A digest with fewer non-whitespace characters than this is a failure,
/// not a degenerate success.
pub const MIN_CONTEXT_CHARS: usize = 30;
/// Headlines shorter than this are navigation noise, not headlines.
pub const HEADLINE_MIN_CHARS: usize = 8;
/// At most this many headlines make it into the digest.
pub const HEADLINE_CAP: usize = 6;

const DESCRIPTION_KEYS: [&str; 3] = ["description", "og:description", "twitter:description"];
const SOCIAL_TITLE_KEYS: [&str; 2] = ["og:title", "twitter:title"];

/// Fetches pages and assembles context digests. One instance holds one
/// reqwest client; extraction itself is stateless per call.
pub struct LinkExtractor {
    client: reqwest::Client,
}

impl LinkExtractor {
    pub fn new(config: &ExtractConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(config.timeout_secs))
                .user_agent(config.user_agent.clone())
                .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Validate that `raw` is an absolute http/https URL, returning the
    /// normalized (reparsed) form.
    pub fn validate_url(raw: &str) -> Result<Url, ExtractError> {
        let parsed = Url::parse(raw.trim()).map_err(|_| ExtractError::InvalidUrl)?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            _ => Err(ExtractError::InvalidUrl),
        }
    }

    /// Fetch `raw_url` and extract a bounded context digest from it.
    pub async fn extract(&self, raw_url: &str) -> Result<LinkContextData, ExtractError> {
        let url = Self::validate_url(raw_url)?;

        let response = self
            .client
            .get(url.as_str())
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Fetch {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();
        if !content_type.contains("text/html") {
            return Err(ExtractError::UnsupportedContentType(content_type));
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        let html = trim_to(&body, MAX_HTML_CHARS);

        tracing::debug!(url = %url, bytes = body.len(), "fetched page for extraction");
        build_context(&url, &html)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ExtractError {
    if err.is_timeout() {
        ExtractError::Timeout
    } else {
        ExtractError::Network(err.to_string())
    }
}

/// Assemble the labeled digest from whatever the page yields. Pure over the
/// (already truncated) HTML, so malformed pages can be tested offline.
pub fn build_context(url: &Url, html: &str) -> Result<LinkContextData, ExtractError> {
    let title = scan::first_element_inner(html, "title")
        .map(strip_tags)
        .unwrap_or_default();
    let description = meta_text(html, &DESCRIPTION_KEYS);
    let social_title = meta_text(html, &SOCIAL_TITLE_KEYS);
    let headlines = headline_lines(html);
    let snippet = trim_to(&strip_tags(scan::main_region(html)), MAX_SNIPPET_CHARS);

    let mut lines = vec![format!("URL: {url}")];
    if !title.is_empty() {
        lines.push(format!("Title: {title}"));
    }
    if !social_title.is_empty() && social_title != title {
        lines.push(format!("Social title: {social_title}"));
    }
    if !description.is_empty() {
        lines.push(format!("Description: {description}"));
    }
    if !headlines.is_empty() {
        lines.push(format!("Headlines: {}", headlines.join(" | ")));
    }
    if !snippet.is_empty() {
        lines.push(format!("Body: {snippet}"));
    }

    // Lossy by design: the cap lands after label assembly and may cut a
    // line mid-sentence.
    let context = trim_to(&lines.join("\n"), MAX_CONTEXT_CHARS);

    if context.chars().filter(|c| !c.is_whitespace()).count() < MIN_CONTEXT_CHARS {
        return Err(ExtractError::EmptyExtraction);
    }

    Ok(LinkContextData {
        source_url: url.to_string(),
        title,
        description,
        context,
    })
}

fn meta_text(html: &str, keys: &[&str]) -> String {
    scan::meta_content(html, keys)
        .map(|raw| strip_tags(&raw))
        .unwrap_or_default()
}

fn headline_lines(html: &str) -> Vec<String> {
    scan::headline_inners(html)
        .into_iter()
        .map(|inner| strip_tags(inner))
        .filter(|line| line.chars().count() > HEADLINE_MIN_CHARS)
        .take(HEADLINE_CAP)
        .collect()
}

/// Char-count truncation with an ellipsis marker when anything was cut.
fn trim_to(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("http://shop.example/desk").unwrap()
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(LinkExtractor::validate_url("ftp://example.com/a").is_err());
        assert!(LinkExtractor::validate_url("javascript:alert(1)").is_err());
        assert!(LinkExtractor::validate_url("not a url").is_err());
        assert!(LinkExtractor::validate_url("/relative/path").is_err());
    }

    #[test]
    fn accepts_and_normalizes_http_urls() {
        let url = LinkExtractor::validate_url("  HTTPS://Example.COM/page ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn digest_carries_labeled_lines() {
        let html = concat!(
            "<title>Desk</title>",
            r#"<meta name="description" content="Great desk.">"#,
            "<body><h1>Buy now and save!!</h1><p>Long body text for the digest, \
             enough to pass the minimum threshold.</p></body>",
        );
        let data = build_context(&url(), html).unwrap();
        assert_eq!(data.title, "Desk");
        assert_eq!(data.description, "Great desk.");
        assert!(data.context.contains("URL: http://shop.example/desk"));
        assert!(data.context.contains("Title: Desk"));
        assert!(data.context.contains("Description: Great desk."));
        assert!(data.context.contains("Headlines: Buy now and save!!"));
        assert!(data.context.contains("Body: "));
    }

    #[test]
    fn social_title_included_only_when_different() {
        let same = concat!(
            "<title>Desk</title>",
            r#"<meta property="og:title" content="Desk">"#,
            "<body><p>Plenty of body text so the digest clears the bar.</p></body>",
        );
        let data = build_context(&url(), same).unwrap();
        assert!(!data.context.contains("Social title:"));

        let different = concat!(
            "<title>Desk</title>",
            r#"<meta property="og:title" content="The Last Desk You Will Buy">"#,
            "<body><p>Plenty of body text so the digest clears the bar.</p></body>",
        );
        let data = build_context(&url(), different).unwrap();
        assert!(data.context.contains("Social title: The Last Desk You Will Buy"));
    }

    #[test]
    fn short_headlines_are_filtered_and_capped() {
        let mut html = String::from("<body>");
        html.push_str("<h2>Buy</h2>"); // <= 8 chars, dropped
        for i in 0..8 {
            html.push_str(&format!("<h2>Long headline number {i}</h2>"));
        }
        html.push_str("<p>Body text long enough to clear the minimum digest size.</p></body>");
        let data = build_context(&url(), &html).unwrap();
        let headline_line = data
            .context
            .lines()
            .find(|l| l.starts_with("Headlines:"))
            .unwrap();
        assert!(!headline_line.contains("Buy |"));
        assert_eq!(headline_line.matches('|').count(), HEADLINE_CAP - 1);
    }

    #[test]
    fn near_empty_page_is_a_failure() {
        let err = build_context(&Url::parse("http://a.io/").unwrap(), "<body></body>").unwrap_err();
        assert!(matches!(err, ExtractError::EmptyExtraction));
    }

    #[test]
    fn digest_is_capped_even_for_huge_pages() {
        let html = format!("<body><p>{}</p></body>", "word ".repeat(2000));
        let data = build_context(&url(), &html).unwrap();
        assert!(data.context.chars().count() <= MAX_CONTEXT_CHARS);
    }

    #[test]
    fn snippet_is_marked_when_truncated() {
        let html = format!("<body><p>{}</p></body>", "x".repeat(MAX_SNIPPET_CHARS + 50));
        let data = build_context(&url(), &html).unwrap();
        assert!(data.context.contains('…'));
    }
}
