//! Normalization and validation of backend-returned payloads. The backend's
//! JSON is treated as hostile: every field is re-derived from scratch and
//! structural invariants are enforced before anything reaches a caller.

use crate::content::types::BlogParts;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// A thread below this many posts is not a usable result.
pub const MIN_THREAD_POSTS: usize = 4;
/// Threads are capped to this many posts.
pub const MAX_THREAD_POSTS: usize = 7;
/// Cap on title suggestions; the first surviving title is "best".
pub const MAX_TITLES: usize = 3;

pub const DEFAULT_HASHTAG: &str = "#copymill";
pub const PLACEHOLDER_TITLE: &str = "No title suggestions were generated.";

/// `N/M` numbering prefix carried by thread posts.
static THREAD_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s*/\s*\d+\s*").expect("thread prefix regex"));

/// Hook/Story/Offer section labels followed by a separator, with optional
/// markdown heading markers, bullets, or numbering. English and Korean forms.
static LABEL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^\s*(?:#{1,6}\s*)?(?:[-*]\s*)?(?:\d+\s*[.)]\s*)?(?:H\s*S\s*O|H/S/O|Hook|Story|Offer|후크|스토리|오퍼)\s*[:：-]\s*",
    )
    .expect("label prefix regex")
});

/// Lines that are nothing but a section label; deleted entirely.
static LABEL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^\s*(?:#{1,6}\s*)?(?:H\s*S\s*O|H/S/O|Hook|Story|Offer|후크|스토리|오퍼)\s*$",
    )
    .expect("label line regex")
});

static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank runs regex"));

static HASHTAG_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[\p{L}\p{N}_-]+").expect("hashtag token regex"));

/// Keep only non-empty trimmed strings from a JSON array; anything else in
/// the payload (numbers, nulls, nested junk) is silently dropped.
pub fn sanitize_string_array(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Force a single leading `#` on every tag, stripping pre-existing ones to
/// avoid doubling. An empty result substitutes the default tag.
pub fn ensure_hashtag_prefix(hashtags: &[String]) -> Vec<String> {
    let normalized: Vec<String> = hashtags
        .iter()
        .map(|tag| tag.trim().trim_start_matches('#'))
        .filter(|tag| !tag.is_empty())
        .map(|tag| format!("#{tag}"))
        .collect();

    if normalized.is_empty() {
        vec![DEFAULT_HASHTAG.to_string()]
    } else {
        normalized
    }
}

/// Harvest unique `#token` occurrences from free text, in document order.
pub fn extract_hashtags_from_text(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for found in HASHTAG_TOKEN.find_iter(text) {
        let tag = found.as_str().to_string();
        if !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    ensure_hashtag_prefix(&seen)
}

/// Remove a leading `N/M` numbering prefix from a thread post body.
pub fn strip_thread_prefix(text: &str) -> String {
    THREAD_PREFIX.replace(text, "").trim().to_string()
}

/// Strip numbering, drop empties, and re-number the survivors as `i/N`,
/// each number on its own leading line.
pub fn finalize_thread_bodies(bodies: &[String]) -> Vec<String> {
    let clean: Vec<String> = bodies
        .iter()
        .map(|body| strip_thread_prefix(body))
        .filter(|body| !body.is_empty())
        .collect();

    number_thread_bodies(&clean)
}

fn number_thread_bodies(clean: &[String]) -> Vec<String> {
    let total = clean.len();
    clean
        .iter()
        .enumerate()
        .map(|(index, body)| format!("{}/{}\n{}", index + 1, total, body))
        .collect()
}

/// Delete visible Hook/Story/Offer section labels. The HSO structure must
/// shape content internally without surfacing as headings.
pub fn strip_section_labels(content: &str) -> String {
    let without_prefixes = LABEL_PREFIX.replace_all(content, "");
    let without_lines = LABEL_LINE.replace_all(&without_prefixes, "");
    BLANK_RUNS
        .replace_all(&without_lines, "\n\n")
        .trim()
        .to_string()
}

/// Validate and normalize a blog payload. `None` means the payload is not
/// salvageable (missing or empty content after label stripping).
pub fn validate_blog_payload(raw: &Value) -> Option<BlogParts> {
    let data = raw.as_object()?;

    let mut titles = sanitize_string_array(data.get("titles"));
    titles.truncate(MAX_TITLES);

    let raw_content = data.get("content").and_then(Value::as_str).unwrap_or("");
    let content = strip_section_labels(raw_content);
    if content.is_empty() {
        return None;
    }

    let hashtags = ensure_hashtag_prefix(&sanitize_string_array(data.get("hashtags")));

    Some(BlogParts {
        titles: if titles.is_empty() {
            vec![PLACEHOLDER_TITLE.to_string()]
        } else {
            titles
        },
        content,
        hashtags,
    })
}

/// Validated thread payload: numbered posts plus normalized hashtags.
#[derive(Debug, Clone)]
pub struct ThreadParts {
    pub threads: Vec<String>,
    pub hashtags: Vec<String>,
}

/// Validate and normalize a thread payload. Posts above the cap are cut;
/// fewer than the minimum fails validation.
pub fn validate_thread_payload(raw: &Value) -> Option<ThreadParts> {
    let data = raw.as_object()?;

    let mut clean: Vec<String> = sanitize_string_array(data.get("threads"))
        .iter()
        .map(|body| strip_thread_prefix(body))
        .filter(|body| !body.is_empty())
        .collect();
    clean.truncate(MAX_THREAD_POSTS);
    if clean.len() < MIN_THREAD_POSTS {
        return None;
    }

    let hashtags = ensure_hashtag_prefix(&sanitize_string_array(data.get("hashtags")));

    Some(ThreadParts {
        threads: number_thread_bodies(&clean),
        hashtags,
    })
}
