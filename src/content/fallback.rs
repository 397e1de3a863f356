//! Deterministic, backend-free synthesis of structurally valid results.
//!
//! Everything here consumes only locally available data and must never fail:
//! this is the floor the user-facing flow lands on when the backend is down
//! or returns junk.

use crate::content::formula::chunk_by_length;
use crate::content::sanitize::{
    MAX_THREAD_POSTS, MIN_THREAD_POSTS, ensure_hashtag_prefix, finalize_thread_bodies,
    strip_thread_prefix,
};
use crate::content::types::{BlogParts, TargetPersona, Tone};
use regex::Regex;
use std::sync::LazyLock;

/// Target length for the primary chunking pass over blog paragraphs.
const PRIMARY_CHUNK_CHARS: usize = 230;
/// Shorter secondary pass used to top up a thin thread.
const SECONDARY_CHUNK_CHARS: usize = 150;
/// Posts collected from paragraphs before the secondary pass kicks in.
const PRIMARY_POST_TARGET: usize = 6;
/// The hashtag line is merged into the last post only below this length.
const HASHTAG_MERGE_CHARS: usize = 270;

const FALLBACK_TITLE: &str = "Key takeaways";
const GENERIC_CLOSERS: [&str; 2] = [
    "The key is to set criteria that fit your own situation first.",
    "Try it out and leave a comment where you get stuck.",
];

const EMPTY_THREAD_BODY: &str =
    "The thread source was empty, so a blog draft could not be assembled.";
const THREAD_BLOG_TITLE: &str = "A blog draft assembled from the thread";

static IMAGE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[IMAGE:[^\n\]]*\]").expect("image marker regex"));
static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank runs regex"));

/// Build a 4–7 post thread from an existing blog post, without any backend
/// call. Used both when blog-to-thread conversion fails and when thread
/// generation itself fails (with locally synthesized pseudo-content).
pub fn threads_from_blog(titles: &[String], content: &str, hashtags: &[String]) -> Vec<String> {
    let clean_title = titles
        .first()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .unwrap_or(FALLBACK_TITLE);

    let clean_content = BLANK_RUNS
        .replace_all(&IMAGE_MARKER.replace_all(content, ""), "\n\n")
        .trim()
        .to_string();

    let mut bodies: Vec<String> = vec![clean_title.to_string()];

    'paragraphs: for paragraph in clean_content.split('\n') {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }
        for part in chunk_by_length(paragraph, PRIMARY_CHUNK_CHARS) {
            if bodies.len() >= PRIMARY_POST_TARGET {
                break 'paragraphs;
            }
            bodies.push(part);
        }
    }

    // Top-up pass with shorter, deduplicated chunks over the whole body.
    for part in chunk_by_length(&clean_content, SECONDARY_CHUNK_CHARS) {
        if bodies.len() >= MAX_THREAD_POSTS {
            break;
        }
        if !bodies.contains(&part) {
            bodies.push(part);
        }
        if bodies.len() >= MIN_THREAD_POSTS {
            break;
        }
    }

    for closer in GENERIC_CLOSERS {
        if bodies.len() >= MIN_THREAD_POSTS {
            break;
        }
        bodies.push(closer.to_string());
    }

    bodies.truncate(MAX_THREAD_POSTS);

    let hashtag_text = ensure_hashtag_prefix(hashtags).join(" ").trim().to_string();
    if !hashtag_text.is_empty() {
        let last = bodies.len() - 1;
        let merged = format!("{}\n\n{hashtag_text}", bodies[last]);
        if merged.chars().count() <= HASHTAG_MERGE_CHARS {
            bodies[last] = merged;
        } else if bodies.len() < MAX_THREAD_POSTS {
            bodies.push(hashtag_text);
        }
    }

    finalize_thread_bodies(&bodies)
}

/// Rebuild blog parts from thread posts, without any backend call.
pub fn blog_from_threads(threads: &[String], hashtags: &[String]) -> BlogParts {
    let clean: Vec<String> = threads
        .iter()
        .map(|post| strip_thread_prefix(post))
        .filter(|post| !post.is_empty())
        .collect();

    let content = if clean.is_empty() {
        EMPTY_THREAD_BODY.to_string()
    } else {
        clean.join("\n\n")
    };

    BlogParts {
        titles: vec![THREAD_BLOG_TITLE.to_string()],
        content,
        hashtags: ensure_hashtag_prefix(hashtags),
    }
}

/// Fixed catalog used only when persona generation itself is unreachable.
/// Deliberately generic: not derived from product data.
pub fn personas() -> Vec<TargetPersona> {
    let catalog = [
        (
            "1",
            "Value shoppers",
            "Buyers who weigh price against performance first",
            "💰",
            Tone::Friendly,
        ),
        (
            "2",
            "Trend setters",
            "Readers who track what is new before anyone else",
            "✨",
            Tone::Heartfelt,
        ),
        (
            "3",
            "Expert group",
            "Users who care about capability and specifications",
            "🛠️",
            Tone::Professional,
        ),
        (
            "4",
            "Gift buyers",
            "People hunting for something worth giving",
            "🎁",
            Tone::Friendly,
        ),
    ];

    catalog
        .into_iter()
        .map(|(id, title, description, icon, tone)| TargetPersona {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            recommended_tone: tone,
        })
        .collect()
}
