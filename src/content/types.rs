//! Wire-level data model for the content pipeline. Field names stay in
//! camelCase on the wire so existing front ends keep working.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// User-supplied product fields for one request. Immutable per invocation;
/// only the caller mutates it between requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductInfo {
    pub name: String,
    /// Product page URL, or empty when the user has none.
    pub link: String,
    pub description: String,
    pub reference_title: Option<String>,
    /// Digest produced by link extraction, if the caller ran it.
    pub reference_context: Option<String>,
}

/// The two interchangeable output formats.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ContentFormat {
    #[default]
    Blog,
    Thread,
}

/// Fixed tone set for generated copy. Unknown tones coming back from the
/// backend deserialize to `Friendly` rather than failing the whole persona
/// payload.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Tone {
    Professional,
    Heartfelt,
    #[default]
    #[serde(other)]
    Friendly,
}

/// A target-reader profile proposed by the backend (or the fixed fallback
/// catalog).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetPersona {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Single glyph, typically an emoji.
    pub icon: String,
    pub recommended_tone: Tone,
}

/// Bounded labeled digest extracted from a product page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkContextData {
    pub source_url: String,
    pub title: String,
    pub description: String,
    pub context: String,
}

/// The titles/content/hashtags slice of a post, as produced by blog
/// validation and thread-to-blog conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogParts {
    pub titles: Vec<String>,
    pub content: String,
    pub hashtags: Vec<String>,
}

/// A structurally valid generation result. Exactly one of `content` /
/// `threads` is populated per `primary_format`; the other side stays empty
/// until a conversion is run. Conversions build new values merging old and
/// new fields, never mutate in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPost {
    /// 1–3 suggestions, first is best.
    pub titles: Vec<String>,
    /// Blog body; may embed inline `[IMAGE: …]` placeholder markers.
    pub content: String,
    /// Each entry carries a leading `#`.
    pub hashtags: Vec<String>,
    /// Either empty or 4–7 posts, each prefixed with its `i/N` numbering.
    pub threads: Vec<String>,
    pub primary_format: ContentFormat,
}
