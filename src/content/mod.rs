//! Content generation: validation, formulas, fallbacks, prompts, and the
//! orchestrating pipeline.

pub mod fallback;
pub mod formula;
pub mod pipeline;
pub mod prompt;
pub mod sanitize;
pub mod types;

pub use pipeline::ContentPipeline;
pub use types::{BlogParts, ContentFormat, GeneratedPost, ProductInfo, TargetPersona, Tone};
