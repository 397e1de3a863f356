#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod backend;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod extract;
pub mod gateway;

pub use config::Config;
pub use content::{
    BlogParts, ContentFormat, ContentPipeline, GeneratedPost, ProductInfo, TargetPersona, Tone,
};
pub use error::{BackendError, ExtractError, MillError, Result};
pub use extract::LinkExtractor;
