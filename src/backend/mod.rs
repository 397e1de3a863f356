//! Completion backends. The pipeline talks to a [`CompletionBackend`] trait
//! object so tests can substitute a canned stub for the real HTTP client.

pub mod openrouter;
pub mod parse;

pub use openrouter::OpenRouterBackend;

use async_trait::async_trait;

/// A single-turn completion provider: one prompt in, one text response out.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}
