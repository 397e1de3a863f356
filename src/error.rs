use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for copymill.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum MillError {
    // ── Link extraction ──────────────────────────────────────────────────
    #[error("extract: {0}")]
    Extract(#[from] ExtractError),

    // ── Language backend ─────────────────────────────────────────────────
    #[error("backend: {0}")]
    Backend(#[from] BackendError),

    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(String),

    // ── IO (listener binding, serving) ──────────────────────────────────
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Link extraction errors ─────────────────────────────────────────────────

/// Failures of the page-to-context extractor. These are the only errors the
/// crate surfaces to end users; generation failures are absorbed by fallback
/// synthesis instead.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("not a valid absolute http/https url")]
    InvalidUrl,

    #[error("upstream fetch returned status {status}")]
    Fetch { status: u16 },

    #[error("fetch timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("extracted context below minimum useful length")]
    EmptyExtraction,
}

// ─── Language backend errors ────────────────────────────────────────────────

/// Failures on the generation path. All three are caught inside the pipeline
/// and answered with locally synthesized content.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend call failed: {0}")]
    Call(String),

    #[error("no parseable JSON payload in backend response")]
    Parse,

    #[error("backend payload failed validation")]
    Validation,
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, MillError>;
