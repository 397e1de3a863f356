use crate::content::types::{ContentFormat, GeneratedPost, ProductInfo, TargetPersona, Tone};
use crate::error::ExtractError;
use crate::gateway::AppState;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;

// ─── Request bodies ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LinkContextQuery {
    pub url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonasBody {
    pub product: ProductInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    pub product: ProductInfo,
    pub persona: TargetPersona,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub format: ContentFormat,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertBody {
    pub post: GeneratedPost,
    #[serde(default)]
    pub tone: Tone,
    pub target: ContentFormat,
}

// ─── Handlers ───────────────────────────────────────────────────────────────

pub async fn health() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}

pub async fn link_context(
    State(state): State<AppState>,
    Query(query): Query<LinkContextQuery>,
) -> Response {
    let Some(url) = query.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "A valid http/https link is required.");
    };

    match state.extractor.extract(url).await {
        Ok(data) => Json(data).into_response(),
        Err(err) => extract_error_response(&err),
    }
}

pub async fn personas(
    State(state): State<AppState>,
    Json(body): Json<PersonasBody>,
) -> Response {
    let personas = state.pipeline.generate_personas(&body.product).await;
    Json(json!({ "personas": personas })).into_response()
}

pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Response {
    let post = state
        .pipeline
        .generate_post(&body.product, &body.persona, body.tone, body.format)
        .await;
    Json(post).into_response()
}

/// Convert an existing post to the other format, merging the result into a
/// new post value rather than mutating the input shape.
pub async fn convert(State(state): State<AppState>, Json(body): Json<ConvertBody>) -> Response {
    let mut post = body.post;
    match body.target {
        ContentFormat::Thread => {
            post.threads = state.pipeline.convert_blog_to_threads(&post, body.tone).await;
            post.primary_format = ContentFormat::Thread;
        }
        ContentFormat::Blog => {
            let parts = state
                .pipeline
                .convert_threads_to_blog(&post.threads, body.tone)
                .await;
            post.titles = parts.titles;
            post.content = parts.content;
            post.hashtags = parts.hashtags;
            post.primary_format = ContentFormat::Blog;
        }
    }
    Json(post).into_response()
}

// ─── Error mapping ──────────────────────────────────────────────────────────

/// Extraction errors split three ways: caller mistakes are 400, a reachable
/// page with nothing in it is 422, and transport trouble is 500.
fn extract_error_response(err: &ExtractError) -> Response {
    let (status, message) = match err {
        ExtractError::InvalidUrl => (
            StatusCode::BAD_REQUEST,
            "A valid http/https link is required.".to_string(),
        ),
        ExtractError::Fetch { status } => (
            StatusCode::BAD_REQUEST,
            format!("Link request failed: {status}"),
        ),
        ExtractError::UnsupportedContentType(_) => (
            StatusCode::BAD_REQUEST,
            "The link does not point to an HTML page.".to_string(),
        ),
        ExtractError::EmptyExtraction => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "No usable text could be extracted from the link.".to_string(),
        ),
        ExtractError::Timeout | ExtractError::Network(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "The link could not be fetched.".to_string(),
        ),
    };
    error_response(status, &message)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
