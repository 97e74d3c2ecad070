use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use shuttle_axum::axum::{
    extract::{DefaultBodyLimit, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::compare::{group_results, ComparisonGroup, GroupBy};
use crate::explain::{explain, Explanation};
use crate::export::{export_filename, to_csv, to_json_report, ExportFormat};
use crate::history::StoreStats;
use crate::result::{BatchAnalysisResult, SentimentResult, Source};
use crate::sentiment::{ScoreDistribution, Sentiment};
use crate::service::{Analyzed, BatchError, SentimentService};
use crate::upload::{parse_upload, UploadError};
use crate::validate::{validate_text, ValidationError};

const DEFAULT_RESULTS_LIMIT: usize = 50;
// JSON escaping can double the content, plus room for the filename
const UPLOAD_JSON_OVERHEAD: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SentimentService>,
}

impl AppState {
    pub fn new(service: SentimentService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Errors surfaced to HTTP clients as `{error, message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation"),
            ApiError::Batch(BatchError::TooLarge { .. }) => (StatusCode::PAYLOAD_TOO_LARGE, "batch"),
            ApiError::Batch(_) => (StatusCode::BAD_REQUEST, "batch"),
            ApiError::Upload(UploadError::TooLarge { .. } | UploadError::TooManyTexts { .. }) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "upload")
            }
            ApiError::Upload(UploadError::UnsupportedFormat) => (StatusCode::BAD_REQUEST, "upload"),
            ApiError::Upload(_) => (StatusCode::UNPROCESSABLE_ENTITY, "upload"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        if status.is_server_error() {
            warn!(error = %self, "request failed");
        }
        let body = json!({ "error": kind, "message": self.to_string() });
        (status, Json(body)).into_response()
    }
}

/// Request body cap for `/upload`, so oversized files reach
/// [`UploadError::TooLarge`] instead of axum's 2 MB default.
fn upload_body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes
        .saturating_mul(2)
        .saturating_add(UPLOAD_JSON_OVERHEAD)
}

pub fn create_router(state: AppState) -> Router {
    let upload_limit = upload_body_limit(state.service.limits().max_upload_bytes);
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/analyze", post(analyze))
        .route("/batch", post(analyze_batch))
        .route(
            "/upload",
            post(upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/keywords", post(keywords))
        .route("/explain", post(explain_text))
        .route("/results", get(list_results).delete(clear_results))
        .route("/results/stats", get(results_stats))
        .route("/results/compare", get(compare_results))
        .route("/results/export", get(export_results))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Deserialize)]
struct AnalyzeReq {
    text: String,
    #[serde(default)]
    source: Option<Source>,
}

async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Result<Json<Analyzed>, ApiError> {
    let source = body.source.unwrap_or(Source::DirectInput);
    Ok(Json(state.service.analyze(&body.text, source)?))
}

#[derive(Deserialize)]
struct BatchReq {
    texts: Vec<String>,
    #[serde(default)]
    source: Option<Source>,
}

async fn analyze_batch(
    State(state): State<AppState>,
    Json(body): Json<BatchReq>,
) -> Result<Json<BatchAnalysisResult>, ApiError> {
    let source = body.source.unwrap_or(Source::BatchAnalysis);
    Ok(Json(state.service.analyze_batch(body.texts.as_slice(), source)?))
}

#[derive(Deserialize)]
struct UploadReq {
    filename: String,
    content: String,
}

#[derive(Serialize)]
struct UploadResp {
    filename: String,
    parsed: usize,
    warnings: Vec<String>,
    batch: BatchAnalysisResult,
}

async fn upload(
    State(state): State<AppState>,
    Json(body): Json<UploadReq>,
) -> Result<Json<UploadResp>, ApiError> {
    let parsed = parse_upload(&body.filename, &body.content, state.service.limits())?;
    let batch = state
        .service
        .analyze_batch(parsed.texts.as_slice(), Source::FileUpload)?;
    Ok(Json(UploadResp {
        filename: body.filename,
        parsed: parsed.texts.len(),
        warnings: parsed.warnings,
        batch,
    }))
}

#[derive(Deserialize)]
struct KeywordsReq {
    text: String,
    sentiment: Sentiment,
}

#[derive(Serialize)]
struct KeywordsResp {
    keywords: Vec<String>,
}

async fn keywords(
    State(state): State<AppState>,
    Json(body): Json<KeywordsReq>,
) -> Result<Json<KeywordsResp>, ApiError> {
    validate_text(&body.text, state.service.limits())?;
    let keywords = state
        .service
        .engine()
        .extract_keywords(body.text.trim(), body.sentiment);
    Ok(Json(KeywordsResp { keywords }))
}

#[derive(Deserialize)]
struct ExplainReq {
    text: String,
}

#[derive(Serialize)]
struct ExplainResp {
    result: SentimentResult,
    distribution: ScoreDistribution,
    explanation: Explanation,
}

async fn explain_text(
    State(state): State<AppState>,
    Json(body): Json<ExplainReq>,
) -> Result<Json<ExplainResp>, ApiError> {
    let (result, analysis) = state.service.evaluate(&body.text, Source::DirectInput)?;
    let explanation = explain(&result, &analysis, state.service.engine().lexicon());
    Ok(Json(ExplainResp {
        result,
        distribution: analysis.distribution,
        explanation,
    }))
}

#[derive(Deserialize)]
struct ResultsQuery {
    limit: Option<usize>,
}

async fn list_results(
    State(state): State<AppState>,
    Query(q): Query<ResultsQuery>,
) -> Json<Vec<SentimentResult>> {
    let n = q.limit.unwrap_or(DEFAULT_RESULTS_LIMIT);
    Json(state.service.store().snapshot_last_n(n))
}

async fn clear_results(State(state): State<AppState>) -> StatusCode {
    state.service.store().clear();
    crate::metrics::set_history_size(0);
    StatusCode::NO_CONTENT
}

async fn results_stats(State(state): State<AppState>) -> Json<StoreStats> {
    Json(state.service.store().stats())
}

#[derive(Deserialize)]
struct CompareQuery {
    #[serde(default)]
    by: GroupBy,
}

async fn compare_results(
    State(state): State<AppState>,
    Query(q): Query<CompareQuery>,
) -> Json<Vec<ComparisonGroup>> {
    let results = state.service.store().snapshot();
    Json(group_results(&results, q.by, Utc::now()))
}

#[derive(Deserialize)]
struct ExportQuery {
    #[serde(default)]
    format: ExportFormat,
}

async fn export_results(
    State(state): State<AppState>,
    Query(q): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let now = Utc::now();
    let results = state.service.store().snapshot();
    let body = match q.format {
        ExportFormat::Csv => to_csv(&results)?,
        ExportFormat::Json => to_json_report(&results, now)?,
    };
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_filename(q.format, now)
    );
    Ok((
        [
            (header::CONTENT_TYPE, q.format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_mapping() {
        let s = |e: ApiError| e.status_and_kind().0;
        assert_eq!(s(ValidationError::Empty.into()), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(s(BatchError::Empty.into()), StatusCode::BAD_REQUEST);
        assert_eq!(s(BatchError::TooLarge { max: 100 }.into()), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(s(UploadError::UnsupportedFormat.into()), StatusCode::BAD_REQUEST);
        assert_eq!(s(UploadError::TooLarge { max_mb: 5 }.into()), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(s(UploadError::NoValidTexts.into()), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(s(anyhow::anyhow!("boom").into()), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
