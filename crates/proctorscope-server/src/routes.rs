//! HTTP routes and handlers

use axum::{
    extract::{Multipart, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use proctorscope_analysis::{analyze_batch, analyze_snapshot, Detector};
use proctorscope_core::{Assessment, BatchResponse, Error, SnapshotUpload};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = if state.config.permissive_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list([
                HeaderValue::from_static("http://localhost:8000"),
                HeaderValue::from_static("http://127.0.0.1:8000"),
            ]))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/analyze", post(analyze))
        .route("/analyze-batch", post(analyze_batch_handler))
        .fallback(fallback)
        .layer(cors)
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "model_loaded": state.detector.is_some(),
        "device": state.config.device,
    }))
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

/// Analyze one snapshot posted as multipart field `image`
async fn analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Assessment>, AppError> {
    metrics::counter!("proctorscope_requests_total", "endpoint" => "analyze").increment(1);

    let detector = require_detector(&state)?;
    let mut uploads = read_uploads(multipart, "image").await?;
    let upload = uploads
        .pop()
        .ok_or_else(|| AppError::InvalidRequest("Missing image field".to_string()))?;

    let start = Instant::now();
    let assessment = analyze_snapshot(detector.as_ref(), &state.taxonomy, &upload.bytes).await?;
    metrics::histogram!("proctorscope_analyze_latency_ms")
        .record(start.elapsed().as_secs_f64() * 1000.0);

    info!(
        filename = %upload.filename,
        risk_score = assessment.risk_score,
        "analyze request complete"
    );
    Ok(Json(assessment))
}

/// Analyze up to 10 snapshots posted as repeated multipart fields `images`
async fn analyze_batch_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<BatchResponse>, AppError> {
    metrics::counter!("proctorscope_requests_total", "endpoint" => "analyze_batch").increment(1);

    let detector = require_detector(&state)?;
    let uploads = read_uploads(multipart, "images").await?;

    let results = analyze_batch(detector.as_ref(), &state.taxonomy, uploads).await?;
    for result in &results {
        let outcome = if result.is_failure() { "failed" } else { "succeeded" };
        metrics::counter!("proctorscope_batch_items_total", "outcome" => outcome).increment(1);
    }

    info!(items = results.len(), "batch request complete");
    Ok(Json(BatchResponse::new(results)))
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// The analysis endpoints refuse work before the detector is available
fn require_detector(state: &AppState) -> Result<Arc<dyn Detector>, AppError> {
    state.detector.clone().ok_or(AppError::DetectorUnavailable)
}

/// Collect every multipart field named `field_name` into ordered uploads
async fn read_uploads(
    mut multipart: Multipart,
    field_name: &str,
) -> Result<Vec<SnapshotUpload>, AppError> {
    let mut uploads = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?
    {
        if field.name() != Some(field_name) {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidRequest(e.to_string()))?;
        uploads.push(SnapshotUpload::new(filename, bytes.to_vec()));
    }
    Ok(uploads)
}

/// Error handling
#[derive(Debug)]
pub enum AppError {
    DetectorUnavailable,
    InvalidRequest(String),
    BatchTooLarge,
    InternalError(String),
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        match err {
            Error::DetectorUnavailable(_) => AppError::DetectorUnavailable,
            Error::BatchTooLarge { .. } => AppError::BatchTooLarge,
            other => AppError::InternalError(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::DetectorUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "Model not loaded".to_string())
            }
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::BatchTooLarge => {
                (StatusCode::BAD_REQUEST, "Max 10 images per batch".to_string())
            }
            AppError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        warn!(status = %status, "request failed: {message}");
        let body = json!({ "detail": message });
        (status, Json(body)).into_response()
    }
}
