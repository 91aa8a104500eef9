//! HTTP routes and handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pixguard_core::ClassificationResult;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/predict-comment", post(classify_comment))
        .fallback(fallback)
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

/// Classification request carrying a single comment field
#[derive(Debug, Deserialize)]
struct ClassifyRequest {
    comment: String,
}

/// Classification response: the trimmed comment, the triggered labels in
/// canonical order, and a 0/1 score for every configured label
#[derive(Debug, Serialize)]
struct ClassifyResponse {
    comment: String,
    labels: Vec<String>,
    scores: ClassificationResult,
}

/// Main comment classification handler
async fn classify_comment(
    State(state): State<AppState>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, AppError> {
    metrics::counter!("pixguard_requests_total").increment(1);

    // Input validation happens here, before the classifier is invoked
    let comment = req.comment.trim();
    if comment.is_empty() {
        debug!("rejecting empty comment");
        metrics::counter!("pixguard_rejected_total").increment(1);
        return Err(AppError::EmptyComment);
    }

    let start = Instant::now();
    let result = state.classifier.classify(comment)?;
    metrics::histogram!("pixguard_classify_latency_us")
        .record(start.elapsed().as_micros() as f64);

    if result.is_flagged() {
        info!(labels = ?result.triggered_labels(), "comment flagged");
        metrics::counter!("pixguard_flagged_total").increment(1);
    }

    let labels = result
        .triggered_labels()
        .into_iter()
        .map(String::from)
        .collect();

    Ok(Json(ClassifyResponse {
        comment: comment.to_string(),
        labels,
        scores: result,
    }))
}

async fn fallback() -> &'static str {
    "Not found"
}

/// Error handling
#[derive(Debug)]
enum AppError {
    EmptyComment,
    Classification(pixguard_core::Error),
}

impl From<pixguard_core::Error> for AppError {
    fn from(err: pixguard_core::Error) -> Self {
        AppError::Classification(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::EmptyComment => (StatusCode::BAD_REQUEST, "Empty comment"),
            AppError::Classification(err) => {
                // Log the detail server-side; the client only gets a
                // generic message.
                error!("classification failed: {}", err);
                metrics::counter!("pixguard_errors_total").increment(1);
                (StatusCode::INTERNAL_SERVER_ERROR, "Classification failed")
            }
        };

        let body = json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
