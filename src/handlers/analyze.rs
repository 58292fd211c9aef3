use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use super::check_auth;
use crate::errors::AppError;
use crate::models::{AnalysisOutcome, AnalysisRequest, ImageInput, PromptInstruction};
use crate::services::analysis::{self, BatchItem};
use crate::services::prompt::build_prompt;
use crate::state::AppState;

const MAX_BATCH: usize = 50;

// POST /api/prompt
pub async fn preview_prompt(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<PromptInstruction>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    Ok(Json(build_prompt(&request)))
}

#[derive(Deserialize)]
pub struct AnalyzePayload {
    #[serde(flatten)]
    pub request: AnalysisRequest,
    pub image: ImageInput,
}

// POST /api/analyze
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<AnalyzePayload>,
) -> Result<Json<AnalysisOutcome>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let outcome = analysis::analyze_image(&state, &payload.request, &payload.image)
        .await
        .map_err(|e| AppError::Vision(format!("{e:#}")))?;

    Ok(Json(outcome))
}

#[derive(Deserialize)]
pub struct BatchPayload {
    #[serde(flatten)]
    pub request: AnalysisRequest,
    pub images: Vec<ImageInput>,
}

// POST /api/analyze/batch
pub async fn analyze_batch(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<BatchPayload>,
) -> Result<Json<Vec<BatchItem>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    if payload.images.is_empty() {
        return Err(AppError::BadRequest("no images provided".to_string()));
    }
    if payload.images.len() > MAX_BATCH {
        return Err(AppError::BadRequest(format!(
            "at most {MAX_BATCH} images per batch"
        )));
    }

    tracing::info!(images = payload.images.len(), "starting batch analysis");
    let results = analysis::analyze_batch(&state, &payload.request, payload.images).await;
    Ok(Json(results))
}
