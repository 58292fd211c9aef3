use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::check_auth;
use crate::db::queries;
use crate::errors::AppError;
use crate::models::{AnalysisOutcome, DraftRecord};
use crate::services::analysis;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

// GET /api/analyses
pub async fn list_analyses(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<AnalysisOutcome>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let limit = query.limit.unwrap_or(50).clamp(1, 500);
    let analyses = {
        let db = state.db.lock().unwrap();
        queries::list_analyses(&db, limit)?
    };
    Ok(Json(analyses))
}

#[derive(Serialize)]
pub struct AnalysisDetail {
    #[serde(flatten)]
    analysis: AnalysisOutcome,
    drafts: Vec<DraftRecord>,
}

// GET /api/analyses/:id
pub async fn get_analysis(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<AnalysisDetail>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let db = state.db.lock().unwrap();
    let analysis = queries::get_analysis(&db, &id)?
        .ok_or_else(|| AppError::NotFound(format!("analysis {id}")))?;
    let drafts = queries::list_drafts_for_analysis(&db, &id)?;

    Ok(Json(AnalysisDetail { analysis, drafts }))
}

// POST /api/analyses/:id/draft
pub async fn create_draft(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<DraftRecord>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    if state.config.shopify_shop_domain.is_empty() {
        return Err(AppError::Config("SHOPIFY_SHOP_DOMAIN is not set".to_string()));
    }

    match analysis::create_draft(&state, &id).await {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err(AppError::NotFound(format!("analysis {id}"))),
        Err(e) => Err(AppError::Catalog(format!("{e:#}"))),
    }
}
