use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tokio::task::JoinSet;

use crate::db::queries::{self, NewAnalysis};
use crate::models::{
    AnalysisEvent, AnalysisOutcome, AnalysisRequest, AnalysisStatus, DraftRecord, ImageInput,
    ProductDraft,
};
use crate::services::extraction::extract;
use crate::services::prompt::build_prompt;
use crate::state::AppState;

/// Per-image result of a batch. A failed image never aborts its siblings.
#[derive(Debug, Serialize)]
pub struct BatchItem {
    pub index: usize,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<AnalysisOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn analyze_image(
    state: &Arc<AppState>,
    request: &AnalysisRequest,
    image: &ImageInput,
) -> anyhow::Result<AnalysisOutcome> {
    let image_ref = image.reference();
    let prompt = build_prompt(request);

    let reply = match state.vision.analyze(image, &prompt.text).await {
        Ok(reply) => reply,
        Err(e) => {
            publish(state, AnalysisEvent {
                analysis_id: None,
                image_ref: image_ref.clone(),
                status: AnalysisStatus::Failed,
                error: Some(e.to_string()),
                field_count: 0,
            });
            return Err(e.context(format!("vision analysis failed for {image_ref}")));
        }
    };

    let extraction = extract(&reply);

    tracing::info!(
        image = %image_ref,
        path = ?extraction.path,
        fields = extraction.fields.len(),
        "analyzed image"
    );

    let outcome = {
        let db = state.db.lock().unwrap();
        queries::insert_analysis(
            &db,
            &NewAnalysis {
                image_ref: &image_ref,
                prompt: &prompt.text,
                categories: &prompt.categories,
                fields: &extraction.fields,
                combined_text: &extraction.combined_text,
            },
        )?
    };

    publish(state, AnalysisEvent {
        analysis_id: Some(outcome.id.clone()),
        image_ref,
        status: if outcome.no_data {
            AnalysisStatus::NoData
        } else {
            AnalysisStatus::Completed
        },
        error: None,
        field_count: outcome.fields.len(),
    });

    Ok(outcome)
}

/// Analyzes every image concurrently. Results come back in input order.
pub async fn analyze_batch(
    state: &Arc<AppState>,
    request: &AnalysisRequest,
    images: Vec<ImageInput>,
) -> Vec<BatchItem> {
    let total = images.len();
    let mut tasks = JoinSet::new();

    for (index, image) in images.into_iter().enumerate() {
        let state = Arc::clone(state);
        let request = request.clone();
        tasks.spawn(async move {
            let result = analyze_image(&state, &request, &image).await;
            (index, result)
        });
    }

    let mut slots: Vec<Option<BatchItem>> = (0..total).map(|_| None).collect();

    while let Some(joined) = tasks.join_next().await {
        let (index, result) = match joined {
            Ok(done) => done,
            Err(e) => {
                tracing::error!(error = %e, "analysis task panicked");
                continue;
            }
        };

        slots[index] = Some(match result {
            Ok(outcome) => BatchItem {
                index,
                ok: true,
                outcome: Some(outcome),
                error: None,
            },
            Err(e) => {
                tracing::warn!(index, error = %e, "image analysis failed");
                BatchItem {
                    index,
                    ok: false,
                    outcome: None,
                    error: Some(format!("{e:#}")),
                }
            }
        });
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.unwrap_or_else(|| BatchItem {
                index,
                ok: false,
                outcome: None,
                error: Some("analysis task aborted".to_string()),
            })
        })
        .collect()
}

/// Pushes a stored analysis to the storefront as a draft product.
pub async fn create_draft(
    state: &Arc<AppState>,
    analysis_id: &str,
) -> anyhow::Result<Option<DraftRecord>> {
    let analysis = {
        let db = state.db.lock().unwrap();
        queries::get_analysis(&db, analysis_id)?
    };
    let Some(analysis) = analysis else {
        return Ok(None);
    };

    let image_url = analysis
        .image_ref
        .starts_with("http")
        .then_some(analysis.image_ref.as_str());
    let draft = ProductDraft::from_fields(&analysis.fields, image_url);

    let remote_id = state
        .catalog
        .create_draft(&draft)
        .await
        .context("failed to create storefront draft")?;

    let db = state.db.lock().unwrap();
    let record = queries::insert_draft(
        &db,
        analysis_id,
        &remote_id,
        &draft.title,
        draft.status.as_str(),
    )?;
    Ok(Some(record))
}

fn publish(state: &AppState, event: AnalysisEvent) {
    // No subscribers is the normal case outside the wizard UI.
    let _ = state.events_tx.send(event);
}
