//! HTTP handlers for crop batch endpoints

use axum::{
    extract::{Path, State},
    http::header,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use shared::models::{BatchStatus, CropBatch, Intervention};

use crate::error::AppResult;
use crate::middleware::CurrentFarmer;
use crate::services::batch::{
    CreateBatchInput, CropBatchService, RecordInterventionInput, UpdateBatchInput,
};
use crate::AppState;

/// Register a new crop batch
pub async fn create_batch(
    State(state): State<AppState>,
    current_farmer: CurrentFarmer,
    Json(input): Json<CreateBatchInput>,
) -> AppResult<Json<CropBatch>> {
    let service = CropBatchService::new(state.db);
    let batch = service
        .create_batch(current_farmer.0.farmer_id, input)
        .await?;
    Ok(Json(batch))
}

/// List the farmer's batches
pub async fn list_batches(
    State(state): State<AppState>,
    current_farmer: CurrentFarmer,
) -> AppResult<Json<Vec<CropBatch>>> {
    let service = CropBatchService::new(state.db);
    let batches = service.list_batches(current_farmer.0.farmer_id).await?;
    Ok(Json(batches))
}

/// Get a batch by ID
pub async fn get_batch(
    State(state): State<AppState>,
    current_farmer: CurrentFarmer,
    Path(batch_id): Path<Uuid>,
) -> AppResult<Json<CropBatch>> {
    let service = CropBatchService::new(state.db);
    let batch = service
        .get_batch(current_farmer.0.farmer_id, batch_id)
        .await?;
    Ok(Json(batch))
}

/// Update batch storage or notes
pub async fn update_batch(
    State(state): State<AppState>,
    current_farmer: CurrentFarmer,
    Path(batch_id): Path<Uuid>,
    Json(input): Json<UpdateBatchInput>,
) -> AppResult<Json<CropBatch>> {
    let service = CropBatchService::new(state.db);
    let batch = service
        .update_batch(current_farmer.0.farmer_id, batch_id, input)
        .await?;
    Ok(Json(batch))
}

/// Status change input
#[derive(Debug, Deserialize)]
pub struct StatusInput {
    pub status: BatchStatus,
}

/// Change a batch's lifecycle status
pub async fn change_batch_status(
    State(state): State<AppState>,
    current_farmer: CurrentFarmer,
    Path(batch_id): Path<Uuid>,
    Json(input): Json<StatusInput>,
) -> AppResult<Json<CropBatch>> {
    let service = CropBatchService::new(state.db);
    let batch = service
        .change_status(current_farmer.0.farmer_id, batch_id, input.status)
        .await?;
    Ok(Json(batch))
}

/// Record an intervention against a batch
pub async fn add_intervention(
    State(state): State<AppState>,
    current_farmer: CurrentFarmer,
    Path(batch_id): Path<Uuid>,
    Json(input): Json<RecordInterventionInput>,
) -> AppResult<Json<Intervention>> {
    let service = CropBatchService::new(state.db);
    let intervention = service
        .add_intervention(current_farmer.0.farmer_id, batch_id, input)
        .await?;
    Ok(Json(intervention))
}

/// List interventions for a batch
pub async fn list_interventions(
    State(state): State<AppState>,
    current_farmer: CurrentFarmer,
    Path(batch_id): Path<Uuid>,
) -> AppResult<Json<Vec<Intervention>>> {
    let service = CropBatchService::new(state.db);
    let interventions = service
        .list_interventions(current_farmer.0.farmer_id, batch_id)
        .await?;
    Ok(Json(interventions))
}

/// Export the farmer's batches as CSV
pub async fn export_batches_csv(
    State(state): State<AppState>,
    current_farmer: CurrentFarmer,
) -> AppResult<([(header::HeaderName, &'static str); 2], String)> {
    let service = CropBatchService::new(state.db);
    let csv = service.export_csv(current_farmer.0.farmer_id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"batches.csv\"",
            ),
        ],
        csv,
    ))
}

/// Export the farmer's batches as JSON
pub async fn export_batches_json(
    State(state): State<AppState>,
    current_farmer: CurrentFarmer,
) -> AppResult<Json<serde_json::Value>> {
    let service = CropBatchService::new(state.db);
    let batches = service.export_json(current_farmer.0.farmer_id).await?;
    Ok(Json(batches))
}
