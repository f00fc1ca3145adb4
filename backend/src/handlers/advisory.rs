//! HTTP handlers for advisory history endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use shared::models::Advisory;

use crate::error::AppResult;
use crate::middleware::CurrentFarmer;
use crate::services::AdvisoryService;
use crate::AppState;

/// Query parameters for advisory history
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// Get the farmer's advisory history, most recent first
pub async fn get_advisory_history(
    State(state): State<AppState>,
    current_farmer: CurrentFarmer,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<Advisory>>> {
    let service = AdvisoryService::new(state.db);
    let history = service
        .get_history(current_farmer.0.farmer_id, query.limit)
        .await?;
    Ok(Json(history))
}

/// Clear the farmer's advisory history
pub async fn clear_advisory_history(
    State(state): State<AppState>,
    current_farmer: CurrentFarmer,
) -> AppResult<Json<()>> {
    let service = AdvisoryService::new(state.db);
    service.clear_history(current_farmer.0.farmer_id).await?;
    Ok(Json(()))
}
