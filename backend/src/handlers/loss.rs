//! HTTP handlers for loss prevention endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use shared::models::MonthlyLossSummary;

use crate::error::AppResult;
use crate::middleware::CurrentFarmer;
use crate::services::LossPreventionService;
use crate::AppState;

/// Query parameters for a monthly summary
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub month: u32,
    pub year: i32,
}

/// Compute the farmer's loss prevention summary for a month
pub async fn get_monthly_summary(
    State(state): State<AppState>,
    current_farmer: CurrentFarmer,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<MonthlyLossSummary>> {
    let service = LossPreventionService::new(state.db);
    let summary = service
        .compute_monthly(current_farmer.0.farmer_id, query.month, query.year)
        .await?;
    Ok(Json(summary))
}

/// Query parameters for recent summaries
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

/// List the farmer's recent monthly summaries
pub async fn get_loss_history(
    State(state): State<AppState>,
    current_farmer: CurrentFarmer,
    Query(query): Query<RecentQuery>,
) -> AppResult<Json<Vec<MonthlyLossSummary>>> {
    let service = LossPreventionService::new(state.db);
    let summaries = service
        .recent(current_farmer.0.farmer_id, query.limit)
        .await?;
    Ok(Json(summaries))
}
