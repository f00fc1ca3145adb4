//! HTTP handlers for crop risk endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use shared::models::CropType;

use crate::error::AppResult;
use crate::external::weather::OpenMeteoClient;
use crate::middleware::CurrentFarmer;
use crate::services::risk::{self, CropAlert, RiskAssessment};
use crate::services::WeatherService;
use crate::AppState;

/// Query parameters for a crop risk check
#[derive(Debug, Deserialize)]
pub struct RiskQuery {
    pub crop: CropType,
    pub division: String,
    pub district: String,
}

/// Risk assessment plus the alert it produced, if critical
#[derive(Debug, Serialize)]
pub struct RiskResponse {
    pub risk: RiskAssessment,
    pub alert: Option<CropAlert>,
}

/// Check tomorrow's weather risk for a crop at a district
pub async fn check_crop_risk(
    State(state): State<AppState>,
    _current_farmer: CurrentFarmer,
    Query(query): Query<RiskQuery>,
) -> AppResult<Json<RiskResponse>> {
    let client = OpenMeteoClient::new(
        state.config.weather.api_endpoint.clone(),
        state.config.weather.forecast_days,
    );
    let weather_service =
        WeatherService::with_client(state.db, client, state.config.weather.cache_minutes);

    let weather = weather_service
        .get_forecast_for_district(&query.division, &query.district)
        .await?;

    let tomorrow = risk::tomorrow_weather(&weather)?;
    let assessment = risk::calculate_risk(query.crop, &tomorrow);
    let alert = risk::build_alert(
        query.crop,
        &tomorrow,
        &assessment,
        &query.division,
        &query.district,
    );

    Ok(Json(RiskResponse {
        risk: assessment,
        alert,
    }))
}
