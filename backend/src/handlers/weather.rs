//! HTTP handlers for weather and advisory generation endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use shared::locations;
use shared::models::{Advisory, WeatherData};

use crate::error::{AppError, AppResult};
use crate::external::weather::OpenMeteoClient;
use crate::middleware::CurrentFarmer;
use crate::services::{AdvisoryService, WeatherService};
use crate::AppState;

/// Build the weather service from application state
fn weather_service(state: &AppState) -> WeatherService {
    let client = OpenMeteoClient::new(
        state.config.weather.api_endpoint.clone(),
        state.config.weather.forecast_days,
    );
    WeatherService::with_client(state.db.clone(), client, state.config.weather.cache_minutes)
}

/// Query parameters for a forecast by coordinates
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

/// Get a weather forecast by coordinates
pub async fn get_forecast(
    State(state): State<AppState>,
    _current_farmer: CurrentFarmer,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<WeatherData>> {
    let service = weather_service(&state);
    let weather = service.get_forecast(query.latitude, query.longitude).await?;
    Ok(Json(weather))
}

/// Query parameters for a forecast by district
#[derive(Debug, Deserialize)]
pub struct DistrictQuery {
    pub division: String,
    pub district: String,
}

/// Get a weather forecast for a division/district
pub async fn get_forecast_for_district(
    State(state): State<AppState>,
    _current_farmer: CurrentFarmer,
    Query(query): Query<DistrictQuery>,
) -> AppResult<Json<WeatherData>> {
    let service = weather_service(&state);
    let weather = service
        .get_forecast_for_district(&query.division, &query.district)
        .await?;
    Ok(Json(weather))
}

/// Query parameters for advisory generation
///
/// Either coordinates or a division/district pair must be supplied.
#[derive(Debug, Deserialize)]
pub struct AdvisoryQuery {
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub division: Option<String>,
    pub district: Option<String>,
    /// Append the generated advisories to the farmer's history
    pub record: Option<bool>,
}

/// Forecast plus the advisories generated from it
#[derive(Debug, Serialize)]
pub struct AdvisoryResponse {
    pub weather: WeatherData,
    pub advisories: Vec<Advisory>,
}

/// Generate advisories for a location's forecast
pub async fn get_advisories(
    State(state): State<AppState>,
    current_farmer: CurrentFarmer,
    Query(query): Query<AdvisoryQuery>,
) -> AppResult<Json<AdvisoryResponse>> {
    let service = weather_service(&state);

    let weather = match (query.latitude, query.longitude, &query.division, &query.district) {
        (Some(lat), Some(lon), _, _) => service.get_forecast(lat, lon).await?,
        (_, _, Some(division), Some(district)) => {
            service.get_forecast_for_district(division, district).await?
        }
        _ => {
            return Err(AppError::Validation {
                field: "location".to_string(),
                message: "Provide either latitude/longitude or division/district".to_string(),
                message_bn: "অক্ষাংশ/দ্রাঘিমাংশ অথবা বিভাগ/জেলা দিন".to_string(),
            })
        }
    };

    let advisory_service = AdvisoryService::new(state.db.clone());
    let advisories = advisory_service.advisories_for(&weather)?;

    if query.record.unwrap_or(false) {
        advisory_service
            .record_history(current_farmer.0.farmer_id, &advisories)
            .await?;
    }

    Ok(Json(AdvisoryResponse { weather, advisories }))
}

/// List divisions and districts with coordinates
pub async fn list_locations(
    _current_farmer: CurrentFarmer,
) -> Json<serde_json::Value> {
    let divisions: Vec<_> = locations::DIVISIONS
        .iter()
        .map(|division| {
            json!({
                "name": division.name,
                "name_bn": division.name_bn,
                "districts": division.districts.iter().map(|d| {
                    json!({
                        "name": d.name,
                        "name_bn": d.name_bn,
                        "latitude": d.latitude,
                        "longitude": d.longitude,
                    })
                }).collect::<Vec<_>>(),
            })
        })
        .collect();

    Json(json!({ "divisions": divisions }))
}
