//! Weather API client for fetching forecast data
//!
//! Integrates with the Open-Meteo forecast API (keyless) for daily
//! five-day forecasts in the Asia/Dhaka timezone.

use chrono::{NaiveDate, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use shared::models::{DailyForecast, WeatherData};
use shared::types::GpsCoordinates;

use crate::error::{AppError, AppResult};

/// Daily variables requested from Open-Meteo
const DAILY_PARAMS: &str = "temperature_2m_max,temperature_2m_min,precipitation_probability_max,relative_humidity_2m_max";

/// Forecast timezone for all requests
const FORECAST_TIMEZONE: &str = "Asia/Dhaka";

/// Open-Meteo API client
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
    forecast_days: u32,
}

/// Open-Meteo API response for a daily forecast
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    latitude: f64,
    longitude: f64,
    timezone: String,
    daily: OpenMeteoDaily,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoDaily {
    time: Vec<NaiveDate>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    precipitation_probability_max: Vec<i32>,
    relative_humidity_2m_max: Vec<i32>,
}

impl OpenMeteoClient {
    /// Create a new OpenMeteoClient
    pub fn new(base_url: String, forecast_days: u32) -> Self {
        Self {
            client: Client::new(),
            base_url,
            forecast_days,
        }
    }

    /// Fetch a daily forecast by GPS coordinates
    pub async fn get_forecast(
        &self,
        latitude: Decimal,
        longitude: Decimal,
    ) -> AppResult<WeatherData> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&daily={}&forecast_days={}&timezone={}",
            self.base_url, latitude, longitude, DAILY_PARAMS, self.forecast_days, FORECAST_TIMEZONE
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Weather API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Weather API error: {} - {}", status, body);
            return Err(AppError::WeatherServiceUnavailable);
        }

        let data: OpenMeteoResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Failed to parse forecast response: {}", e)))?;

        Ok(convert_response(data))
    }
}

/// Convert an Open-Meteo response to our format
fn convert_response(data: OpenMeteoResponse) -> WeatherData {
    let daily = data.daily;
    let forecasts = daily
        .time
        .iter()
        .enumerate()
        .map(|(i, &date)| DailyForecast {
            date,
            temp_max_celsius: daily
                .temperature_2m_max
                .get(i)
                .and_then(|&t| Decimal::from_f64_retain(t))
                .unwrap_or_default(),
            temp_min_celsius: daily
                .temperature_2m_min
                .get(i)
                .and_then(|&t| Decimal::from_f64_retain(t))
                .unwrap_or_default(),
            humidity_percent: daily.relative_humidity_2m_max.get(i).copied().unwrap_or(0),
            rain_probability_percent: daily
                .precipitation_probability_max
                .get(i)
                .copied()
                .unwrap_or(0),
        })
        .collect();

    WeatherData {
        location: GpsCoordinates::new(
            Decimal::from_f64_retain(data.latitude).unwrap_or_default(),
            Decimal::from_f64_retain(data.longitude).unwrap_or_default(),
        ),
        timezone: data.timezone,
        forecasts,
        last_updated: Utc::now(),
    }
}

/// Count forecast days at or above a rain probability threshold
pub fn rainy_day_count(weather: &WeatherData, threshold_percent: i32) -> usize {
    weather
        .forecasts
        .iter()
        .filter(|f| f.rain_probability_percent >= threshold_percent)
        .count()
}

/// Peak rain probability across the forecast window
pub fn max_rain_probability(weather: &WeatherData) -> i32 {
    weather
        .forecasts
        .iter()
        .map(|f| f.rain_probability_percent)
        .max()
        .unwrap_or(0)
}
