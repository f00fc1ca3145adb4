//! Weather service for fetching and caching forecast data

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::locations;
use shared::models::WeatherData;

use crate::error::{AppError, AppResult};
use crate::external::weather::OpenMeteoClient;

/// Weather service for managing forecast data
#[derive(Clone)]
pub struct WeatherService {
    db: PgPool,
    client: Option<OpenMeteoClient>,
    cache_minutes: i64,
}

/// Cached weather forecast
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CachedForecast {
    pub id: Uuid,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub timezone: String,
    pub forecasts: serde_json::Value,
    pub fetched_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl WeatherService {
    /// Create a new WeatherService instance without an API client
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            client: None,
            cache_minutes: 30,
        }
    }

    /// Create a new WeatherService with a forecast API client
    pub fn with_client(db: PgPool, client: OpenMeteoClient, cache_minutes: i64) -> Self {
        Self {
            db,
            client: Some(client),
            cache_minutes,
        }
    }

    /// Cache forecast data
    pub async fn cache_forecast(&self, weather: &WeatherData) -> AppResult<CachedForecast> {
        let forecasts_json = serde_json::to_value(&weather.forecasts)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let expires_at = Utc::now() + Duration::minutes(self.cache_minutes);

        let cached = sqlx::query_as::<_, CachedForecast>(
            r#"
            INSERT INTO weather_forecasts (latitude, longitude, timezone, forecasts, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, latitude, longitude, timezone, forecasts, fetched_at, expires_at, created_at
            "#,
        )
        .bind(weather.location.latitude)
        .bind(weather.location.longitude)
        .bind(&weather.timezone)
        .bind(&forecasts_json)
        .bind(expires_at)
        .fetch_one(&self.db)
        .await?;

        Ok(cached)
    }

    /// Get cached forecast for a location if not expired
    pub async fn get_cached_forecast(
        &self,
        latitude: Decimal,
        longitude: Decimal,
    ) -> AppResult<Option<CachedForecast>> {
        let cached = sqlx::query_as::<_, CachedForecast>(
            r#"
            SELECT id, latitude, longitude, timezone, forecasts, fetched_at, expires_at, created_at
            FROM weather_forecasts
            WHERE ABS(latitude - $1) < 0.01
              AND ABS(longitude - $2) < 0.01
              AND expires_at > NOW()
            ORDER BY fetched_at DESC
            LIMIT 1
            "#,
        )
        .bind(latitude)
        .bind(longitude)
        .fetch_optional(&self.db)
        .await?;

        Ok(cached)
    }

    /// Fetch a forecast (from cache or API)
    pub async fn get_forecast(
        &self,
        latitude: Decimal,
        longitude: Decimal,
    ) -> AppResult<WeatherData> {
        // Check cache first
        if let Some(cached) = self.get_cached_forecast(latitude, longitude).await? {
            let forecasts = serde_json::from_value(cached.forecasts)
                .map_err(|e| AppError::Internal(e.to_string()))?;

            return Ok(WeatherData {
                location: shared::types::GpsCoordinates::new(cached.latitude, cached.longitude),
                timezone: cached.timezone,
                forecasts,
                last_updated: cached.fetched_at,
            });
        }

        // Fetch from API
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| AppError::Configuration("Weather API client not configured".to_string()))?;

        let weather = client.get_forecast(latitude, longitude).await?;

        // Cache the result
        let _ = self.cache_forecast(&weather).await;

        Ok(weather)
    }

    /// Fetch a forecast for a known division/district
    pub async fn get_forecast_for_district(
        &self,
        division: &str,
        district: &str,
    ) -> AppResult<WeatherData> {
        let coords = locations::district_coordinates(division, district)
            .ok_or_else(|| AppError::NotFound("District".to_string()))?;

        self.get_forecast(coords.latitude, coords.longitude).await
    }
}
