//! Weather data models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;

/// Number of days in a forecast window
pub const FORECAST_DAYS: usize = 5;

/// Daily weather forecast
///
/// One entry per calendar day. An advisory evaluation consumes exactly
/// [`FORECAST_DAYS`] entries, chronologically ordered with no duplicate
/// dates; callers validate that shape before handing the window to the
/// advisory engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temp_max_celsius: Decimal,
    pub temp_min_celsius: Decimal,
    /// Relative humidity, 0-100
    pub humidity_percent: i32,
    /// Probability of precipitation, 0-100
    pub rain_probability_percent: i32,
}

/// Weather forecast for a location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherData {
    pub location: GpsCoordinates,
    pub timezone: String,
    pub forecasts: Vec<DailyForecast>,
    pub last_updated: DateTime<Utc>,
}
