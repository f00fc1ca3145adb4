//! WebAssembly module for the Amar Foshol platform
//!
//! Provides client-side computation for:
//! - Weather advisory generation (offline-capable)
//! - Forecast window validation
//! - Risk level labels and loss rate lookups
//! - Division/district reference data

use rust_decimal::prelude::ToPrimitive;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::advisory::generate_advisories;
use shared::locations;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Generate weather advisories for a forecast window
///
/// Takes a JSON array of daily forecasts and returns the generated
/// advisories as a JSON array, sorted by risk level.
#[wasm_bindgen]
pub fn generate_weather_advisories(forecasts_json: &str) -> Result<String, JsValue> {
    let forecasts: Vec<DailyForecast> = serde_json::from_str(forecasts_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid forecasts JSON: {}", e)))?;

    let advisories = generate_advisories(&forecasts);

    serde_json::to_string(&advisories)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Check whether a JSON forecast window is valid for advisory evaluation
#[wasm_bindgen]
pub fn check_forecast_window(forecasts_json: &str) -> bool {
    match serde_json::from_str::<Vec<DailyForecast>>(forecasts_json) {
        Ok(forecasts) => validate_forecast_window(&forecasts).is_ok(),
        Err(_) => false,
    }
}

/// Bangla label for a risk level (1-5)
#[wasm_bindgen]
pub fn advisory_risk_label_bn(level: u8) -> String {
    risk_level_label_bn(level).to_string()
}

/// Baseline loss rate for a storage type (e.g. "jute_bag")
#[wasm_bindgen]
pub fn storage_baseline_loss_rate(storage_type: &str) -> Result<f64, JsValue> {
    let storage: StorageType = storage_type
        .parse()
        .map_err(|e: &str| JsValue::from_str(e))?;

    Ok(baseline_loss_rate(storage).to_f64().unwrap_or(0.0))
}

/// Divisions and districts with coordinates, as JSON
#[wasm_bindgen]
pub fn list_divisions() -> String {
    let divisions: Vec<serde_json::Value> = locations::DIVISIONS
        .iter()
        .map(|division| {
            serde_json::json!({
                "name": division.name,
                "name_bn": division.name_bn,
                "districts": division.districts.iter().map(|d| {
                    serde_json::json!({
                        "name": d.name,
                        "name_bn": d.name_bn,
                        "latitude": d.latitude,
                        "longitude": d.longitude,
                    })
                }).collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({ "divisions": divisions }).to_string()
}
