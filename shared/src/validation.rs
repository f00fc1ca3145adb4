//! Validation utilities for the Amar Foshol platform
//!
//! Includes Bangladesh-specific validations alongside the forecast-window
//! checks callers run before invoking the advisory engine.

use rust_decimal::Decimal;

use crate::models::{DailyForecast, FORECAST_DAYS};

// ============================================================================
// Forecast Validations
// ============================================================================

/// Validate the shape of a forecast window before advisory evaluation
///
/// The advisory engine assumes exactly [`FORECAST_DAYS`] entries in
/// chronological order with no duplicate dates; this is the caller-side
/// check that enforces it.
pub fn validate_forecast_window(forecasts: &[DailyForecast]) -> Result<(), &'static str> {
    if forecasts.len() != FORECAST_DAYS {
        return Err("Forecast window must contain exactly 5 days");
    }
    for pair in forecasts.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err("Forecast days must be in chronological order without duplicates");
        }
    }
    for f in forecasts {
        if !(0..=100).contains(&f.humidity_percent) {
            return Err("Humidity must be between 0 and 100 percent");
        }
        if !(0..=100).contains(&f.rain_probability_percent) {
            return Err("Rain probability must be between 0 and 100 percent");
        }
    }
    Ok(())
}

/// Validate a percentage value
pub fn validate_percent(value: i32) -> Result<(), &'static str> {
    if (0..=100).contains(&value) {
        Ok(())
    } else {
        Err("Value must be between 0 and 100 percent")
    }
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate batch weight is positive
pub fn validate_batch_weight(weight_kg: Decimal) -> Result<(), &'static str> {
    if weight_kg <= Decimal::ZERO {
        return Err("Batch weight must be greater than zero");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

// ============================================================================
// Bangladesh-Specific Validations
// ============================================================================

/// Validate a Bangladeshi mobile number
/// Accepts: 01712345678, 017-1234-5678, +8801712345678
pub fn validate_bd_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // Local mobile: 11 digits starting with 01 (e.g., 01712345678)
    if digits.len() == 11 && digits.starts_with("01") {
        return Ok(());
    }
    // Without the leading zero: 10 digits starting with 1
    if digits.len() == 10 && digits.starts_with('1') {
        return Ok(());
    }
    // International format with country code: 13 digits starting with 880
    if digits.len() == 13 && digits.starts_with("880") {
        return Ok(());
    }

    Err("Invalid Bangladeshi phone number format")
}

/// Normalize a Bangladeshi phone number to local 01XXXXXXXXX form
pub fn normalize_bd_phone(phone: &str) -> Result<String, &'static str> {
    validate_bd_phone(phone)?;
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 13 {
        return Ok(format!("0{}", &digits[3..]));
    }
    if digits.len() == 10 {
        return Ok(format!("0{}", digits));
    }
    Ok(digits)
}
