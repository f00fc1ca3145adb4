//! Weather integration tests
//!
//! Tests for forecast data handling:
//! - Forecast window shapes from the Open-Meteo daily response
//! - Cache validity logic
//! - Rain/temperature threshold helpers

use chrono::{Duration, NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use shared::models::{DailyForecast, FORECAST_DAYS};
use shared::validation::validate_forecast_window;

// Helper to create Decimal from integer degrees
fn deg(n: i64) -> Decimal {
    Decimal::from(n)
}

fn forecast_day(offset: u64, temp_max: i64, rain: i32) -> DailyForecast {
    DailyForecast {
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap() + chrono::Days::new(offset),
        temp_max_celsius: deg(temp_max),
        temp_min_celsius: deg(temp_max - 8),
        humidity_percent: 65,
        rain_probability_percent: rain,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A daily response row carries all four advisory inputs
    #[test]
    fn test_forecast_fields() {
        let f = forecast_day(0, 33, 45);
        assert_eq!(f.temp_max_celsius, deg(33));
        assert_eq!(f.temp_min_celsius, deg(25));
        assert_eq!(f.humidity_percent, 65);
        assert_eq!(f.rain_probability_percent, 45);
    }

    /// The standard window is five consecutive days
    #[test]
    fn test_window_shape() {
        let window: Vec<_> = (0..FORECAST_DAYS as u64)
            .map(|i| forecast_day(i, 30, 20))
            .collect();
        assert_eq!(window.len(), 5);
        assert!(validate_forecast_window(&window).is_ok());
    }

    /// Bangladesh coordinates sit inside the expected bounding box
    #[test]
    fn test_bd_coordinates_valid() {
        // Bangladesh approximate bounds: 20.5°N to 26.7°N, 88.0°E to 92.7°E
        let valid_coords = [
            (23.8103, 90.4125), // Dhaka
            (22.3569, 91.7832), // Chattogram
            (24.8917, 91.8722), // Sylhet
        ];

        for (lat, lon) in valid_coords {
            assert!(is_in_bangladesh(lat, lon));
        }
    }

    /// Coordinates outside Bangladesh are rejected by the bounding box
    #[test]
    fn test_coordinates_outside_bangladesh() {
        let invalid_coords = [
            (28.6139, 77.209),  // Delhi
            (13.7563, 100.5018), // Bangkok
        ];

        for (lat, lon) in invalid_coords {
            assert!(!is_in_bangladesh(lat, lon));
        }
    }

    fn is_in_bangladesh(lat: f64, lon: f64) -> bool {
        (20.5..=26.7).contains(&lat) && (88.0..=92.7).contains(&lon)
    }

    /// District lookups resolve to in-country coordinates
    #[test]
    fn test_district_coordinates_in_country() {
        for division in shared::locations::DIVISIONS {
            for district in division.districts {
                assert!(
                    is_in_bangladesh(district.latitude, district.longitude),
                    "{} / {} out of bounds",
                    division.name,
                    district.name
                );
            }
        }
    }

    /// Cache entries expire after their lifetime
    #[test]
    fn test_cache_validity() {
        let now = Utc::now();
        let fresh_expiry = now + Duration::minutes(30);
        let stale_expiry = now - Duration::minutes(1);

        assert!(is_cache_valid(fresh_expiry, now));
        assert!(!is_cache_valid(stale_expiry, now));
    }

    fn is_cache_valid(
        expires_at: chrono::DateTime<Utc>,
        now: chrono::DateTime<Utc>,
    ) -> bool {
        expires_at > now
    }

    /// Nearby coordinates share a cache slot; distant ones do not
    #[test]
    fn test_cache_coordinate_matching() {
        // Cache matches within 0.01 degrees
        assert!(coordinates_match(deg_frac(23, 8103), deg_frac(23, 8104)));
        assert!(!coordinates_match(deg_frac(23, 8103), deg_frac(23, 9103)));
    }

    fn deg_frac(whole: i64, frac: i64) -> Decimal {
        Decimal::from(whole) + Decimal::new(frac, 4)
    }

    fn coordinates_match(a: Decimal, b: Decimal) -> bool {
        (a - b).abs() < Decimal::new(1, 2)
    }

    /// Rainy day counting honors the threshold boundary
    #[test]
    fn test_rainy_day_count() {
        let window = vec![
            forecast_day(0, 30, 70),
            forecast_day(1, 30, 50),
            forecast_day(2, 30, 49),
            forecast_day(3, 30, 0),
            forecast_day(4, 30, 100),
        ];

        let count = window
            .iter()
            .filter(|f| f.rain_probability_percent >= 50)
            .count();
        assert_eq!(count, 3);
    }

    /// Heat stress threshold for advisories is strictly above 35°C
    #[test]
    fn test_heat_threshold_is_exclusive() {
        assert!(!is_heat_risk(deg(35)));
        assert!(is_heat_risk(deg(36)));
    }

    fn is_heat_risk(temp: Decimal) -> bool {
        temp > deg(35)
    }

    /// Cold threshold for advisories is strictly below 15°C
    #[test]
    fn test_cold_threshold_is_exclusive() {
        assert!(!is_cold_risk(deg(15)));
        assert!(is_cold_risk(deg(14)));
    }

    fn is_cold_risk(temp: Decimal) -> bool {
        temp < deg(15)
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating valid Bangladeshi latitudes
    fn bd_latitude_strategy() -> impl Strategy<Value = Decimal> {
        (205i64..=267i64).prop_map(|n| Decimal::new(n, 1)) // 20.5 to 26.7
    }

    /// Strategy for generating valid Bangladeshi longitudes
    fn bd_longitude_strategy() -> impl Strategy<Value = Decimal> {
        (880i64..=927i64).prop_map(|n| Decimal::new(n, 1)) // 88.0 to 92.7
    }

    /// Strategy for generating temperatures (typical Bangladesh range)
    fn temperature_strategy() -> impl Strategy<Value = Decimal> {
        (50i64..=450i64).prop_map(|n| Decimal::new(n, 1)) // 5.0 to 45.0°C
    }

    /// Strategy for generating percentage fields
    fn percent_strategy() -> impl Strategy<Value = i32> {
        0..=100i32
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Forecast fields stay inside their contractual ranges
        #[test]
        fn prop_forecast_fields_valid(
            lat in bd_latitude_strategy(),
            lon in bd_longitude_strategy(),
            temp in temperature_strategy(),
            humidity in percent_strategy(),
            rain in percent_strategy()
        ) {
            prop_assert!(lat >= Decimal::new(205, 1) && lat <= Decimal::new(267, 1));
            prop_assert!(lon >= Decimal::new(880, 1) && lon <= Decimal::new(927, 1));
            prop_assert!(temp >= Decimal::new(50, 1) && temp <= Decimal::new(450, 1));
            prop_assert!((0..=100).contains(&humidity));
            prop_assert!((0..=100).contains(&rain));
        }

        /// A window built from any five consecutive days validates
        #[test]
        fn prop_consecutive_window_validates(
            temps in prop::collection::vec(10i64..=40i64, 5),
            rains in prop::collection::vec(0i32..=100i32, 5)
        ) {
            let window: Vec<_> = (0..5u64)
                .map(|i| {
                    let mut f = forecast_day(i, temps[i as usize], rains[i as usize]);
                    f.humidity_percent = 60;
                    f
                })
                .collect();
            prop_assert!(validate_forecast_window(&window).is_ok());
        }

        /// Temperature risk classes never overlap
        #[test]
        fn prop_temperature_classes_disjoint(temp in temperature_strategy()) {
            let heat = temp > deg(35);
            let cold = temp < deg(15);
            prop_assert!(!(heat && cold));
        }

        /// Cache expiry comparison is consistent
        #[test]
        fn prop_cache_expiry_consistent(minutes in -120i64..=120i64) {
            let now = Utc::now();
            let expires_at = now + Duration::minutes(minutes);
            let valid = expires_at > now;
            prop_assert_eq!(valid, minutes > 0);
        }
    }
}
