//! Advisory engine integration tests
//!
//! Exercises the shared rule engine end to end:
//! - Rule triggers and thresholds
//! - Mutual exclusion guards
//! - Sort and idempotence invariants

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use shared::advisory::generate_advisories;
use shared::models::{AdvisoryCondition, AdvisoryType, DailyForecast};
use shared::validation::validate_forecast_window;

/// Build a forecast day at an offset from a fixed base date
fn day(offset: u64, temp_max: i64, temp_min: i64, humidity: i32, rain: i32) -> DailyForecast {
    DailyForecast {
        date: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap() + chrono::Days::new(offset),
        temp_max_celsius: Decimal::from(temp_max),
        temp_min_celsius: Decimal::from(temp_min),
        humidity_percent: humidity,
        rain_probability_percent: rain,
    }
}

/// A window that fires nothing
fn benign_window() -> Vec<DailyForecast> {
    (0..5).map(|i| day(i, 32, 22, 72, 40)).collect()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Every day above 70% rain yields exactly one high_rain advisory
    #[test]
    fn test_uniform_high_rain() {
        let window: Vec<_> = (0..5).map(|i| day(i, 30, 22, 70, 80)).collect();
        let advisories = generate_advisories(&window);

        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].condition, AdvisoryCondition::HighRain);
        assert_eq!(advisories[0].risk_level, 5);
        assert_eq!(advisories[0].affected_days, 5);
    }

    /// Two days at 60% and the rest below 50% yields moderate_rain only
    #[test]
    fn test_moderate_rain_without_high_rain() {
        let mut window = benign_window();
        window[0].rain_probability_percent = 60;
        window[1].rain_probability_percent = 60;
        let advisories = generate_advisories(&window);

        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].condition, AdvisoryCondition::ModerateRain);
        assert_eq!(advisories[0].affected_days, 2);
    }

    /// A uniformly mild dry window yields ideal and suppresses clear_weather
    #[test]
    fn test_ideal_mutual_exclusion() {
        let window: Vec<_> = (0..5).map(|i| day(i, 25, 20, 60, 10)).collect();
        let advisories = generate_advisories(&window);

        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].condition, AdvisoryCondition::Ideal);
        assert_eq!(advisories[0].risk_level, 1);
        assert_eq!(advisories[0].advisory_type, AdvisoryType::Success);
    }

    /// One cold day in a benign window yields cold_temp with affected_days 1
    #[test]
    fn test_single_cold_day() {
        let mut window = benign_window();
        window[3].temp_min_celsius = Decimal::from(10);
        let advisories = generate_advisories(&window);

        let cold: Vec<_> = advisories
            .iter()
            .filter(|a| a.condition == AdvisoryCondition::ColdTemp)
            .collect();
        assert_eq!(cold.len(), 1);
        assert_eq!(cold[0].affected_days, 1);
        assert_eq!(cold[0].risk_level, 1);
    }

    /// high_rain and combined_risk are independent and can co-fire
    #[test]
    fn test_independent_critical_rules() {
        let window = vec![
            day(0, 33, 24, 85, 80),
            day(1, 34, 25, 82, 75),
            day(2, 32, 23, 81, 78),
            day(3, 28, 20, 60, 20),
            day(4, 27, 19, 55, 15),
        ];
        let advisories = generate_advisories(&window);
        let fired: Vec<_> = advisories.iter().map(|a| a.condition).collect();

        assert!(fired.contains(&AdvisoryCondition::HighRain));
        assert!(fired.contains(&AdvisoryCondition::CombinedRisk));
        assert!(!fired.contains(&AdvisoryCondition::Ideal));
        assert!(!fired.contains(&AdvisoryCondition::ClearWeather));
        assert!(!fired.contains(&AdvisoryCondition::ColdTemp));

        // Both critical rules at the head of the list
        assert_eq!(advisories[0].risk_level, 5);
        assert_eq!(advisories[1].risk_level, 5);
    }

    /// A benign window yields no advisories, not an error
    #[test]
    fn test_benign_window_is_empty() {
        assert!(generate_advisories(&benign_window()).is_empty());
    }

    /// Window validation catches malformed shapes before the engine runs
    #[test]
    fn test_window_validation() {
        let valid = benign_window();
        assert!(validate_forecast_window(&valid).is_ok());

        let short = &valid[..3];
        assert!(validate_forecast_window(short).is_err());

        let mut duplicated = valid.clone();
        duplicated[1].date = duplicated[0].date;
        assert!(validate_forecast_window(&duplicated).is_err());
    }

    /// The engine itself accepts what it is given; validation is the
    /// caller's job
    #[test]
    fn test_engine_does_not_validate() {
        // A 3-day slice still evaluates without panicking
        let window: Vec<_> = (0..3).map(|i| day(i, 30, 22, 60, 80)).collect();
        let advisories = generate_advisories(&window);
        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].condition, AdvisoryCondition::HighRain);
        assert_eq!(advisories[0].affected_days, 3);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for one forecast day with realistic Bangladeshi ranges
    fn forecast_day_strategy(offset: u64) -> impl Strategy<Value = DailyForecast> {
        (5i64..=45i64, 0i32..=100i32, 0i32..=100i32).prop_map(move |(temp_max, humidity, rain)| {
            DailyForecast {
                date: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap() + chrono::Days::new(offset),
                temp_max_celsius: Decimal::from(temp_max),
                temp_min_celsius: Decimal::from(temp_max - 8),
                humidity_percent: humidity,
                rain_probability_percent: rain,
            }
        })
    }

    /// Strategy for a full five-day window
    fn window_strategy() -> impl Strategy<Value = Vec<DailyForecast>> {
        (
            forecast_day_strategy(0),
            forecast_day_strategy(1),
            forecast_day_strategy(2),
            forecast_day_strategy(3),
            forecast_day_strategy(4),
        )
            .prop_map(|(a, b, c, d, e)| vec![a, b, c, d, e])
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Risk levels are non-increasing across any output
        #[test]
        fn prop_sorted_by_risk_descending(window in window_strategy()) {
            let advisories = generate_advisories(&window);
            for pair in advisories.windows(2) {
                prop_assert!(pair[0].risk_level >= pair[1].risk_level);
            }
        }

        /// Each condition fires at most once per evaluation
        #[test]
        fn prop_conditions_are_unique(window in window_strategy()) {
            let advisories = generate_advisories(&window);
            let mut conditions: Vec<_> = advisories.iter().map(|a| a.condition).collect();
            let before = conditions.len();
            conditions.sort_by_key(|c| c.as_str());
            conditions.dedup();
            prop_assert_eq!(before, conditions.len());
        }

        /// Two evaluations of the same window agree in content and order
        #[test]
        fn prop_idempotent(window in window_strategy()) {
            let a = generate_advisories(&window);
            let b = generate_advisories(&window);

            prop_assert_eq!(a.len(), b.len());
            for (x, y) in a.iter().zip(&b) {
                prop_assert_eq!(x.condition, y.condition);
                prop_assert_eq!(x.risk_level, y.risk_level);
                prop_assert_eq!(x.affected_days, y.affected_days);
                prop_assert_eq!(&x.message, &y.message);
            }
        }

        /// affected_days never exceeds the window length and never hits zero
        #[test]
        fn prop_affected_days_bounded(window in window_strategy()) {
            for advisory in generate_advisories(&window) {
                prop_assert!(advisory.affected_days >= 1);
                prop_assert!(advisory.affected_days <= window.len() as u32);
            }
        }

        /// The mutual exclusion guards hold on arbitrary input
        #[test]
        fn prop_exclusion_guards(window in window_strategy()) {
            let fired: Vec<_> = generate_advisories(&window)
                .iter()
                .map(|a| a.condition)
                .collect();

            if fired.contains(&AdvisoryCondition::HighRain) {
                prop_assert!(!fired.contains(&AdvisoryCondition::ModerateRain));
            }
            if fired.contains(&AdvisoryCondition::Ideal) {
                prop_assert!(!fired.contains(&AdvisoryCondition::ClearWeather));
            }
        }

        /// high_rain fires exactly when three or more days exceed 70%
        #[test]
        fn prop_high_rain_trigger(window in window_strategy()) {
            let qualifying = window
                .iter()
                .filter(|f| f.rain_probability_percent > 70)
                .count();
            let fired = generate_advisories(&window)
                .iter()
                .any(|a| a.condition == AdvisoryCondition::HighRain);

            prop_assert_eq!(fired, qualifying >= 3);
        }

        /// Risk level always matches the advisory type's class
        #[test]
        fn prop_risk_matches_type(window in window_strategy()) {
            for advisory in generate_advisories(&window) {
                match advisory.advisory_type {
                    AdvisoryType::Critical => prop_assert_eq!(advisory.risk_level, 5),
                    AdvisoryType::Warning => prop_assert_eq!(advisory.risk_level, 3),
                    AdvisoryType::Info | AdvisoryType::Success => {
                        prop_assert_eq!(advisory.risk_level, 1)
                    }
                }
            }
        }
    }
}
