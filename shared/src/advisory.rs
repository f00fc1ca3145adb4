//! Weather-driven advisory rule engine
//!
//! Maps a five-day forecast window onto a ranked list of actionable
//! farming advisories. The engine is a pure classifier: no I/O, no
//! internal state, same window in, same advisories out (ids and
//! timestamps aside). Rules live in a declarative table evaluated in a
//! fixed order, with explicit suppression guards instead of nested
//! conditionals, so the rule set can be extended without touching the
//! evaluation loop.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{Advisory, AdvisoryCondition, AdvisoryType, DailyForecast};

/// Maximum number of advisories retained in a farmer's history log
pub const ADVISORY_HISTORY_CAP: usize = 100;

/// One entry of the rule table
struct Rule {
    condition: AdvisoryCondition,
    advisory_type: AdvisoryType,
    risk_level: u8,
    /// Minimum number of qualifying days for the rule to fire
    min_days: usize,
    /// Per-day predicate
    qualifies: fn(&DailyForecast) -> bool,
    /// The rule does not fire if this condition already fired
    suppressed_by: Option<AdvisoryCondition>,
}

fn deg(n: i64) -> Decimal {
    Decimal::from(n)
}

/// Canonical rule table. Table order is the evaluation order and breaks
/// risk-level ties in the output.
const RULES: &[Rule] = &[
    Rule {
        condition: AdvisoryCondition::HighRain,
        advisory_type: AdvisoryType::Critical,
        risk_level: 5,
        min_days: 3,
        qualifies: |f| f.rain_probability_percent > 70,
        suppressed_by: None,
    },
    Rule {
        condition: AdvisoryCondition::ModerateRain,
        advisory_type: AdvisoryType::Warning,
        risk_level: 3,
        min_days: 2,
        qualifies: |f| f.rain_probability_percent >= 50 && f.rain_probability_percent <= 70,
        suppressed_by: Some(AdvisoryCondition::HighRain),
    },
    Rule {
        condition: AdvisoryCondition::HighTemp,
        advisory_type: AdvisoryType::Warning,
        risk_level: 3,
        min_days: 1,
        qualifies: |f| f.temp_max_celsius > deg(35),
        suppressed_by: None,
    },
    Rule {
        condition: AdvisoryCondition::HighHumidity,
        advisory_type: AdvisoryType::Warning,
        risk_level: 3,
        min_days: 1,
        qualifies: |f| f.humidity_percent > 80,
        suppressed_by: None,
    },
    Rule {
        condition: AdvisoryCondition::CombinedRisk,
        advisory_type: AdvisoryType::Critical,
        risk_level: 5,
        min_days: 1,
        qualifies: |f| f.rain_probability_percent > 50 && f.humidity_percent > 75,
        suppressed_by: None,
    },
    Rule {
        condition: AdvisoryCondition::ColdTemp,
        advisory_type: AdvisoryType::Info,
        risk_level: 1,
        min_days: 1,
        qualifies: |f| f.temp_min_celsius < deg(15),
        suppressed_by: None,
    },
    Rule {
        condition: AdvisoryCondition::Ideal,
        advisory_type: AdvisoryType::Success,
        risk_level: 1,
        min_days: 2,
        qualifies: |f| {
            f.rain_probability_percent < 30
                && f.temp_max_celsius >= deg(20)
                && f.temp_max_celsius <= deg(30)
                && f.humidity_percent >= 50
                && f.humidity_percent <= 70
        },
        suppressed_by: None,
    },
    Rule {
        condition: AdvisoryCondition::ClearWeather,
        advisory_type: AdvisoryType::Info,
        risk_level: 1,
        min_days: 3,
        qualifies: |f| f.rain_probability_percent < 30,
        suppressed_by: Some(AdvisoryCondition::Ideal),
    },
];

/// Generate advisories for a five-day forecast window
///
/// Evaluates every rule of the table against the full window and returns
/// one advisory per fired rule, sorted by risk level descending; equal
/// risk levels keep the table order. A window with no qualifying day for
/// any rule yields an empty list. The caller is responsible for handing
/// in a well-formed window (see
/// [`crate::validation::validate_forecast_window`]); the engine does not
/// defensively validate.
pub fn generate_advisories(forecasts: &[DailyForecast]) -> Vec<Advisory> {
    let now = Utc::now();
    let mut fired: Vec<AdvisoryCondition> = Vec::new();
    let mut advisories: Vec<Advisory> = Vec::new();

    for rule in RULES {
        if let Some(guard) = rule.suppressed_by {
            if fired.contains(&guard) {
                continue;
            }
        }

        let qualifying: Vec<&DailyForecast> =
            forecasts.iter().filter(|f| (rule.qualifies)(f)).collect();
        if qualifying.len() < rule.min_days {
            continue;
        }

        fired.push(rule.condition);
        advisories.push(build_advisory(rule, &qualifying, now));
    }

    // Stable sort: ties keep rule-table order
    advisories.sort_by(|a, b| b.risk_level.cmp(&a.risk_level));
    advisories
}

fn build_advisory(rule: &Rule, qualifying: &[&DailyForecast], now: DateTime<Utc>) -> Advisory {
    let texts = AdvisoryTexts::for_condition(rule.condition, qualifying);

    Advisory {
        id: Uuid::new_v4(),
        advisory_type: rule.advisory_type,
        title: texts.title,
        title_bn: texts.title_bn,
        message: texts.message,
        message_bn: texts.message_bn,
        action: texts.action,
        action_bn: texts.action_bn,
        risk_level: rule.risk_level,
        affected_days: qualifying.len() as u32,
        condition: rule.condition,
        timestamp: now,
    }
}

struct AdvisoryTexts {
    title: String,
    title_bn: String,
    message: String,
    message_bn: String,
    action: String,
    action_bn: String,
}

impl AdvisoryTexts {
    /// Human-readable texts for a fired rule. Messages name the exact
    /// qualifying-day count and, where relevant, the peak value among
    /// qualifying days.
    fn for_condition(condition: AdvisoryCondition, qualifying: &[&DailyForecast]) -> Self {
        let days = qualifying.len();
        match condition {
            AdvisoryCondition::HighRain => Self {
                title: "Rain warning".into(),
                title_bn: "বৃষ্টির সতর্কতা ⚠️".into(),
                message: format!(
                    "{days} of the next 5 days carry more than 70% rain probability."
                ),
                message_bn: format!(
                    "আগামী ৫ দিনে {days} দিন ৭০% এর বেশি বৃষ্টির সম্ভাবনা রয়েছে।"
                ),
                action: "Harvest paddy immediately and store it under cover. Keep jute sacks \
                         raised and in a ventilated spot."
                    .into(),
                action_bn: "অবিলম্বে ধান কাটুন এবং সুরক্ষিত জায়গায় সংরক্ষণ করুন। পাটের বস্তা উঁচু এবং বাতাসপূর্ণ স্থানে রাখুন।"
                    .into(),
            },
            AdvisoryCondition::ModerateRain => Self {
                title: "Moderate rain warning".into(),
                title_bn: "মধ্যম বৃষ্টির সতর্কতা".into(),
                message: format!("{days} days carry a 50-70% rain probability."),
                message_bn: format!("{days} দিন ৫০-৭০% বৃষ্টির সম্ভাবনা রয়েছে।"),
                action: "Store crops once they are half dry. Keep them in a room with \
                         ventilation so air keeps moving."
                    .into(),
                action_bn: "ফসল অর্ধেক শুকানো হলে সংরক্ষণ করুন। ভেন্টিলেশন সহ ঘরে রাখুন যাতে বাতাস চলাচল হয়।"
                    .into(),
            },
            AdvisoryCondition::HighTemp => {
                let peak = qualifying
                    .iter()
                    .map(|f| f.temp_max_celsius)
                    .max()
                    .unwrap_or_default()
                    .round();
                Self {
                    title: "High temperature warning".into(),
                    title_bn: "উচ্চ তাপমাত্রা সতর্কতা".into(),
                    message: format!("Temperatures will climb up to {peak}°C."),
                    message_bn: format!("তাপমাত্রা {peak}°সে পর্যন্ত উঠবে।"),
                    action: "Keep crops in shade or indoors during the day (10am to 4pm). \
                             Spread them out in the morning or evening and sprinkle water as \
                             needed."
                        .into(),
                    action_bn: "দিনের বেলা (১০টা থেকে ৪টা) ছায়ায় বা ঘরে রাখুন। সকাল বা সন্ধ্যায় ছড়িয়ে দিন। পরিমাণ অনুযায়ী পানি ছিটিয়ে দিন।"
                        .into(),
                }
            }
            AdvisoryCondition::HighHumidity => {
                let peak = qualifying
                    .iter()
                    .map(|f| f.humidity_percent)
                    .max()
                    .unwrap_or(0);
                Self {
                    title: "High humidity warning".into(),
                    title_bn: "উচ্চ আর্দ্রতা সতর্কতা".into(),
                    message: format!(
                        "Humidity will reach {peak}%, which is unsuitable for drying crops."
                    ),
                    message_bn: format!(
                        "আর্দ্রতা {peak}% এর উপরে থাকবে যা ফসল শুকানোর জন্য অনুপযুক্ত।"
                    ),
                    action: "Store in a large roofed space where air can circulate. Turn the \
                             crop three times a day."
                        .into(),
                    action_bn: "বড় ছাদযুক্ত ঘরে সংরক্ষণ করুন যেখানে বাতাস চলাচল করতে পারে। প্রতিদিন তিনবার নেড়ে দিন।"
                        .into(),
                }
            }
            AdvisoryCondition::CombinedRisk => Self {
                title: "Highest risk".into(),
                title_bn: "সর্বোচ্চ ঝুঁকি ⚠️".into(),
                message: format!("Rain and humidity will both be high on {days} days."),
                message_bn: format!("{days} দিন বৃষ্টি এবং আর্দ্রতা উভয়ই বেশি থাকবে।"),
                action: "Do not leave crops outdoors on these days. Keep them in a sealed, \
                         roofed store, measure moisture regularly, and increase airflow."
                    .into(),
                action_bn: "এই দিনগুলিতে বাইরে রাখবেন না। সিলিং ছাদযুক্ত গুদামে রাখুন। নিয়মিত আর্দ্রতা পরিমাপ করুন এবং বায়ু সঞ্চালন বাড়ান।"
                    .into(),
            },
            AdvisoryCondition::ColdTemp => {
                let low = qualifying
                    .iter()
                    .map(|f| f.temp_min_celsius)
                    .min()
                    .unwrap_or_default()
                    .round();
                Self {
                    title: "Cool weather".into(),
                    title_bn: "শীতল আবহাওয়া".into(),
                    message: format!("Temperatures will dip to {low}°C."),
                    message_bn: format!("তাপমাত্রা {low}°সে পর্যন্ত নেমে আসবে।"),
                    action: "Follow winter storage practices. Crops generally keep well but \
                             cover them properly."
                        .into(),
                    action_bn: "শীতকালীন সংরক্ষণ ব্যবস্থা অবলম্বন করুন। ফসল সাধারণত ভালো থাকে কিন্তু ভালোভাবে ঢেকে রাখুন।"
                        .into(),
                }
            }
            AdvisoryCondition::Ideal => Self {
                title: "Good window".into(),
                title_bn: "উপযুক্ত সময় ✓".into(),
                message: format!("{days} days of ideal weather for drying crops."),
                message_bn: format!("{days} দিন ফসল শুকানোর জন্য আদর্শ আবহাওয়া থাকবে।"),
                action: "Dry crops quickly in the sun or breeze on these days. Make the most \
                         of them and store the crop fully dried."
                    .into(),
                action_bn: "এই দিনগুলিতে ফসল রোদে বা বাতাসে দ্রুত শুকান। সর্বোচ্চ সুবিধা নিন এবং ফসল সম্পূর্ণ শুকিয়ে সংরক্ষণ করুন।"
                    .into(),
            },
            AdvisoryCondition::ClearWeather => Self {
                title: "Clear weather".into(),
                title_bn: "পরিষ্কার আবহাওয়া".into(),
                message: format!("Low chance of rain over the next {days} days."),
                message_bn: format!("আগামী {days} দিন বৃষ্টি হওয়ার সম্ভাবনা কম থাকবে।"),
                action: "Best time to dry crops. Spread them in the sun and turn them \
                         regularly."
                    .into(),
                action_bn: "এই সময়ে ফসল শুকানোর জন্য সর্বোত্তম সময়। রোদে ছড়িয়ে দিন এবং নিয়মিত নেড়ে দিন।"
                    .into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(offset: u64, temp_max: i64, temp_min: i64, humidity: i32, rain: i32) -> DailyForecast {
        DailyForecast {
            date: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap() + chrono::Days::new(offset),
            temp_max_celsius: Decimal::from(temp_max),
            temp_min_celsius: Decimal::from(temp_min),
            humidity_percent: humidity,
            rain_probability_percent: rain,
        }
    }

    fn benign_window() -> Vec<DailyForecast> {
        (0..5).map(|i| day(i, 32, 22, 72, 40)).collect()
    }

    fn conditions(advisories: &[Advisory]) -> Vec<AdvisoryCondition> {
        advisories.iter().map(|a| a.condition).collect()
    }

    #[test]
    fn all_rainy_days_fire_high_rain_only() {
        let window: Vec<_> = (0..5).map(|i| day(i, 32, 22, 74, 80)).collect();
        let advisories = generate_advisories(&window);

        assert_eq!(conditions(&advisories), vec![AdvisoryCondition::HighRain]);
        assert_eq!(advisories[0].risk_level, 5);
        assert_eq!(advisories[0].affected_days, 5);
        assert_eq!(advisories[0].advisory_type, AdvisoryType::Critical);
    }

    #[test]
    fn moderate_rain_fires_without_high_rain() {
        let mut window = benign_window();
        window[0].rain_probability_percent = 60;
        window[1].rain_probability_percent = 60;
        let advisories = generate_advisories(&window);

        assert_eq!(
            conditions(&advisories),
            vec![AdvisoryCondition::ModerateRain]
        );
        assert_eq!(advisories[0].affected_days, 2);
    }

    #[test]
    fn high_rain_suppresses_moderate_rain() {
        // Three days above 70% and two days in the moderate band
        let mut window = benign_window();
        for f in window.iter_mut().take(3) {
            f.rain_probability_percent = 85;
            f.humidity_percent = 60;
        }
        window[3].rain_probability_percent = 60;
        window[4].rain_probability_percent = 55;

        let fired = conditions(&generate_advisories(&window));
        assert!(fired.contains(&AdvisoryCondition::HighRain));
        assert!(!fired.contains(&AdvisoryCondition::ModerateRain));
    }

    #[test]
    fn exactly_70_percent_counts_as_moderate_not_high() {
        let mut window = benign_window();
        for f in window.iter_mut().take(3) {
            f.rain_probability_percent = 70;
            f.humidity_percent = 60;
        }
        let fired = conditions(&generate_advisories(&window));
        assert!(!fired.contains(&AdvisoryCondition::HighRain));
        assert!(fired.contains(&AdvisoryCondition::ModerateRain));
    }

    #[test]
    fn ideal_suppresses_clear_weather() {
        let window: Vec<_> = (0..5).map(|i| day(i, 25, 20, 60, 10)).collect();
        let advisories = generate_advisories(&window);

        assert_eq!(conditions(&advisories), vec![AdvisoryCondition::Ideal]);
        assert_eq!(advisories[0].risk_level, 1);
        assert_eq!(advisories[0].advisory_type, AdvisoryType::Success);
    }

    #[test]
    fn clear_weather_fires_when_not_ideal() {
        // Dry but too humid for the ideal band
        let window: Vec<_> = (0..5).map(|i| day(i, 25, 20, 78, 10)).collect();
        let fired = conditions(&generate_advisories(&window));
        assert_eq!(fired, vec![AdvisoryCondition::ClearWeather]);
    }

    #[test]
    fn single_cold_day_fires_cold_temp() {
        let mut window = benign_window();
        window[2].temp_min_celsius = Decimal::from(10);
        let advisories = generate_advisories(&window);

        let cold: Vec<_> = advisories
            .iter()
            .filter(|a| a.condition == AdvisoryCondition::ColdTemp)
            .collect();
        assert_eq!(cold.len(), 1);
        assert_eq!(cold[0].affected_days, 1);
        assert!(cold[0].message.contains("10"));
    }

    #[test]
    fn high_temp_message_names_peak() {
        let mut window = benign_window();
        window[1].temp_max_celsius = Decimal::from(37);
        window[3].temp_max_celsius = Decimal::from(39);
        let advisories = generate_advisories(&window);

        let hot = advisories
            .iter()
            .find(|a| a.condition == AdvisoryCondition::HighTemp)
            .expect("high_temp advisory");
        assert_eq!(hot.affected_days, 2);
        assert!(hot.message.contains("39"));
        assert!(hot.message_bn.contains("39"));
    }

    #[test]
    fn high_rain_and_combined_risk_are_independent() {
        // Three wet humid days followed by two dry mild days
        let window = vec![
            day(0, 33, 24, 85, 80),
            day(1, 34, 25, 82, 75),
            day(2, 32, 23, 81, 78),
            day(3, 28, 20, 60, 20),
            day(4, 27, 19, 55, 15),
        ];
        let advisories = generate_advisories(&window);
        let fired = conditions(&advisories);

        assert!(fired.contains(&AdvisoryCondition::HighRain));
        assert!(fired.contains(&AdvisoryCondition::CombinedRisk));
        assert!(!fired.contains(&AdvisoryCondition::Ideal));
        assert!(!fired.contains(&AdvisoryCondition::ClearWeather));
        assert!(!fired.contains(&AdvisoryCondition::ColdTemp));

        // Both critical advisories lead, high_rain first (table order tie-break)
        assert_eq!(advisories[0].condition, AdvisoryCondition::HighRain);
        assert_eq!(advisories[0].risk_level, 5);
        assert_eq!(advisories[1].condition, AdvisoryCondition::CombinedRisk);
        assert_eq!(advisories[1].risk_level, 5);
        // high_humidity also fires on the humid days
        assert!(fired.contains(&AdvisoryCondition::HighHumidity));
    }

    #[test]
    fn benign_window_yields_nothing() {
        assert!(generate_advisories(&benign_window()).is_empty());
    }

    #[test]
    fn output_sorted_by_risk_descending() {
        let mut window = benign_window();
        window[0].rain_probability_percent = 90;
        window[0].humidity_percent = 85;
        window[1].temp_max_celsius = Decimal::from(38);
        window[2].temp_min_celsius = Decimal::from(8);
        let advisories = generate_advisories(&window);

        assert!(!advisories.is_empty());
        for pair in advisories.windows(2) {
            assert!(pair[0].risk_level >= pair[1].risk_level);
        }
    }

    #[test]
    fn same_window_generates_identical_content() {
        let window = vec![
            day(0, 36, 14, 85, 75),
            day(1, 34, 25, 82, 60),
            day(2, 25, 20, 60, 10),
            day(3, 25, 20, 60, 10),
            day(4, 27, 19, 55, 15),
        ];
        let a = generate_advisories(&window);
        let b = generate_advisories(&window);

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.condition, y.condition);
            assert_eq!(x.risk_level, y.risk_level);
            assert_eq!(x.affected_days, y.affected_days);
            assert_eq!(x.message, y.message);
            assert_eq!(x.action_bn, y.action_bn);
        }
    }
}
