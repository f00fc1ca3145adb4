//! Advisory records produced by the weather rule engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity class of an advisory, from most to least urgent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryType {
    Critical,
    Warning,
    Info,
    Success,
}

/// Symbolic tag naming the rule that produced an advisory
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryCondition {
    HighRain,
    ModerateRain,
    HighTemp,
    HighHumidity,
    CombinedRisk,
    ColdTemp,
    Ideal,
    ClearWeather,
}

impl AdvisoryCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisoryCondition::HighRain => "high_rain",
            AdvisoryCondition::ModerateRain => "moderate_rain",
            AdvisoryCondition::HighTemp => "high_temp",
            AdvisoryCondition::HighHumidity => "high_humidity",
            AdvisoryCondition::CombinedRisk => "combined_risk",
            AdvisoryCondition::ColdTemp => "cold_temp",
            AdvisoryCondition::Ideal => "ideal",
            AdvisoryCondition::ClearWeather => "clear_weather",
        }
    }
}

impl std::fmt::Display for AdvisoryCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated farming advisory
///
/// Generated fresh on every forecast evaluation and never mutated
/// afterwards. `risk_level` runs 1 (low) to 5 (critical) and drives both
/// sorting and UI emphasis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advisory {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub advisory_type: AdvisoryType,
    pub title: String,
    pub title_bn: String,
    pub message: String,
    pub message_bn: String,
    pub action: String,
    pub action_bn: String,
    pub risk_level: u8,
    pub affected_days: u32,
    pub condition: AdvisoryCondition,
    pub timestamp: DateTime<Utc>,
}

/// Risk level description in Bangla
pub fn risk_level_label_bn(level: u8) -> &'static str {
    match level {
        1 => "কম ঝুঁকি",
        2 => "মধ্যম ঝুঁকি",
        3 => "উচ্চ ঝুঁকি",
        4 => "অত্যন্ত উচ্চ ঝুঁকি",
        5 => "গুরুতর ঝুঁকি",
        _ => "অজানা ঝুঁকি",
    }
}
