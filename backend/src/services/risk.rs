//! Crop risk assessment from next-day weather
//!
//! Classifies tomorrow's weather into a risk level and type for a given
//! crop, then builds an actionable bilingual alert for critical risks.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared::models::{CropType, WeatherData};

use crate::error::{AppError, AppResult};

/// General weather thresholds for risk classification
const HIGH_TEMP_CELSIUS: i64 = 30;
const LOW_TEMP_CELSIUS: i64 = 15;
const HIGH_HUMIDITY_PERCENT: i32 = 70;
const LOW_HUMIDITY_PERCENT: i32 = 40;
const HEAVY_RAIN_MM: i64 = 20;

/// One day's weather summary used for risk assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayWeather {
    pub rain: bool,
    pub humidity_percent: i32,
    pub temp_celsius: Decimal,
    pub rain_amount_mm: Decimal,
}

/// Risk severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    Critical,
}

/// Risk categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskType {
    HeatStress,
    ColdStress,
    HighHumidity,
    Drought,
    Flood,
}

impl RiskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskType::HeatStress => "heat_stress",
            RiskType::ColdStress => "cold_stress",
            RiskType::HighHumidity => "high_humidity",
            RiskType::Drought => "drought",
            RiskType::Flood => "flood",
        }
    }

    pub fn label_bn(&self) -> &'static str {
        match self {
            RiskType::HeatStress => "তাপীয় চাপ",
            RiskType::ColdStress => "শীতল চাপ",
            RiskType::HighHumidity => "উচ্চ আর্দ্রতা",
            RiskType::Drought => "খরা",
            RiskType::Flood => "বন্যা",
        }
    }
}

/// Outcome of a risk calculation
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub risk_type: Option<RiskType>,
}

/// An actionable alert for a critical crop risk
#[derive(Debug, Clone, Serialize)]
pub struct CropAlert {
    pub crop_type: CropType,
    pub division: String,
    pub district: String,
    pub risk_level: RiskLevel,
    pub risk_type: Option<RiskType>,
    pub message: String,
    pub message_bn: String,
    pub weather: DayWeather,
    pub timestamp: DateTime<Utc>,
}

/// Calculate risk level and type for a crop from one day's weather
pub fn calculate_risk(crop: CropType, weather: &DayWeather) -> RiskAssessment {
    let high_temp = Decimal::from(HIGH_TEMP_CELSIUS);
    let low_temp = Decimal::from(LOW_TEMP_CELSIUS);
    let heavy_rain = Decimal::from(HEAVY_RAIN_MM);
    // Drought kicks in a little below the heat threshold
    let drought_temp = Decimal::from(HIGH_TEMP_CELSIUS - 5);

    // General weather checks, first match wins
    let (mut level, risk_type) = if weather.temp_celsius > high_temp && !weather.rain {
        (RiskLevel::Critical, Some(RiskType::HeatStress))
    } else if weather.temp_celsius < low_temp {
        (RiskLevel::Critical, Some(RiskType::ColdStress))
    } else if weather.humidity_percent > HIGH_HUMIDITY_PERCENT && weather.rain {
        (RiskLevel::Critical, Some(RiskType::HighHumidity))
    } else if !weather.rain
        && weather.humidity_percent < LOW_HUMIDITY_PERCENT
        && weather.temp_celsius > drought_temp
    {
        (RiskLevel::Critical, Some(RiskType::Drought))
    } else if weather.rain && weather.rain_amount_mm > heavy_rain {
        (RiskLevel::Critical, Some(RiskType::Flood))
    } else if weather.humidity_percent > HIGH_HUMIDITY_PERCENT {
        (RiskLevel::Medium, Some(RiskType::HighHumidity))
    } else {
        (RiskLevel::Low, None)
    };

    if let Some(risk_type) = risk_type {
        level = adjust_for_crop(crop, risk_type, level, weather);
    }

    RiskAssessment { level, risk_type }
}

/// Crop-specific adjustments to the general assessment
fn adjust_for_crop(
    crop: CropType,
    risk_type: RiskType,
    level: RiskLevel,
    weather: &DayWeather,
) -> RiskLevel {
    use RiskType::*;

    match crop {
        CropType::Potato => match risk_type {
            HighHumidity => RiskLevel::Critical,
            Drought if weather.temp_celsius < Decimal::from(20) => RiskLevel::Medium,
            _ => level,
        },
        CropType::Rice => match risk_type {
            Flood => RiskLevel::Medium,
            Drought | HeatStress => RiskLevel::Critical,
            _ => level,
        },
        CropType::Wheat => match risk_type {
            Drought | HeatStress => RiskLevel::Critical,
            _ => level,
        },
        CropType::Maize => match risk_type {
            Drought => RiskLevel::Medium,
            HighHumidity => RiskLevel::Critical,
            _ => level,
        },
        CropType::Jute => match risk_type {
            Flood => RiskLevel::Low,
            Drought | HighHumidity => RiskLevel::Critical,
            _ => level,
        },
        CropType::Tomato => match risk_type {
            HeatStress | Drought | HighHumidity | Flood => RiskLevel::Critical,
            _ => level,
        },
        CropType::Brinjal => match risk_type {
            Drought | HighHumidity | ColdStress => RiskLevel::Critical,
            _ => level,
        },
        CropType::Mustard => match risk_type {
            Drought | HeatStress => RiskLevel::Critical,
            ColdStress => RiskLevel::Medium,
            _ => level,
        },
        CropType::Lentil => match risk_type {
            Drought | HeatStress | Flood => RiskLevel::Critical,
            _ => level,
        },
        CropType::Mango => match risk_type {
            Drought | HeatStress | Flood | HighHumidity => RiskLevel::Critical,
            _ => level,
        },
        CropType::Banana => match risk_type {
            Drought | Flood | ColdStress => RiskLevel::Critical,
            _ => level,
        },
        CropType::Sugarcane => match risk_type {
            Drought | Flood => RiskLevel::Critical,
            _ => level,
        },
        CropType::Onion => match risk_type {
            ColdStress | HighHumidity | Drought => RiskLevel::Critical,
            _ => level,
        },
    }
}

/// Build an actionable alert for a critical risk; non-critical risks
/// produce no alert
pub fn build_alert(
    crop: CropType,
    weather: &DayWeather,
    risk: &RiskAssessment,
    division: &str,
    district: &str,
) -> Option<CropAlert> {
    if risk.level != RiskLevel::Critical {
        return None;
    }

    let (message, message_bn) = alert_messages(crop, risk.risk_type);

    Some(CropAlert {
        crop_type: crop,
        division: division.to_string(),
        district: district.to_string(),
        risk_level: risk.level,
        risk_type: risk.risk_type,
        message,
        message_bn,
        weather: weather.clone(),
        timestamp: Utc::now(),
    })
}

/// Bilingual alert message for a (crop, risk) pair
fn alert_messages(crop: CropType, risk_type: Option<RiskType>) -> (String, String) {
    use CropType::*;
    use RiskType::*;

    let risk_bn = risk_type.map(|t| t.label_bn()).unwrap_or("ঝুঁকি");
    let crop_bn = crop.name_bn();

    let specific: Option<(&str, String)> = match (crop, risk_type) {
        (Potato, Some(HighHumidity)) => Some((
            "Risk: High humidity. Rain and high humidity expected. Turn on ventilation and apply fungicide.",
            format!("ঝুঁকি: {risk_bn} (ছত্রাকজনিত রোগের সম্ভাবনা)। আগামীকাল বৃষ্টি হবে এবং আর্দ্রতা বেশি। এখনই ফ্যান চালু করুন এবং ছত্রাকনাশক ব্যবহার করুন।"),
        )),
        (Potato, Some(Drought)) => Some((
            "Risk: Drought. Your potato field lacks water. Irrigate immediately and keep soil moist.",
            format!("ঝুঁকি: {risk_bn}। আপনার {crop_bn} ক্ষেতে পানির অভাব। এখনই সেচ দিন এবং মাটি আর্দ্র রাখুন।"),
        )),
        (Potato, Some(ColdStress)) => Some((
            "Risk: Cold stress. Low temperature will damage potatoes. Provide covering.",
            format!("ঝুঁকি: {risk_bn}। নিম্ন তাপমাত্রা {crop_bn} কে ক্ষতি করবে। আচ্ছাদন প্রদান করুন।"),
        )),
        (Rice, Some(Drought)) => Some((
            "Risk: Drought. Your rice field needs water. Start irrigation immediately and use drought-tolerant varieties.",
            format!("ঝুঁকি: {risk_bn}। আপনার {crop_bn} ক্ষেতে খরা। এখনই সেচ ব্যবস্থা চালু করুন এবং খরা-সহনশীল জাত ব্যবহার করুন।"),
        )),
        (Rice, Some(Flood)) => Some((
            "Risk: Flood. Heavy rain expected. Check drainage and move to higher ground if possible.",
            format!("ঝুঁকি: {risk_bn} (জলাবদ্ধতা)। আগামীকাল ভারী বৃষ্টি হতে পারে। নিকাশ ব্যবস্থা চেক করুন এবং উঁচু জমিতে সরান।"),
        )),
        (Rice, Some(HeatStress)) => Some((
            "Risk: Heat stress. High temperature will reduce rice yield. Increase irrigation.",
            format!("ঝুঁকি: {risk_bn}। উচ্চ তাপমাত্রা {crop_bn} ফলন কমাবে। সেচ বাড়ান এবং ছায়া প্রদান করুন।"),
        )),
        (Tomato, Some(HeatStress)) => Some((
            "Risk: Heat stress. High temperature affects fruit development. Use shade nets and increase irrigation.",
            format!("ঝুঁকি: {risk_bn}। উচ্চ তাপমাত্রা {crop_bn} ফল গঠনে সমস্যা সৃষ্টি করবে। ছায়া নেট ব্যবহার করুন এবং সেচ বাড়ান।"),
        )),
        (Tomato, Some(Drought)) => Some((
            "Risk: Drought. Water shortage detected. Irrigate regularly.",
            format!("ঝুঁকি: {risk_bn}। পানির অভাব। নিয়মিত সেচ দিন।"),
        )),
        (Tomato, Some(HighHumidity)) => Some((
            "Risk: High humidity with disease risk. Apply fungicide spray.",
            format!("ঝুঁকি: {risk_bn} (রোগের ঝুঁকি)। ছত্রাকনাশক স্প্রে করুন।"),
        )),
        (Tomato, Some(Flood)) => Some((
            "Risk: Flood. Ensure proper drainage to avoid waterlogging.",
            format!("ঝুঁকি: {risk_bn}। জলাবদ্ধতা এড়াতে নিকাশ নিশ্চিত করুন।"),
        )),
        (Wheat, Some(HeatStress)) => Some((
            "Risk: Heat stress. High temperature will damage wheat. Provide shade and increase irrigation.",
            format!("ঝুঁকি: {risk_bn}। উচ্চ তাপমাত্রা আপনার {crop_bn} ফসলকে ক্ষতি করবে। ছায়া প্রদান করুন এবং সেচ বাড়ান।"),
        )),
        (Wheat, Some(Drought)) => Some((
            "Risk: Drought. Water shortage. Irrigate immediately.",
            format!("ঝুঁকি: {risk_bn}। পানির অভাব। এখনই সেচ দিন।"),
        )),
        (Mango, Some(Drought)) => Some((
            "Risk: Drought. Water shortage affects fruit development. Irrigate.",
            format!("ঝুঁকি: {risk_bn}। পানির অভাব ফল গঠনে সমস্যা। সেচ দিন।"),
        )),
        (Mango, Some(HeatStress)) => Some((
            "Risk: Heat stress. High temperature causes fruit burn. Use shade nets.",
            format!("ঝুঁকি: {risk_bn}। উচ্চ তাপমাত্রা ফল পোড়াবে। ছায়া নেট ব্যবহার করুন।"),
        )),
        (Mango, Some(HighHumidity)) => Some((
            "Risk: High humidity with disease. Apply fungicide.",
            format!("ঝুঁকি: {risk_bn} (রোগ)। ছত্রাকনাশক স্প্রে করুন।"),
        )),
        (Brinjal, Some(Drought)) => Some((
            "Risk: Drought. Water shortage will damage brinjal. Irrigate.",
            format!("ঝুঁকি: {risk_bn}। পানির অভাব {crop_bn} কে ক্ষতি করবে। সেচ দিন।"),
        )),
        (Brinjal, Some(HighHumidity)) => Some((
            "Risk: High humidity with pest risk. Apply insecticide.",
            format!("ঝুঁকি: {risk_bn} (কীটপতঙ্গ)। কীটনাশক ব্যবহার করুন।"),
        )),
        (Brinjal, Some(ColdStress)) => Some((
            "Risk: Cold stress. Low temperature detected. Provide covering.",
            format!("ঝুঁকি: {risk_bn}। নিম্ন তাপমাত্রা। আচ্ছাদন প্রদান করুন।"),
        )),
        (Mustard, Some(Drought)) => Some((
            "Risk: Drought. Water shortage. Start irrigation.",
            format!("ঝুঁকি: {risk_bn}। পানির অভাব। সেচ ব্যবস্থা চালু করুন।"),
        )),
        (Mustard, Some(HeatStress)) => Some((
            "Risk: Heat stress. High temperature affects flowering. Increase irrigation.",
            format!("ঝুঁকি: {risk_bn}। উচ্চ তাপমাত্রা ফুল ফোটাতে সমস্যা। সেচ বাড়ান।"),
        )),
        (Mustard, Some(ColdStress)) => Some((
            "Risk: Cold stress. Monitor low temperature.",
            format!("ঝুঁকি: {risk_bn}। শীতল তাপমাত্রা। পর্যবেক্ষণ করুন।"),
        )),
        (Lentil, Some(Drought)) => Some((
            "Risk: Drought. Water shortage. Irrigate.",
            format!("ঝুঁকি: {risk_bn}। পানির অভাব। সেচ দিন।"),
        )),
        (Lentil, Some(HeatStress)) => Some((
            "Risk: Heat stress. High temperature reduces yield. Provide shade.",
            format!("ঝুঁকি: {risk_bn}। উচ্চ তাপমাত্রা ফলন কমাবে। ছায়া প্রদান করুন।"),
        )),
        (Lentil, Some(Flood)) => Some((
            "Risk: Flood. Avoid waterlogging.",
            format!("ঝুঁকি: {risk_bn}। জলাবদ্ধতা এড়ান।"),
        )),
        (Banana, Some(Drought)) => Some((
            "Risk: Drought. Water shortage. Irrigate regularly.",
            format!("ঝুঁকি: {risk_bn}। পানির অভাব। নিয়মিত সেচ দিন।"),
        )),
        (Banana, Some(Flood)) => Some((
            "Risk: Flood. Waterlogging risk. Check drainage system.",
            format!("ঝুঁকি: {risk_bn} (জলাবদ্ধতা)। নিকাশ ব্যবস্থা চেক করুন।"),
        )),
        (Banana, Some(ColdStress)) => Some((
            "Risk: Cold stress. Low temperature. Provide covering.",
            format!("ঝুঁকি: {risk_bn}। নিম্ন তাপমাত্রা। আচ্ছাদন করুন।"),
        )),
        (Sugarcane, Some(Drought)) => Some((
            "Risk: Drought. Water shortage reduces yield. Increase irrigation.",
            format!("ঝুঁকি: {risk_bn}। পানির অভাব ফলন কমাবে। সেচ বাড়ান।"),
        )),
        (Sugarcane, Some(Flood)) => Some((
            "Risk: Flood. Heavy rain causes lodging. Ensure drainage.",
            format!("ঝুঁকি: {risk_bn}। ভারী বৃষ্টি লোডিং ঘটাবে। নিকাশ নিশ্চিত করুন।"),
        )),
        (Onion, Some(ColdStress)) => Some((
            "Risk: Cold stress. Low temperature. Provide covering.",
            format!("ঝুঁকি: {risk_bn}। নিম্ন তাপমাত্রা। আচ্ছাদন প্রদান করুন।"),
        )),
        (Onion, Some(HighHumidity)) => Some((
            "Risk: High humidity with rot risk. Reduce humidity and apply fungicide.",
            format!("ঝুঁকি: {risk_bn} (পচন)। আর্দ্রতা কমানোর চেষ্টা করুন এবং ছত্রাকনাশক ব্যবহার করুন।"),
        )),
        (Onion, Some(Drought)) => Some((
            "Risk: Drought. Water shortage. Irrigate.",
            format!("ঝুঁকি: {risk_bn}। পানির অভাব। সেচ দিন।"),
        )),
        _ => None,
    };

    match specific {
        Some((en, bn)) => (en.to_string(), bn),
        None => {
            let type_str = risk_type.map(|t| t.as_str()).unwrap_or("unknown");
            (
                format!(
                    "Risk: {type_str}. Your {crop} crop faces a {type_str} risk. Take appropriate measures."
                ),
                format!(
                    "ঝুঁকি: {risk_bn}। আপনার {crop_bn} ফসলের জন্য {risk_bn} ঝুঁকি। উপযুক্ত ব্যবস্থা নিন।"
                ),
            )
        }
    }
}

/// Summarize tomorrow's weather from a forecast window
///
/// Index 0 is today, so tomorrow is the second entry. Daily forecasts
/// carry a rain probability rather than millimetres, so `rain` is derived
/// from probability >= 50% and `rain_amount_mm` stays zero.
pub fn tomorrow_weather(weather: &WeatherData) -> AppResult<DayWeather> {
    let tomorrow = weather
        .forecasts
        .get(1)
        .ok_or_else(|| AppError::ValidationError("Forecast has no entry for tomorrow".to_string()))?;

    Ok(DayWeather {
        rain: tomorrow.rain_probability_percent >= 50,
        humidity_percent: tomorrow.humidity_percent,
        temp_celsius: tomorrow.temp_max_celsius,
        rain_amount_mm: Decimal::ZERO,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(temp: i64, humidity: i32, rain: bool, rain_mm: i64) -> DayWeather {
        DayWeather {
            rain,
            humidity_percent: humidity,
            temp_celsius: Decimal::from(temp),
            rain_amount_mm: Decimal::from(rain_mm),
        }
    }

    #[test]
    fn hot_dry_day_is_heat_stress() {
        let risk = calculate_risk(CropType::Rice, &weather(33, 50, false, 0));
        assert_eq!(risk.level, RiskLevel::Critical);
        assert_eq!(risk.risk_type, Some(RiskType::HeatStress));
    }

    #[test]
    fn flood_is_downgraded_for_rice_and_cleared_for_jute() {
        let w = weather(25, 60, true, 30);
        assert_eq!(
            calculate_risk(CropType::Rice, &w).level,
            RiskLevel::Medium
        );
        assert_eq!(calculate_risk(CropType::Jute, &w).level, RiskLevel::Low);
        assert_eq!(
            calculate_risk(CropType::Tomato, &w).level,
            RiskLevel::Critical
        );
    }

    #[test]
    fn humid_rain_is_critical_humidity() {
        let risk = calculate_risk(CropType::Potato, &weather(25, 80, true, 5));
        assert_eq!(risk.level, RiskLevel::Critical);
        assert_eq!(risk.risk_type, Some(RiskType::HighHumidity));
    }

    #[test]
    fn mild_day_is_low_risk() {
        let risk = calculate_risk(CropType::Rice, &weather(25, 60, false, 0));
        assert_eq!(risk.level, RiskLevel::Low);
        assert!(risk.risk_type.is_none());
    }

    #[test]
    fn non_critical_risk_builds_no_alert() {
        let w = weather(25, 75, false, 0); // medium: humid, no rain
        let risk = calculate_risk(CropType::Rice, &w);
        assert_eq!(risk.level, RiskLevel::Medium);
        assert!(build_alert(CropType::Rice, &w, &risk, "Dhaka", "Dhaka").is_none());
    }

    #[test]
    fn critical_risk_builds_bilingual_alert() {
        let w = weather(33, 50, false, 0);
        let risk = calculate_risk(CropType::Rice, &w);
        let alert = build_alert(CropType::Rice, &w, &risk, "Dhaka", "Dhaka").unwrap();
        assert!(alert.message.contains("Heat stress"));
        assert!(alert.message_bn.contains("তাপীয় চাপ"));
    }
}
