//! Farmer account and badge models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Language;

/// A registered farmer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farmer {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub division: String,
    pub district: String,
    pub preferred_language: Language,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Badge categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BadgeCategory {
    Milestone,
    Achievement,
    Streak,
}

/// A badge earned by a farmer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub kind: BadgeKind,
    pub earned_at: DateTime<Utc>,
}

/// The fixed badge catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    FirstHarvest,
    FirstBatch,
    AlertFarmer,
    RiskMitigator,
    Expert,
}

impl BadgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeKind::FirstHarvest => "first_harvest",
            BadgeKind::FirstBatch => "first_batch",
            BadgeKind::AlertFarmer => "alert_farmer",
            BadgeKind::RiskMitigator => "risk_mitigator",
            BadgeKind::Expert => "expert",
        }
    }

    pub fn category(&self) -> BadgeCategory {
        match self {
            BadgeKind::FirstHarvest | BadgeKind::FirstBatch => BadgeCategory::Milestone,
            _ => BadgeCategory::Achievement,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BadgeKind::FirstHarvest => "First Harvest",
            BadgeKind::FirstBatch => "First Batch",
            BadgeKind::AlertFarmer => "Alert Farmer",
            BadgeKind::RiskMitigator => "Risk Mitigator",
            BadgeKind::Expert => "Expert",
        }
    }

    pub fn name_bn(&self) -> &'static str {
        match self {
            BadgeKind::FirstHarvest => "প্রথম ফসল",
            BadgeKind::FirstBatch => "প্রথম ব্যাচ",
            BadgeKind::AlertFarmer => "সতর্ক কৃষক",
            BadgeKind::RiskMitigator => "ঝুঁকি প্রতিরোধী",
            BadgeKind::Expert => "বিশেষজ্ঞ",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BadgeKind::FirstHarvest => "Registered your first account",
            BadgeKind::FirstBatch => "Registered your first crop batch",
            BadgeKind::AlertFarmer => "Viewed 5 weather forecasts",
            BadgeKind::RiskMitigator => "Completed 3 interventions",
            BadgeKind::Expert => "Saved 100kg from loss",
        }
    }

    pub fn description_bn(&self) -> &'static str {
        match self {
            BadgeKind::FirstHarvest => "প্রথম অ্যাকাউন্ট তৈরি করেছেন",
            BadgeKind::FirstBatch => "প্রথম ফসল ব্যাচ নিবন্ধন করেছেন",
            BadgeKind::AlertFarmer => "৫টি আবহাওয়া পূর্বাভাস দেখেছেন",
            BadgeKind::RiskMitigator => "৩টি হস্তক্ষেপ সম্পন্ন করেছেন",
            BadgeKind::Expert => "১০০ কেজি ক্ষতি থেকে রক্ষা করেছেন",
        }
    }
}
