//! Crop batch models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Crops tracked by the platform
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CropType {
    Potato,
    Rice,
    Wheat,
    Maize,
    Jute,
    Tomato,
    Brinjal,
    Mustard,
    Lentil,
    Mango,
    Banana,
    Sugarcane,
    Onion,
}

impl CropType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Potato => "potato",
            CropType::Rice => "rice",
            CropType::Wheat => "wheat",
            CropType::Maize => "maize",
            CropType::Jute => "jute",
            CropType::Tomato => "tomato",
            CropType::Brinjal => "brinjal",
            CropType::Mustard => "mustard",
            CropType::Lentil => "lentil",
            CropType::Mango => "mango",
            CropType::Banana => "banana",
            CropType::Sugarcane => "sugarcane",
            CropType::Onion => "onion",
        }
    }

    pub fn name_bn(&self) -> &'static str {
        match self {
            CropType::Potato => "আলু",
            CropType::Rice => "ধান",
            CropType::Wheat => "গম",
            CropType::Maize => "ভুট্টা",
            CropType::Jute => "পাট",
            CropType::Tomato => "টমেটো",
            CropType::Brinjal => "বেগুন",
            CropType::Mustard => "সরিষা",
            CropType::Lentil => "মসুর",
            CropType::Mango => "আম",
            CropType::Banana => "কলা",
            CropType::Sugarcane => "আখ",
            CropType::Onion => "পেঁয়াজ",
        }
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CropType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "potato" => Ok(CropType::Potato),
            "rice" => Ok(CropType::Rice),
            "wheat" => Ok(CropType::Wheat),
            "maize" => Ok(CropType::Maize),
            "jute" => Ok(CropType::Jute),
            "tomato" => Ok(CropType::Tomato),
            "brinjal" => Ok(CropType::Brinjal),
            "mustard" => Ok(CropType::Mustard),
            "lentil" => Ok(CropType::Lentil),
            "mango" => Ok(CropType::Mango),
            "banana" => Ok(CropType::Banana),
            "sugarcane" => Ok(CropType::Sugarcane),
            "onion" => Ok(CropType::Onion),
            _ => Err("Unknown crop type"),
        }
    }
}

/// How a harvested batch is stored
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    JuteBag,
    Silo,
    OpenArea,
    Warehouse,
    Indoor,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::JuteBag => "jute_bag",
            StorageType::Silo => "silo",
            StorageType::OpenArea => "open_area",
            StorageType::Warehouse => "warehouse",
            StorageType::Indoor => "indoor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StorageType::JuteBag => "Jute Bag Stack",
            StorageType::Silo => "Silo",
            StorageType::OpenArea => "Open Area",
            StorageType::Warehouse => "Warehouse",
            StorageType::Indoor => "Indoor Storage",
        }
    }

    pub fn label_bn(&self) -> &'static str {
        match self {
            StorageType::JuteBag => "পাটের বস্তা",
            StorageType::Silo => "সাইলো",
            StorageType::OpenArea => "খোলা জায়গা",
            StorageType::Warehouse => "গুদামঘর",
            StorageType::Indoor => "ঘরের ভিতর",
        }
    }
}

impl std::str::FromStr for StorageType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jute_bag" => Ok(StorageType::JuteBag),
            "silo" => Ok(StorageType::Silo),
            "open_area" => Ok(StorageType::OpenArea),
            "warehouse" => Ok(StorageType::Warehouse),
            "indoor" => Ok(StorageType::Indoor),
            _ => Err("Unknown storage type"),
        }
    }
}

/// Lifecycle status of a crop batch
///
/// Active batches may move to Completed or Lost; both are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Active,
    Completed,
    Lost,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Active => "active",
            BatchStatus::Completed => "completed",
            BatchStatus::Lost => "lost",
        }
    }

    /// Whether a transition from `self` to `next` is legal
    pub fn can_transition_to(&self, next: BatchStatus) -> bool {
        matches!(
            (self, next),
            (BatchStatus::Active, BatchStatus::Completed) | (BatchStatus::Active, BatchStatus::Lost)
        )
    }
}

impl std::str::FromStr for BatchStatus {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(BatchStatus::Active),
            "completed" => Ok(BatchStatus::Completed),
            "lost" => Ok(BatchStatus::Lost),
            _ => Err("Unknown batch status"),
        }
    }
}

/// A tracked crop batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropBatch {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub crop_type: CropType,
    pub weight_kg: Decimal,
    pub harvest_date: NaiveDate,
    pub division: String,
    pub division_bn: String,
    pub district: String,
    pub district_bn: String,
    pub storage_type: StorageType,
    pub status: BatchStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An action a farmer took on a batch in response to a risk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intervention {
    pub id: Uuid,
    pub batch_id: Uuid,
    pub date: NaiveDate,
    pub action: String,
    pub action_bn: String,
    pub reason: String,
    pub reason_bn: String,
    pub weather_condition: Option<String>,
    pub created_at: DateTime<Utc>,
}
