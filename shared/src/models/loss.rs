//! Loss prevention scoring models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::StorageType;

/// Baseline expected loss rate by storage type
///
/// Fraction of batch weight expected to be lost without intervention.
pub fn baseline_loss_rate(storage: StorageType) -> Decimal {
    match storage {
        StorageType::JuteBag => Decimal::new(7, 2),   // 7%
        StorageType::Silo => Decimal::new(2, 2),      // 2%
        StorageType::OpenArea => Decimal::new(15, 2), // 15%
        StorageType::Warehouse => Decimal::new(4, 2), // 4%
        StorageType::Indoor => Decimal::new(6, 2),    // 6%
    }
}

/// Monthly loss prevention summary for a farmer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyLossSummary {
    pub month: u32,
    pub year: i32,
    pub saved_kg: Decimal,
    /// Normalized score, 0-95
    pub score: i32,
    pub total_weight_kg: Decimal,
    pub batch_count: i64,
    pub interventions: i64,
}
