//! Crop batch integration tests
//!
//! Tests for batch lifecycle rules, storage metadata, and loss baselines

use proptest::prelude::*;
use rust_decimal::Decimal;

use shared::models::{baseline_loss_rate, BatchStatus, CropType, StorageType};
use shared::validation::validate_batch_weight;

const ALL_STORAGE: [StorageType; 5] = [
    StorageType::JuteBag,
    StorageType::Silo,
    StorageType::OpenArea,
    StorageType::Warehouse,
    StorageType::Indoor,
];

const ALL_STATUS: [BatchStatus; 3] = [
    BatchStatus::Active,
    BatchStatus::Completed,
    BatchStatus::Lost,
];

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Active batches may complete or be lost
    #[test]
    fn test_active_transitions() {
        assert!(BatchStatus::Active.can_transition_to(BatchStatus::Completed));
        assert!(BatchStatus::Active.can_transition_to(BatchStatus::Lost));
    }

    /// Completed and lost are terminal states
    #[test]
    fn test_terminal_states() {
        for next in ALL_STATUS {
            assert!(!BatchStatus::Completed.can_transition_to(next));
            assert!(!BatchStatus::Lost.can_transition_to(next));
        }
    }

    /// No state transitions to itself
    #[test]
    fn test_no_self_transitions() {
        for status in ALL_STATUS {
            assert!(!status.can_transition_to(status));
        }
    }

    /// Batch weight must be positive
    #[test]
    fn test_weight_validation() {
        assert!(validate_batch_weight(Decimal::new(5, 1)).is_ok()); // 0.5 kg
        assert!(validate_batch_weight(Decimal::from(1000)).is_ok());
        assert!(validate_batch_weight(Decimal::ZERO).is_err());
        assert!(validate_batch_weight(Decimal::from(-10)).is_err());
    }

    /// Every storage type carries bilingual labels
    #[test]
    fn test_storage_labels() {
        for storage in ALL_STORAGE {
            assert!(!storage.label().is_empty());
            assert!(!storage.label_bn().is_empty());
        }
        assert_eq!(StorageType::JuteBag.label_bn(), "পাটের বস্তা");
    }

    /// Storage type round-trips through its text form
    #[test]
    fn test_storage_round_trip() {
        for storage in ALL_STORAGE {
            let parsed: StorageType = storage.as_str().parse().unwrap();
            assert_eq!(parsed, storage);
        }
        assert!("shed".parse::<StorageType>().is_err());
    }

    /// Crop type round-trips through its text form
    #[test]
    fn test_crop_round_trip() {
        let crops = [
            CropType::Potato,
            CropType::Rice,
            CropType::Wheat,
            CropType::Maize,
            CropType::Jute,
            CropType::Tomato,
            CropType::Brinjal,
            CropType::Mustard,
            CropType::Lentil,
            CropType::Mango,
            CropType::Banana,
            CropType::Sugarcane,
            CropType::Onion,
        ];
        for crop in crops {
            let parsed: CropType = crop.as_str().parse().unwrap();
            assert_eq!(parsed, crop);
            assert!(!crop.name_bn().is_empty());
        }
        assert!("cabbage".parse::<CropType>().is_err());
    }

    /// Baseline loss rates match the reference table
    #[test]
    fn test_baseline_loss_rates() {
        assert_eq!(baseline_loss_rate(StorageType::JuteBag), Decimal::new(7, 2));
        assert_eq!(baseline_loss_rate(StorageType::Silo), Decimal::new(2, 2));
        assert_eq!(baseline_loss_rate(StorageType::OpenArea), Decimal::new(15, 2));
        assert_eq!(baseline_loss_rate(StorageType::Warehouse), Decimal::new(4, 2));
        assert_eq!(baseline_loss_rate(StorageType::Indoor), Decimal::new(6, 2));
    }

    /// Open-air storage is the riskiest, silos the safest
    #[test]
    fn test_loss_rate_ordering() {
        let open = baseline_loss_rate(StorageType::OpenArea);
        let silo = baseline_loss_rate(StorageType::Silo);
        for storage in ALL_STORAGE {
            let rate = baseline_loss_rate(storage);
            assert!(rate <= open);
            assert!(rate >= silo);
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn status_strategy() -> impl Strategy<Value = BatchStatus> {
        prop::sample::select(ALL_STATUS.to_vec())
    }

    fn storage_strategy() -> impl Strategy<Value = StorageType> {
        prop::sample::select(ALL_STORAGE.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Only Active has outgoing transitions
        #[test]
        fn prop_only_active_transitions(from in status_strategy(), to in status_strategy()) {
            if from.can_transition_to(to) {
                prop_assert_eq!(from, BatchStatus::Active);
                prop_assert!(to != BatchStatus::Active);
            }
        }

        /// Loss rates are strictly between 0 and 1
        #[test]
        fn prop_loss_rates_are_fractions(storage in storage_strategy()) {
            let rate = baseline_loss_rate(storage);
            prop_assert!(rate > Decimal::ZERO);
            prop_assert!(rate < Decimal::ONE);
        }

        /// Weight validation accepts exactly the positive values
        #[test]
        fn prop_weight_validation(weight in -10_000i64..=10_000i64) {
            let weight = Decimal::from(weight);
            prop_assert_eq!(validate_batch_weight(weight).is_ok(), weight > Decimal::ZERO);
        }
    }
}
