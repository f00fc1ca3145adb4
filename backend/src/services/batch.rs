//! Crop batch management

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::locations;
use shared::models::{BadgeKind, BatchStatus, CropBatch, CropType, Intervention, StorageType};
use shared::validation::validate_batch_weight;

use crate::error::{AppError, AppResult};

use super::award_badge;

/// Crop batch service
#[derive(Clone)]
pub struct CropBatchService {
    db: PgPool,
}

/// Input for creating a crop batch
#[derive(Debug, Deserialize)]
pub struct CreateBatchInput {
    pub crop_type: CropType,
    pub weight_kg: Decimal,
    pub harvest_date: NaiveDate,
    pub division: String,
    pub district: String,
    pub storage_type: StorageType,
    pub notes: Option<String>,
}

/// Input for updating batch details
#[derive(Debug, Deserialize)]
pub struct UpdateBatchInput {
    pub storage_type: Option<StorageType>,
    pub notes: Option<String>,
}

/// Input for recording an intervention
#[derive(Debug, Deserialize)]
pub struct RecordInterventionInput {
    pub date: NaiveDate,
    pub action: String,
    pub action_bn: String,
    pub reason: String,
    pub reason_bn: String,
    pub weather_condition: Option<String>,
}

/// Database row for crop batches; enum columns stored as text
#[derive(Debug, FromRow)]
struct BatchRow {
    id: Uuid,
    farmer_id: Uuid,
    crop_type: String,
    weight_kg: Decimal,
    harvest_date: NaiveDate,
    division: String,
    division_bn: String,
    district: String,
    district_bn: String,
    storage_type: String,
    status: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BatchRow {
    fn into_model(self) -> AppResult<CropBatch> {
        Ok(CropBatch {
            id: self.id,
            farmer_id: self.farmer_id,
            crop_type: self
                .crop_type
                .parse()
                .map_err(|e: &str| AppError::Internal(e.to_string()))?,
            weight_kg: self.weight_kg,
            harvest_date: self.harvest_date,
            division: self.division,
            division_bn: self.division_bn,
            district: self.district,
            district_bn: self.district_bn,
            storage_type: self
                .storage_type
                .parse()
                .map_err(|e: &str| AppError::Internal(e.to_string()))?,
            status: self
                .status
                .parse()
                .map_err(|e: &str| AppError::Internal(e.to_string()))?,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Database row for interventions
#[derive(Debug, FromRow)]
struct InterventionRow {
    id: Uuid,
    batch_id: Uuid,
    date: NaiveDate,
    action: String,
    action_bn: String,
    reason: String,
    reason_bn: String,
    weather_condition: Option<String>,
    created_at: DateTime<Utc>,
}

impl InterventionRow {
    fn into_model(self) -> Intervention {
        Intervention {
            id: self.id,
            batch_id: self.batch_id,
            date: self.date,
            action: self.action,
            action_bn: self.action_bn,
            reason: self.reason,
            reason_bn: self.reason_bn,
            weather_condition: self.weather_condition,
            created_at: self.created_at,
        }
    }
}

const BATCH_COLUMNS: &str = "id, farmer_id, crop_type, weight_kg, harvest_date, division, division_bn, district, district_bn, storage_type, status, notes, created_at, updated_at";

impl CropBatchService {
    /// Create a new CropBatchService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a new crop batch
    pub async fn create_batch(&self, farmer_id: Uuid, input: CreateBatchInput) -> AppResult<CropBatch> {
        validate_batch_weight(input.weight_kg).map_err(|msg| AppError::Validation {
            field: "weight_kg".to_string(),
            message: msg.to_string(),
            message_bn: "ওজন শূন্যের বেশি হতে হবে".to_string(),
        })?;

        let division = locations::find_division(&input.division)
            .ok_or_else(|| AppError::NotFound("Division".to_string()))?;
        let district = locations::find_district(&input.division, &input.district)
            .ok_or_else(|| AppError::NotFound("District".to_string()))?;

        let row = sqlx::query_as::<_, BatchRow>(&format!(
            r#"
            INSERT INTO crop_batches (
                farmer_id, crop_type, weight_kg, harvest_date,
                division, division_bn, district, district_bn,
                storage_type, status, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'active', $10)
            RETURNING {BATCH_COLUMNS}
            "#,
        ))
        .bind(farmer_id)
        .bind(input.crop_type.as_str())
        .bind(input.weight_kg)
        .bind(input.harvest_date)
        .bind(division.name)
        .bind(division.name_bn)
        .bind(district.name)
        .bind(district.name_bn)
        .bind(input.storage_type.as_str())
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        // First batch earns a badge
        let batch_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM crop_batches WHERE farmer_id = $1",
        )
        .bind(farmer_id)
        .fetch_one(&self.db)
        .await?;

        if batch_count == 1 {
            award_badge(&self.db, farmer_id, BadgeKind::FirstBatch).await?;
        }

        row.into_model()
    }

    /// Get a batch by ID
    pub async fn get_batch(&self, farmer_id: Uuid, batch_id: Uuid) -> AppResult<CropBatch> {
        let row = sqlx::query_as::<_, BatchRow>(&format!(
            "SELECT {BATCH_COLUMNS} FROM crop_batches WHERE id = $1 AND farmer_id = $2",
        ))
        .bind(batch_id)
        .bind(farmer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Crop batch".to_string()))?;

        row.into_model()
    }

    /// List a farmer's batches, newest first
    pub async fn list_batches(&self, farmer_id: Uuid) -> AppResult<Vec<CropBatch>> {
        let rows = sqlx::query_as::<_, BatchRow>(&format!(
            "SELECT {BATCH_COLUMNS} FROM crop_batches WHERE farmer_id = $1 ORDER BY created_at DESC",
        ))
        .bind(farmer_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(BatchRow::into_model).collect()
    }

    /// Update batch storage or notes
    pub async fn update_batch(
        &self,
        farmer_id: Uuid,
        batch_id: Uuid,
        input: UpdateBatchInput,
    ) -> AppResult<CropBatch> {
        let current = self.get_batch(farmer_id, batch_id).await?;
        let storage = input.storage_type.unwrap_or(current.storage_type);
        let notes = input.notes.or(current.notes);

        let row = sqlx::query_as::<_, BatchRow>(&format!(
            r#"
            UPDATE crop_batches
            SET storage_type = $1, notes = $2, updated_at = NOW()
            WHERE id = $3 AND farmer_id = $4
            RETURNING {BATCH_COLUMNS}
            "#,
        ))
        .bind(storage.as_str())
        .bind(&notes)
        .bind(batch_id)
        .bind(farmer_id)
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// Change a batch's lifecycle status
    ///
    /// Active batches may be marked completed or lost; both are terminal.
    pub async fn change_status(
        &self,
        farmer_id: Uuid,
        batch_id: Uuid,
        new_status: BatchStatus,
    ) -> AppResult<CropBatch> {
        let current = self.get_batch(farmer_id, batch_id).await?;

        if !current.status.can_transition_to(new_status) {
            return Err(AppError::InvalidStateTransition(format!(
                "Cannot change batch status from {} to {}",
                current.status.as_str(),
                new_status.as_str()
            )));
        }

        let row = sqlx::query_as::<_, BatchRow>(&format!(
            r#"
            UPDATE crop_batches
            SET status = $1, updated_at = NOW()
            WHERE id = $2 AND farmer_id = $3
            RETURNING {BATCH_COLUMNS}
            "#,
        ))
        .bind(new_status.as_str())
        .bind(batch_id)
        .bind(farmer_id)
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// Record an intervention against a batch
    pub async fn add_intervention(
        &self,
        farmer_id: Uuid,
        batch_id: Uuid,
        input: RecordInterventionInput,
    ) -> AppResult<Intervention> {
        // Validate the batch belongs to the farmer
        let batch = self.get_batch(farmer_id, batch_id).await?;

        let intervention = sqlx::query_as::<_, InterventionRow>(
            r#"
            INSERT INTO batch_interventions (
                batch_id, date, action, action_bn, reason, reason_bn, weather_condition
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, batch_id, date, action, action_bn, reason, reason_bn, weather_condition, created_at
            "#,
        )
        .bind(batch.id)
        .bind(input.date)
        .bind(&input.action)
        .bind(&input.action_bn)
        .bind(&input.reason)
        .bind(&input.reason_bn)
        .bind(&input.weather_condition)
        .fetch_one(&self.db)
        .await?
        .into_model();

        // Third intervention earns a badge
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM batch_interventions bi
            JOIN crop_batches cb ON cb.id = bi.batch_id
            WHERE cb.farmer_id = $1
            "#,
        )
        .bind(farmer_id)
        .fetch_one(&self.db)
        .await?;

        if total >= 3 {
            award_badge(&self.db, farmer_id, BadgeKind::RiskMitigator).await?;
        }

        Ok(intervention)
    }

    /// List interventions for a batch
    pub async fn list_interventions(
        &self,
        farmer_id: Uuid,
        batch_id: Uuid,
    ) -> AppResult<Vec<Intervention>> {
        let batch = self.get_batch(farmer_id, batch_id).await?;

        let rows = sqlx::query_as::<_, InterventionRow>(
            r#"
            SELECT id, batch_id, date, action, action_bn, reason, reason_bn, weather_condition, created_at
            FROM batch_interventions
            WHERE batch_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(batch.id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(InterventionRow::into_model).collect())
    }

    /// Export a farmer's batches as CSV
    pub async fn export_csv(&self, farmer_id: Uuid) -> AppResult<String> {
        let batches = self.list_batches(farmer_id).await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "ID",
                "Crop",
                "Weight (kg)",
                "Harvest Date",
                "Division",
                "District",
                "Storage",
                "Status",
                "Notes",
            ])
            .map_err(|e| AppError::Internal(e.to_string()))?;

        for batch in &batches {
            writer
                .write_record([
                    batch.id.to_string(),
                    batch.crop_type.as_str().to_string(),
                    batch.weight_kg.to_string(),
                    batch.harvest_date.to_string(),
                    batch.division.clone(),
                    batch.district.clone(),
                    batch.storage_type.label().to_string(),
                    batch.status.as_str().to_string(),
                    batch.notes.clone().unwrap_or_default(),
                ])
                .map_err(|e| AppError::Internal(e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| AppError::Internal(e.to_string()))
    }

    /// Export a farmer's batches as JSON
    pub async fn export_json(&self, farmer_id: Uuid) -> AppResult<serde_json::Value> {
        let batches = self.list_batches(farmer_id).await?;
        serde_json::to_value(batches).map_err(|e| AppError::Internal(e.to_string()))
    }
}
