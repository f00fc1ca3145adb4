//! Monthly loss prevention scoring
//!
//! Estimates how much of a farmer's harvest was saved from storage loss
//! in a month, and turns it into a normalized score for display.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::models::{baseline_loss_rate, BadgeKind, BatchStatus, MonthlyLossSummary, StorageType};

use crate::error::{AppError, AppResult};

use super::award_badge;

/// Number of summaries returned by default
const DEFAULT_RECENT_LIMIT: i64 = 6;

/// Weight credited per intervention, in kg
const INTERVENTION_CREDIT_KG: i64 = 2;

/// Loss prevention service
#[derive(Clone)]
pub struct LossPreventionService {
    db: PgPool,
}

/// One batch's contribution to a monthly summary
#[derive(Debug, Clone)]
pub struct BatchLossInput {
    pub weight_kg: Decimal,
    pub storage_type: StorageType,
    pub lost: bool,
    pub interventions: i64,
}

#[derive(Debug, FromRow)]
struct BatchLossRow {
    weight_kg: Decimal,
    storage_type: String,
    status: String,
    interventions: i64,
}

#[derive(Debug, FromRow)]
struct SummaryRow {
    month: i32,
    year: i32,
    saved_kg: Decimal,
    score: i32,
    total_weight_kg: Decimal,
    batch_count: i64,
    interventions: i64,
}

impl SummaryRow {
    fn into_model(self) -> MonthlyLossSummary {
        MonthlyLossSummary {
            month: self.month as u32,
            year: self.year,
            saved_kg: self.saved_kg,
            score: self.score,
            total_weight_kg: self.total_weight_kg,
            batch_count: self.batch_count,
            interventions: self.interventions,
        }
    }
}

/// Compute a monthly loss prevention summary from batch contributions
///
/// Potential loss is each batch's weight times its storage baseline rate;
/// actual loss is the weight of batches marked lost. Each intervention
/// credits a small fixed amount of saved weight. The score maps the
/// saved/total ratio onto 50-95.
pub fn compute_summary(month: u32, year: i32, batches: &[BatchLossInput]) -> MonthlyLossSummary {
    let mut potential_loss = Decimal::ZERO;
    let mut actual_loss = Decimal::ZERO;
    let mut total_weight = Decimal::ZERO;
    let mut interventions: i64 = 0;

    for batch in batches {
        potential_loss += batch.weight_kg * baseline_loss_rate(batch.storage_type);
        if batch.lost {
            actual_loss += batch.weight_kg;
        }
        total_weight += batch.weight_kg;
        interventions += batch.interventions;
    }

    let mut saved_kg = (potential_loss - actual_loss).max(Decimal::ZERO);
    saved_kg += Decimal::from(interventions * INTERVENTION_CREDIT_KG);

    let ratio = if total_weight > Decimal::ZERO {
        (saved_kg / total_weight).min(Decimal::ONE)
    } else {
        Decimal::ZERO
    };

    let score = (Decimal::from(50) + ratio * Decimal::from(45))
        .min(Decimal::from(95))
        .round()
        .to_i32()
        .unwrap_or(50);

    MonthlyLossSummary {
        month,
        year,
        saved_kg: saved_kg.round(),
        score,
        total_weight_kg: total_weight,
        batch_count: batches.len() as i64,
        interventions,
    }
}

impl LossPreventionService {
    /// Create a new LossPreventionService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Compute and persist a farmer's summary for a month
    pub async fn compute_monthly(
        &self,
        farmer_id: Uuid,
        month: u32,
        year: i32,
    ) -> AppResult<MonthlyLossSummary> {
        if !(1..=12).contains(&month) {
            return Err(AppError::Validation {
                field: "month".to_string(),
                message: "Month must be between 1 and 12".to_string(),
                message_bn: "মাস ১ থেকে ১২ এর মধ্যে হতে হবে".to_string(),
            });
        }

        let rows = sqlx::query_as::<_, BatchLossRow>(
            r#"
            SELECT cb.weight_kg, cb.storage_type, cb.status,
                   COUNT(bi.id) AS interventions
            FROM crop_batches cb
            LEFT JOIN batch_interventions bi ON bi.batch_id = cb.id
            WHERE cb.farmer_id = $1
              AND date_part('month', cb.harvest_date) = $2
              AND date_part('year', cb.harvest_date) = $3
            GROUP BY cb.id
            "#,
        )
        .bind(farmer_id)
        .bind(month as i32)
        .bind(year)
        .fetch_all(&self.db)
        .await?;

        let batches: Vec<BatchLossInput> = rows
            .into_iter()
            .map(|row| {
                Ok(BatchLossInput {
                    weight_kg: row.weight_kg,
                    storage_type: row
                        .storage_type
                        .parse()
                        .map_err(|e: &str| AppError::Internal(e.to_string()))?,
                    lost: row.status.parse::<BatchStatus>().ok() == Some(BatchStatus::Lost),
                    interventions: row.interventions,
                })
            })
            .collect::<AppResult<_>>()?;

        let summary = compute_summary(month, year, &batches);

        sqlx::query(
            r#"
            INSERT INTO loss_prevention_summaries (
                farmer_id, month, year, saved_kg, score, total_weight_kg, batch_count, interventions
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (farmer_id, year, month) DO UPDATE SET
                saved_kg = EXCLUDED.saved_kg,
                score = EXCLUDED.score,
                total_weight_kg = EXCLUDED.total_weight_kg,
                batch_count = EXCLUDED.batch_count,
                interventions = EXCLUDED.interventions,
                updated_at = NOW()
            "#,
        )
        .bind(farmer_id)
        .bind(summary.month as i32)
        .bind(summary.year)
        .bind(summary.saved_kg)
        .bind(summary.score)
        .bind(summary.total_weight_kg)
        .bind(summary.batch_count)
        .bind(summary.interventions)
        .execute(&self.db)
        .await?;

        if summary.saved_kg >= Decimal::from(100) {
            award_badge(&self.db, farmer_id, BadgeKind::Expert).await?;
        }

        Ok(summary)
    }

    /// A farmer's most recent monthly summaries
    pub async fn recent(
        &self,
        farmer_id: Uuid,
        limit: Option<i64>,
    ) -> AppResult<Vec<MonthlyLossSummary>> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT);

        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT month, year, saved_kg, score, total_weight_kg, batch_count, interventions
            FROM loss_prevention_summaries
            WHERE farmer_id = $1
            ORDER BY year DESC, month DESC
            LIMIT $2
            "#,
        )
        .bind(farmer_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(SummaryRow::into_model).collect())
    }
}
