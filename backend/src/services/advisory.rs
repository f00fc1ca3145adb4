//! Advisory generation and history

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::advisory::{generate_advisories, ADVISORY_HISTORY_CAP};
use shared::models::{Advisory, WeatherData};
use shared::validation::validate_forecast_window;

use crate::error::{AppError, AppResult};

/// Default number of history entries returned
const DEFAULT_HISTORY_LIMIT: i64 = 10;

/// Advisory service
#[derive(Clone)]
pub struct AdvisoryService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct HistoryRow {
    advisory: serde_json::Value,
}

impl AdvisoryService {
    /// Create a new AdvisoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Generate advisories for a forecast
    ///
    /// Validates the window shape on behalf of the engine; the engine
    /// itself has no failure modes.
    pub fn advisories_for(&self, weather: &WeatherData) -> AppResult<Vec<Advisory>> {
        validate_forecast_window(&weather.forecasts).map_err(|msg| AppError::Validation {
            field: "forecasts".to_string(),
            message: msg.to_string(),
            message_bn: "পূর্বাভাসের তথ্য সঠিক নয়".to_string(),
        })?;

        Ok(generate_advisories(&weather.forecasts))
    }

    /// Append advisories to a farmer's history, keeping the newest
    /// [`ADVISORY_HISTORY_CAP`] entries
    pub async fn record_history(&self, farmer_id: Uuid, advisories: &[Advisory]) -> AppResult<()> {
        for advisory in advisories {
            let json = serde_json::to_value(advisory)
                .map_err(|e| AppError::Internal(e.to_string()))?;

            sqlx::query(
                r#"
                INSERT INTO advisory_history (id, farmer_id, condition, risk_level, advisory)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(advisory.id)
            .bind(farmer_id)
            .bind(advisory.condition.as_str())
            .bind(advisory.risk_level as i32)
            .bind(&json)
            .execute(&self.db)
            .await?;
        }

        // Prune to the newest entries
        sqlx::query(
            r#"
            DELETE FROM advisory_history
            WHERE farmer_id = $1
              AND id NOT IN (
                  SELECT id FROM advisory_history
                  WHERE farmer_id = $1
                  ORDER BY created_at DESC, id
                  LIMIT $2
              )
            "#,
        )
        .bind(farmer_id)
        .bind(ADVISORY_HISTORY_CAP as i64)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Get a farmer's advisory history, most recent first
    pub async fn get_history(
        &self,
        farmer_id: Uuid,
        limit: Option<i64>,
    ) -> AppResult<Vec<Advisory>> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT advisory
            FROM advisory_history
            WHERE farmer_id = $1
            ORDER BY created_at DESC, id
            LIMIT $2
            "#,
        )
        .bind(farmer_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter()
            .map(|row| {
                serde_json::from_value(row.advisory)
                    .map_err(|e| AppError::Internal(format!("Corrupt advisory record: {}", e)))
            })
            .collect()
    }

    /// Clear a farmer's advisory history
    pub async fn clear_history(&self, farmer_id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM advisory_history WHERE farmer_id = $1")
            .bind(farmer_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
