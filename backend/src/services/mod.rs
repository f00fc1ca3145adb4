//! Business logic services for the Amar Foshol backend

pub mod advisory;
pub mod auth;
pub mod batch;
pub mod loss_prevention;
pub mod risk;
pub mod weather;

pub use advisory::AdvisoryService;
pub use auth::AuthService;
pub use batch::CropBatchService;
pub use loss_prevention::LossPreventionService;
pub use weather::WeatherService;

use shared::models::BadgeKind;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;

/// Award a badge to a farmer, ignoring repeats
pub(crate) async fn award_badge(db: &PgPool, farmer_id: Uuid, kind: BadgeKind) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO farmer_badges (farmer_id, kind)
        VALUES ($1, $2)
        ON CONFLICT (farmer_id, kind) DO NOTHING
        "#,
    )
    .bind(farmer_id)
    .bind(kind.as_str())
    .execute(db)
    .await?;

    Ok(())
}
