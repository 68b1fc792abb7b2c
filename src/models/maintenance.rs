//! Modelo de MaintenanceRecord

use chrono::{DateTime, NaiveDate, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub company_id: Uuid,
    pub vehicle_id: Uuid,
    pub maintenance_type: String,
    pub description: Option<String>,
    pub cost: Option<Decimal>,
    pub odometer_km: Option<Decimal>,
    pub service_date: NaiveDate,
    pub workshop: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaintenanceRequest {
    pub vehicle_id: Uuid,

    #[validate(length(min = 2, max = 80))]
    pub maintenance_type: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub cost: Option<f64>,

    pub odometer_km: Option<f64>,

    pub service_date: NaiveDate,

    #[validate(length(min = 2, max = 120))]
    pub workshop: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMaintenanceRequest {
    #[validate(length(min = 2, max = 80))]
    pub maintenance_type: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub cost: Option<f64>,

    pub odometer_km: Option<f64>,

    pub service_date: Option<NaiveDate>,

    #[validate(length(min = 2, max = 120))]
    pub workshop: Option<String>,
}

/// Filtros de listagem de manutenções
#[derive(Debug, Deserialize)]
pub struct MaintenanceFilters {
    pub vehicle_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct MaintenanceResponse {
    pub id: String,
    pub vehicle_id: String,
    pub maintenance_type: String,
    pub description: Option<String>,
    pub cost: Option<f64>,
    pub odometer_km: Option<f64>,
    pub service_date: String,
    pub workshop: Option<String>,
    pub created_at: String,
}

impl From<MaintenanceRecord> for MaintenanceResponse {
    fn from(record: MaintenanceRecord) -> Self {
        Self {
            id: record.id.to_string(),
            vehicle_id: record.vehicle_id.to_string(),
            maintenance_type: record.maintenance_type,
            description: record.description,
            cost: record.cost.and_then(|c| c.to_f64()),
            odometer_km: record.odometer_km.and_then(|o| o.to_f64()),
            service_date: record.service_date.to_string(),
            workshop: record.workshop,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}
