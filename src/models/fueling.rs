//! Modelo de FuelingEvent
//!
//! Abastecimentos são gravados na tabela `fueling_events`, mas toda
//! leitura (telas de relatório e ferramenta do copiloto) passa pela view
//! `fueling_report`, que junta placa do veículo e nome do motorista.

use chrono::{DateTime, NaiveDate, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FuelingEvent {
    pub id: Uuid,
    pub company_id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub fueled_at: NaiveDate,
    pub liters: Decimal,
    pub price_per_liter: Option<Decimal>,
    pub total_cost: Option<Decimal>,
    pub odometer_km: Option<Decimal>,
    pub station: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Linha da view de relatório de abastecimentos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FuelingReportRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub vehicle_id: Uuid,
    pub vehicle_plate: String,
    pub driver_id: Option<Uuid>,
    pub driver_name: Option<String>,
    pub fueled_at: NaiveDate,
    pub liters: Decimal,
    pub price_per_liter: Option<Decimal>,
    pub total_cost: Option<Decimal>,
    pub odometer_km: Option<Decimal>,
    pub station: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFuelingRequest {
    pub vehicle_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub fueled_at: NaiveDate,

    #[validate(range(min = 0.1, max = 100000.0))]
    pub liters: f64,

    pub price_per_liter: Option<f64>,
    pub total_cost: Option<f64>,
    pub odometer_km: Option<f64>,

    #[validate(length(min = 2, max = 120))]
    pub station: Option<String>,
}

/// Filtros do relatório de abastecimentos
#[derive(Debug, Deserialize)]
pub struct FuelingFilters {
    pub vehicle_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct FuelingResponse {
    pub id: String,
    pub vehicle_id: String,
    pub vehicle_plate: String,
    pub driver_id: Option<String>,
    pub driver_name: Option<String>,
    pub fueled_at: String,
    pub liters: f64,
    pub price_per_liter: Option<f64>,
    pub total_cost: Option<f64>,
    pub odometer_km: Option<f64>,
    pub station: Option<String>,
    pub created_at: String,
}

impl From<FuelingReportRow> for FuelingResponse {
    fn from(row: FuelingReportRow) -> Self {
        Self {
            id: row.id.to_string(),
            vehicle_id: row.vehicle_id.to_string(),
            vehicle_plate: row.vehicle_plate,
            driver_id: row.driver_id.map(|d| d.to_string()),
            driver_name: row.driver_name,
            fueled_at: row.fueled_at.to_string(),
            liters: row.liters.to_f64().unwrap_or(0.0),
            price_per_liter: row.price_per_liter.and_then(|p| p.to_f64()),
            total_cost: row.total_cost.and_then(|t| t.to_f64()),
            odometer_km: row.odometer_km.and_then(|o| o.to_f64()),
            station: row.station,
            created_at: row.created_at.to_rfc3339(),
        }
    }
}
