//! Modelo de Vehicle
//!
//! Este módulo contém o struct Vehicle e suas variantes para CRUD.
//! O campo `vehicle_type` é texto livre canonizado pela tabela de
//! sinônimos quando o copiloto conta veículos por tipo.

use chrono::{DateTime, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Vehicle principal - mapeia exatamente a tabela vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub company_id: Uuid,
    pub plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub vehicle_type: String,
    pub vehicle_status: String,
    pub current_mileage: Decimal,
    pub fuel_type: String,
    pub created_at: DateTime<Utc>,
}

/// Request para criar um novo veículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 5, max = 20))]
    pub plate: String,

    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1950, max = 2035))]
    pub year: Option<i32>,

    #[validate(length(min = 2, max = 50))]
    pub vehicle_type: Option<String>,

    #[validate(length(min = 2, max = 20))]
    pub fuel_type: Option<String>,

    pub current_mileage: Option<f64>,
}

/// Request para atualizar um veículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 5, max = 20))]
    pub plate: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1950, max = 2035))]
    pub year: Option<i32>,

    #[validate(length(min = 2, max = 50))]
    pub vehicle_type: Option<String>,

    pub vehicle_status: Option<String>,

    pub current_mileage: Option<f64>,

    #[validate(length(min = 2, max = 20))]
    pub fuel_type: Option<String>,
}

/// Filtros para busca de veículos
#[derive(Debug, Deserialize)]
pub struct VehicleFilters {
    pub vehicle_status: Option<String>,
    pub vehicle_type: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response de veículo para a API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: String,
    pub plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub vehicle_type: String,
    pub vehicle_status: String,
    pub current_mileage: f64,
    pub fuel_type: String,
    pub created_at: String,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id.to_string(),
            plate: vehicle.plate,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            vehicle_type: vehicle.vehicle_type,
            vehicle_status: vehicle.vehicle_status,
            current_mileage: vehicle.current_mileage.to_f64().unwrap_or(0.0),
            fuel_type: vehicle.fuel_type,
            created_at: vehicle.created_at.to_rfc3339(),
        }
    }
}
