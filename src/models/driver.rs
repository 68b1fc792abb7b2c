//! Modelo de Driver
//!
//! Motoristas da frota, com dados de CNH para controle de habilitação.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Driver principal - mapeia a tabela drivers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub company_id: Uuid,
    pub full_name: String,
    pub cpf: Option<String>,
    pub phone: Option<String>,
    pub cnh_number: Option<String>,
    pub cnh_category: Option<String>,
    pub cnh_expiry: Option<NaiveDate>,
    pub driver_status: String,
    pub created_at: DateTime<Utc>,
}

/// Request para cadastrar um motorista
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 2, max = 120))]
    pub full_name: String,

    #[validate(length(min = 11, max = 14))]
    pub cpf: Option<String>,

    #[validate(length(min = 8, max = 20))]
    pub phone: Option<String>,

    pub cnh_number: Option<String>,

    #[validate(length(min = 1, max = 5))]
    pub cnh_category: Option<String>,

    pub cnh_expiry: Option<NaiveDate>,
}

/// Request para atualizar um motorista
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(length(min = 2, max = 120))]
    pub full_name: Option<String>,

    #[validate(length(min = 11, max = 14))]
    pub cpf: Option<String>,

    #[validate(length(min = 8, max = 20))]
    pub phone: Option<String>,

    pub cnh_number: Option<String>,

    #[validate(length(min = 1, max = 5))]
    pub cnh_category: Option<String>,

    pub cnh_expiry: Option<NaiveDate>,

    pub driver_status: Option<String>,
}

/// Filtros de listagem de motoristas
#[derive(Debug, Deserialize)]
pub struct DriverFilters {
    pub driver_status: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response de motorista para a API
#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub id: String,
    pub full_name: String,
    pub cpf: Option<String>,
    pub phone: Option<String>,
    pub cnh_number: Option<String>,
    pub cnh_category: Option<String>,
    pub cnh_expiry: Option<String>,
    pub driver_status: String,
    pub created_at: String,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id.to_string(),
            full_name: driver.full_name,
            cpf: driver.cpf,
            phone: driver.phone,
            cnh_number: driver.cnh_number,
            cnh_category: driver.cnh_category,
            cnh_expiry: driver.cnh_expiry.map(|d| d.to_string()),
            driver_status: driver.driver_status,
            created_at: driver.created_at.to_rfc3339(),
        }
    }
}
