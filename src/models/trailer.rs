//! Modelo de Trailer

use chrono::{DateTime, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trailer {
    pub id: Uuid,
    pub company_id: Uuid,
    pub plate: String,
    pub trailer_type: Option<String>,
    pub capacity_kg: Option<Decimal>,
    pub trailer_status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTrailerRequest {
    #[validate(length(min = 5, max = 20))]
    pub plate: String,

    #[validate(length(min = 2, max = 50))]
    pub trailer_type: Option<String>,

    pub capacity_kg: Option<f64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTrailerRequest {
    #[validate(length(min = 5, max = 20))]
    pub plate: Option<String>,

    #[validate(length(min = 2, max = 50))]
    pub trailer_type: Option<String>,

    pub capacity_kg: Option<f64>,

    pub trailer_status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrailerResponse {
    pub id: String,
    pub plate: String,
    pub trailer_type: Option<String>,
    pub capacity_kg: Option<f64>,
    pub trailer_status: String,
    pub created_at: String,
}

impl From<Trailer> for TrailerResponse {
    fn from(trailer: Trailer) -> Self {
        Self {
            id: trailer.id.to_string(),
            plate: trailer.plate,
            trailer_type: trailer.trailer_type,
            capacity_kg: trailer.capacity_kg.and_then(|c| c.to_f64()),
            trailer_status: trailer.trailer_status,
            created_at: trailer.created_at.to_rfc3339(),
        }
    }
}
