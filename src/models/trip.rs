//! Modelo de Trip
//!
//! Viagens ligam motorista, veículo e opcionalmente reboque. A distância
//! percorrida alimenta o cálculo de quilometragem por período do copiloto.

use chrono::{DateTime, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Estados válidos de uma viagem
pub const TRIP_STATUSES: [&str; 4] = ["scheduled", "in_progress", "completed", "cancelled"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: Uuid,
    pub company_id: Uuid,
    pub driver_id: Uuid,
    pub vehicle_id: Uuid,
    pub trailer_id: Option<Uuid>,
    pub origin: String,
    pub destination: String,
    pub scheduled_departure: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub distance_km: Option<Decimal>,
    pub trip_status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTripRequest {
    pub driver_id: Uuid,
    pub vehicle_id: Uuid,
    pub trailer_id: Option<Uuid>,

    #[validate(length(min = 2, max = 200))]
    pub origin: String,

    #[validate(length(min = 2, max = 200))]
    pub destination: String,

    pub scheduled_departure: DateTime<Utc>,

    pub distance_km: Option<f64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTripRequest {
    pub driver_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub trailer_id: Option<Uuid>,

    #[validate(length(min = 2, max = 200))]
    pub origin: Option<String>,

    #[validate(length(min = 2, max = 200))]
    pub destination: Option<String>,

    pub scheduled_departure: Option<DateTime<Utc>>,

    pub distance_km: Option<f64>,
}

/// Request para transição de estado da viagem
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTripStatusRequest {
    pub trip_status: String,
}

/// Filtros de listagem de viagens
#[derive(Debug, Deserialize)]
pub struct TripFilters {
    pub driver_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub trip_status: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub id: String,
    pub driver_id: String,
    pub vehicle_id: String,
    pub trailer_id: Option<String>,
    pub origin: String,
    pub destination: String,
    pub scheduled_departure: String,
    pub completed_at: Option<String>,
    pub distance_km: Option<f64>,
    pub trip_status: String,
    pub created_at: String,
}

impl From<Trip> for TripResponse {
    fn from(trip: Trip) -> Self {
        Self {
            id: trip.id.to_string(),
            driver_id: trip.driver_id.to_string(),
            vehicle_id: trip.vehicle_id.to_string(),
            trailer_id: trip.trailer_id.map(|t| t.to_string()),
            origin: trip.origin,
            destination: trip.destination,
            scheduled_departure: trip.scheduled_departure.to_rfc3339(),
            completed_at: trip.completed_at.map(|t| t.to_rfc3339()),
            distance_km: trip.distance_km.and_then(|d| d.to_f64()),
            trip_status: trip.trip_status,
            created_at: trip.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses() {
        assert!(TRIP_STATUSES.contains(&"scheduled"));
        assert!(TRIP_STATUSES.contains(&"completed"));
        assert!(!TRIP_STATUSES.contains(&"paused"));
    }
}
