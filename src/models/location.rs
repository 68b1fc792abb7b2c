//! Modelo de Location
//!
//! Posições enviadas pelo app do motorista. A última posição de cada
//! motorista alimenta o mapa ao vivo; um ping dentro da janela recente
//! marca o motorista como online.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Janela que considera um motorista online, em minutos
pub const ONLINE_WINDOW_MINUTES: i64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DriverLocation {
    pub id: Uuid,
    pub company_id: Uuid,
    pub driver_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub speed_kmh: Option<f64>,
    pub heading: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLocationRequest {
    pub driver_id: Uuid,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    #[validate(range(min = 0.0, max = 300.0))]
    pub speed_kmh: Option<f64>,

    #[validate(range(min = 0.0, max = 360.0))]
    pub heading: Option<f64>,
}

/// Última posição conhecida de um motorista, com nome para o mapa
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LatestLocationRow {
    pub driver_id: Uuid,
    pub driver_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub speed_kmh: Option<f64>,
    pub heading: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct LatestLocationResponse {
    pub driver_id: String,
    pub driver_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub speed_kmh: Option<f64>,
    pub heading: Option<f64>,
    pub recorded_at: String,
    pub online: bool,
}

impl LatestLocationResponse {
    pub fn from_row(row: LatestLocationRow, now: DateTime<Utc>) -> Self {
        let online = now - row.recorded_at <= chrono::Duration::minutes(ONLINE_WINDOW_MINUTES);
        Self {
            driver_id: row.driver_id.to_string(),
            driver_name: row.driver_name,
            latitude: row.latitude,
            longitude: row.longitude,
            speed_kmh: row.speed_kmh,
            heading: row.heading,
            recorded_at: row.recorded_at.to_rfc3339(),
            online,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_at(recorded_at: DateTime<Utc>) -> LatestLocationRow {
        LatestLocationRow {
            driver_id: Uuid::new_v4(),
            driver_name: "Carlos Lima".to_string(),
            latitude: -23.55,
            longitude: -46.63,
            speed_kmh: Some(62.0),
            heading: None,
            recorded_at,
        }
    }

    #[test]
    fn test_online_flag_within_window() {
        let now = Utc::now();
        let response = LatestLocationResponse::from_row(row_at(now - chrono::Duration::minutes(2)), now);
        assert!(response.online);
    }

    #[test]
    fn test_online_flag_outside_window() {
        let now = Utc::now();
        let response = LatestLocationResponse::from_row(row_at(now - chrono::Duration::minutes(30)), now);
        assert!(!response.online);
    }
}
