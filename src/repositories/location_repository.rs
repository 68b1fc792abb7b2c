use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::location::{CreateLocationRequest, DriverLocation, LatestLocationRow};
use crate::utils::errors::AppError;

pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Grava um ping de posição do app do motorista.
    pub async fn insert_ping(
        &self,
        company_id: Uuid,
        payload: &CreateLocationRequest,
    ) -> Result<DriverLocation, AppError> {
        let location = sqlx::query_as::<_, DriverLocation>(
            r#"
            INSERT INTO driver_locations (id, company_id, driver_id, latitude, longitude, speed_kmh, heading, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(company_id)
        .bind(payload.driver_id)
        .bind(payload.latitude)
        .bind(payload.longitude)
        .bind(payload.speed_kmh)
        .bind(payload.heading)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(location)
    }

    /// Última posição conhecida de cada motorista da empresa.
    pub async fn find_latest_per_driver(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<LatestLocationRow>, AppError> {
        let rows = sqlx::query_as::<_, LatestLocationRow>(
            r#"
            SELECT DISTINCT ON (l.driver_id)
                l.driver_id,
                d.full_name AS driver_name,
                l.latitude,
                l.longitude,
                l.speed_kmh,
                l.heading,
                l.recorded_at
            FROM driver_locations l
            JOIN drivers d ON d.id = l.driver_id
            WHERE l.company_id = $1
            ORDER BY l.driver_id, l.recorded_at DESC
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Última posição de um motorista específico.
    pub async fn find_latest_for_driver(
        &self,
        company_id: Uuid,
        driver_id: Uuid,
    ) -> Result<Option<LatestLocationRow>, AppError> {
        let row = sqlx::query_as::<_, LatestLocationRow>(
            r#"
            SELECT
                l.driver_id,
                d.full_name AS driver_name,
                l.latitude,
                l.longitude,
                l.speed_kmh,
                l.heading,
                l.recorded_at
            FROM driver_locations l
            JOIN drivers d ON d.id = l.driver_id
            WHERE l.company_id = $1 AND l.driver_id = $2
            ORDER BY l.recorded_at DESC
            LIMIT 1
            "#,
        )
        .bind(company_id)
        .bind(driver_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
