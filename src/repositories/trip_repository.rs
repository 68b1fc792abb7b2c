use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::trip::{CreateTripRequest, Trip, TripFilters, UpdateTripRequest};
use crate::utils::errors::AppError;

fn distance_to_decimal(value: f64) -> Result<Decimal, AppError> {
    Decimal::from_f64_retain(value)
        .ok_or_else(|| AppError::BadRequest("Distância inválida".to_string()))
}

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        payload: &CreateTripRequest,
    ) -> Result<Trip, AppError> {
        let distance = payload.distance_km.map(distance_to_decimal).transpose()?;

        let trip = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (id, company_id, driver_id, vehicle_id, trailer_id, origin, destination, scheduled_departure, distance_km, trip_status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'scheduled', now())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(company_id)
        .bind(payload.driver_id)
        .bind(payload.vehicle_id)
        .bind(payload.trailer_id)
        .bind(&payload.origin)
        .bind(&payload.destination)
        .bind(payload.scheduled_departure)
        .bind(distance)
        .fetch_one(&self.pool)
        .await?;

        Ok(trip)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(trip)
    }

    pub async fn find_by_company(
        &self,
        company_id: Uuid,
        filters: &TripFilters,
    ) -> Result<Vec<Trip>, AppError> {
        let limit = filters.limit.unwrap_or(100).min(500);
        let offset = filters.offset.unwrap_or(0).max(0);

        let trips = sqlx::query_as::<_, Trip>(
            r#"
            SELECT * FROM trips
            WHERE company_id = $1
              AND ($2::uuid IS NULL OR driver_id = $2)
              AND ($3::uuid IS NULL OR vehicle_id = $3)
              AND ($4::text IS NULL OR trip_status = $4)
              AND ($5::timestamptz IS NULL OR scheduled_departure >= $5)
              AND ($6::timestamptz IS NULL OR scheduled_departure <= $6)
            ORDER BY scheduled_departure DESC
            LIMIT $7 OFFSET $8
            "#,
        )
        .bind(company_id)
        .bind(filters.driver_id)
        .bind(filters.vehicle_id)
        .bind(filters.trip_status.as_deref())
        .bind(filters.from)
        .bind(filters.to)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(trips)
    }

    pub async fn update(
        &self,
        id: Uuid,
        company_id: Uuid,
        payload: &UpdateTripRequest,
    ) -> Result<Trip, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Viagem não encontrada".to_string()))?;

        if current.company_id != company_id {
            return Err(AppError::Forbidden(
                "Viagem não pertence a esta empresa".to_string(),
            ));
        }

        let distance = match payload.distance_km {
            Some(value) => Some(distance_to_decimal(value)?),
            None => current.distance_km,
        };

        let trip = sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
            SET driver_id = $2, vehicle_id = $3, trailer_id = $4, origin = $5, destination = $6, scheduled_departure = $7, distance_km = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.driver_id.unwrap_or(current.driver_id))
        .bind(payload.vehicle_id.unwrap_or(current.vehicle_id))
        .bind(payload.trailer_id.or(current.trailer_id))
        .bind(payload.origin.clone().unwrap_or(current.origin))
        .bind(payload.destination.clone().unwrap_or(current.destination))
        .bind(payload.scheduled_departure.unwrap_or(current.scheduled_departure))
        .bind(distance)
        .fetch_one(&self.pool)
        .await?;

        Ok(trip)
    }

    /// Transição de estado. Completar uma viagem carimba `completed_at`
    /// uma única vez; voltar o estado não apaga o carimbo.
    pub async fn update_status(
        &self,
        id: Uuid,
        company_id: Uuid,
        trip_status: &str,
    ) -> Result<Trip, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Viagem não encontrada".to_string()))?;

        if current.company_id != company_id {
            return Err(AppError::Forbidden(
                "Viagem não pertence a esta empresa".to_string(),
            ));
        }

        let trip = sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
            SET trip_status = $2,
                completed_at = CASE
                    WHEN $2 = 'completed' AND completed_at IS NULL THEN now()
                    ELSE completed_at
                END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(trip_status)
        .fetch_one(&self.pool)
        .await?;

        Ok(trip)
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        let trip = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Viagem não encontrada".to_string()))?;

        if trip.company_id != company_id {
            return Err(AppError::Forbidden(
                "Viagem não pertence a esta empresa".to_string(),
            ));
        }

        sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
