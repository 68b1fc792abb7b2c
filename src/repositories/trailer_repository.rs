use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::trailer::{CreateTrailerRequest, Trailer, UpdateTrailerRequest};
use crate::utils::errors::AppError;

pub struct TrailerRepository {
    pool: PgPool,
}

impl TrailerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        payload: &CreateTrailerRequest,
    ) -> Result<Trailer, AppError> {
        let capacity = payload
            .capacity_kg
            .map(|c| {
                Decimal::from_f64_retain(c)
                    .ok_or_else(|| AppError::BadRequest("Capacidade inválida".to_string()))
            })
            .transpose()?;

        let trailer = sqlx::query_as::<_, Trailer>(
            r#"
            INSERT INTO trailers (id, company_id, plate, trailer_type, capacity_kg, trailer_status, created_at)
            VALUES ($1, $2, $3, $4, $5, 'active', now())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(company_id)
        .bind(payload.plate.to_uppercase())
        .bind(&payload.trailer_type)
        .bind(capacity)
        .fetch_one(&self.pool)
        .await?;

        Ok(trailer)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Trailer>, AppError> {
        let trailer = sqlx::query_as::<_, Trailer>("SELECT * FROM trailers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(trailer)
    }

    pub async fn find_by_company(&self, company_id: Uuid) -> Result<Vec<Trailer>, AppError> {
        let trailers = sqlx::query_as::<_, Trailer>(
            "SELECT * FROM trailers WHERE company_id = $1 ORDER BY plate ASC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(trailers)
    }

    pub async fn plate_exists(&self, company_id: Uuid, plate: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM trailers WHERE company_id = $1 AND plate = $2)",
        )
        .bind(company_id)
        .bind(plate.to_uppercase())
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        company_id: Uuid,
        payload: &UpdateTrailerRequest,
    ) -> Result<Trailer, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reboque não encontrado".to_string()))?;

        if current.company_id != company_id {
            return Err(AppError::Forbidden(
                "Reboque não pertence a esta empresa".to_string(),
            ));
        }

        let capacity = match payload.capacity_kg {
            Some(value) => Some(
                Decimal::from_f64_retain(value)
                    .ok_or_else(|| AppError::BadRequest("Capacidade inválida".to_string()))?,
            ),
            None => current.capacity_kg,
        };

        let trailer = sqlx::query_as::<_, Trailer>(
            r#"
            UPDATE trailers
            SET plate = $2, trailer_type = $3, capacity_kg = $4, trailer_status = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.plate.clone().map(|p| p.to_uppercase()).unwrap_or(current.plate))
        .bind(payload.trailer_type.clone().or(current.trailer_type))
        .bind(capacity)
        .bind(payload.trailer_status.clone().unwrap_or(current.trailer_status))
        .fetch_one(&self.pool)
        .await?;

        Ok(trailer)
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        let trailer = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reboque não encontrado".to_string()))?;

        if trailer.company_id != company_id {
            return Err(AppError::Forbidden(
                "Reboque não pertence a esta empresa".to_string(),
            ));
        }

        sqlx::query("DELETE FROM trailers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
