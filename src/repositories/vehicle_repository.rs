use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vehicle::{CreateVehicleRequest, UpdateVehicleRequest, Vehicle, VehicleFilters};
use crate::utils::errors::AppError;

/// Converte uma quilometragem f64 da API em Decimal para o banco
fn mileage_to_decimal(value: f64) -> Result<Decimal, AppError> {
    Decimal::from_f64_retain(value)
        .ok_or_else(|| AppError::BadRequest("Quilometragem inválida".to_string()))
}

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        payload: &CreateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        let mileage = mileage_to_decimal(payload.current_mileage.unwrap_or(0.0))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, company_id, plate, brand, model, year, vehicle_type, vehicle_status, current_mileage, fuel_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'active', $8, $9, now())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(company_id)
        .bind(payload.plate.to_uppercase())
        .bind(&payload.brand)
        .bind(&payload.model)
        .bind(payload.year)
        .bind(payload.vehicle_type.clone().unwrap_or_else(|| "caminhão".to_string()))
        .bind(mileage)
        .bind(payload.fuel_type.clone().unwrap_or_else(|| "diesel".to_string()))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_by_company(
        &self,
        company_id: Uuid,
        filters: &VehicleFilters,
    ) -> Result<Vec<Vehicle>, AppError> {
        let limit = filters.limit.unwrap_or(100).min(500);
        let offset = filters.offset.unwrap_or(0).max(0);

        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE company_id = $1
              AND ($2::text IS NULL OR vehicle_status = $2)
              AND ($3::text IS NULL OR vehicle_type = $3)
              AND ($4::text IS NULL OR plate ILIKE '%' || $4 || '%' OR brand ILIKE '%' || $4 || '%' OR model ILIKE '%' || $4 || '%')
            ORDER BY plate ASC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(company_id)
        .bind(filters.vehicle_status.as_deref())
        .bind(filters.vehicle_type.as_deref())
        .bind(filters.search.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn plate_exists(&self, company_id: Uuid, plate: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE company_id = $1 AND plate = $2)",
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
        payload: &UpdateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Veículo não encontrado".to_string()))?;

        if current.company_id != company_id {
            return Err(AppError::Forbidden(
                "Veículo não pertence a esta empresa".to_string(),
            ));
        }

        let mileage = match payload.current_mileage {
            Some(value) => mileage_to_decimal(value)?,
            None => current.current_mileage,
        };

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET plate = $2, brand = $3, model = $4, year = $5, vehicle_type = $6, vehicle_status = $7, current_mileage = $8, fuel_type = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.plate.clone().map(|p| p.to_uppercase()).unwrap_or(current.plate))
        .bind(payload.brand.clone().or(current.brand))
        .bind(payload.model.clone().or(current.model))
        .bind(payload.year.or(current.year))
        .bind(payload.vehicle_type.clone().unwrap_or(current.vehicle_type))
        .bind(payload.vehicle_status.clone().unwrap_or(current.vehicle_status))
        .bind(mileage)
        .bind(payload.fuel_type.clone().unwrap_or(current.fuel_type))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        let vehicle = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Veículo não encontrado".to_string()))?;

        if vehicle.company_id != company_id {
            return Err(AppError::Forbidden(
                "Veículo não pertence a esta empresa".to_string(),
            ));
        }

        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
