use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::maintenance::{
    CreateMaintenanceRequest, MaintenanceFilters, MaintenanceRecord, UpdateMaintenanceRequest,
};
use crate::utils::errors::AppError;

fn field_to_decimal(value: f64, field: &str) -> Result<Decimal, AppError> {
    Decimal::from_f64_retain(value)
        .ok_or_else(|| AppError::BadRequest(format!("Valor inválido para {}", field)))
}

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        payload: &CreateMaintenanceRequest,
    ) -> Result<MaintenanceRecord, AppError> {
        let cost = payload
            .cost
            .map(|c| field_to_decimal(c, "cost"))
            .transpose()?;
        let odometer = payload
            .odometer_km
            .map(|o| field_to_decimal(o, "odometer_km"))
            .transpose()?;

        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_records (id, company_id, vehicle_id, maintenance_type, description, cost, odometer_km, service_date, workshop, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(company_id)
        .bind(payload.vehicle_id)
        .bind(&payload.maintenance_type)
        .bind(&payload.description)
        .bind(cost)
        .bind(odometer)
        .bind(payload.service_date)
        .bind(&payload.workshop)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceRecord>, AppError> {
        let record =
            sqlx::query_as::<_, MaintenanceRecord>("SELECT * FROM maintenance_records WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(record)
    }

    pub async fn find_by_company(
        &self,
        company_id: Uuid,
        filters: &MaintenanceFilters,
    ) -> Result<Vec<MaintenanceRecord>, AppError> {
        let limit = filters.limit.unwrap_or(100).min(500);
        let offset = filters.offset.unwrap_or(0).max(0);

        let records = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT * FROM maintenance_records
            WHERE company_id = $1
              AND ($2::uuid IS NULL OR vehicle_id = $2)
              AND ($3::date IS NULL OR service_date >= $3)
              AND ($4::date IS NULL OR service_date <= $4)
            ORDER BY service_date DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(company_id)
        .bind(filters.vehicle_id)
        .bind(filters.from)
        .bind(filters.to)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn update(
        &self,
        id: Uuid,
        company_id: Uuid,
        payload: &UpdateMaintenanceRequest,
    ) -> Result<MaintenanceRecord, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Manutenção não encontrada".to_string()))?;

        if current.company_id != company_id {
            return Err(AppError::Forbidden(
                "Manutenção não pertence a esta empresa".to_string(),
            ));
        }

        let cost = match payload.cost {
            Some(value) => Some(field_to_decimal(value, "cost")?),
            None => current.cost,
        };
        let odometer = match payload.odometer_km {
            Some(value) => Some(field_to_decimal(value, "odometer_km")?),
            None => current.odometer_km,
        };

        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            UPDATE maintenance_records
            SET maintenance_type = $2, description = $3, cost = $4, odometer_km = $5, service_date = $6, workshop = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.maintenance_type.clone().unwrap_or(current.maintenance_type))
        .bind(payload.description.clone().or(current.description))
        .bind(cost)
        .bind(odometer)
        .bind(payload.service_date.unwrap_or(current.service_date))
        .bind(payload.workshop.clone().or(current.workshop))
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        let record = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Manutenção não encontrada".to_string()))?;

        if record.company_id != company_id {
            return Err(AppError::Forbidden(
                "Manutenção não pertence a esta empresa".to_string(),
            ));
        }

        sqlx::query("DELETE FROM maintenance_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
