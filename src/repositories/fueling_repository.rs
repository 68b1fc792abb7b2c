use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::fueling::{
    CreateFuelingRequest, FuelingEvent, FuelingFilters, FuelingReportRow,
};
use crate::utils::errors::AppError;

fn field_to_decimal(value: f64, field: &str) -> Result<Decimal, AppError> {
    Decimal::from_f64_retain(value)
        .ok_or_else(|| AppError::BadRequest(format!("Valor inválido para {}", field)))
}

pub struct FuelingRepository {
    pool: PgPool,
}

impl FuelingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        payload: &CreateFuelingRequest,
    ) -> Result<FuelingEvent, AppError> {
        let liters = field_to_decimal(payload.liters, "liters")?;
        let price = payload
            .price_per_liter
            .map(|p| field_to_decimal(p, "price_per_liter"))
            .transpose()?;
        let total = payload
            .total_cost
            .map(|t| field_to_decimal(t, "total_cost"))
            .transpose()?;
        let odometer = payload
            .odometer_km
            .map(|o| field_to_decimal(o, "odometer_km"))
            .transpose()?;

        let event = sqlx::query_as::<_, FuelingEvent>(
            r#"
            INSERT INTO fueling_events (id, company_id, vehicle_id, driver_id, fueled_at, liters, price_per_liter, total_cost, odometer_km, station, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, now())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(company_id)
        .bind(payload.vehicle_id)
        .bind(payload.driver_id)
        .bind(payload.fueled_at)
        .bind(liters)
        .bind(price)
        .bind(total)
        .bind(odometer)
        .bind(&payload.station)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<FuelingEvent>, AppError> {
        let event = sqlx::query_as::<_, FuelingEvent>("SELECT * FROM fueling_events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    pub async fn find_report_by_id(&self, id: Uuid) -> Result<Option<FuelingReportRow>, AppError> {
        let row = sqlx::query_as::<_, FuelingReportRow>("SELECT * FROM fueling_report WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Leitura sempre pela view `fueling_report`, que resolve placa e
    /// nome do motorista em uma consulta só.
    pub async fn find_report(
        &self,
        company_id: Uuid,
        filters: &FuelingFilters,
    ) -> Result<Vec<FuelingReportRow>, AppError> {
        let limit = filters.limit.unwrap_or(100).min(500);
        let offset = filters.offset.unwrap_or(0).max(0);

        let rows = sqlx::query_as::<_, FuelingReportRow>(
            r#"
            SELECT * FROM fueling_report
            WHERE company_id = $1
              AND ($2::uuid IS NULL OR vehicle_id = $2)
              AND ($3::uuid IS NULL OR driver_id = $3)
              AND ($4::date IS NULL OR fueled_at >= $4)
              AND ($5::date IS NULL OR fueled_at <= $5)
            ORDER BY fueled_at DESC, created_at DESC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(company_id)
        .bind(filters.vehicle_id)
        .bind(filters.driver_id)
        .bind(filters.from)
        .bind(filters.to)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        let event = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Abastecimento não encontrado".to_string()))?;

        if event.company_id != company_id {
            return Err(AppError::Forbidden(
                "Abastecimento não pertence a esta empresa".to_string(),
            ));
        }

        sqlx::query("DELETE FROM fueling_events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
