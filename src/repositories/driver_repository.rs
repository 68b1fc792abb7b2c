use sqlx::PgPool;
use uuid::Uuid;

use crate::models::driver::{CreateDriverRequest, Driver, DriverFilters, UpdateDriverRequest};
use crate::utils::errors::AppError;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        payload: &CreateDriverRequest,
    ) -> Result<Driver, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (id, company_id, full_name, cpf, phone, cnh_number, cnh_category, cnh_expiry, driver_status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'active', now())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(company_id)
        .bind(&payload.full_name)
        .bind(&payload.cpf)
        .bind(&payload.phone)
        .bind(&payload.cnh_number)
        .bind(&payload.cnh_category)
        .bind(payload.cnh_expiry)
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    pub async fn find_by_company(
        &self,
        company_id: Uuid,
        filters: &DriverFilters,
    ) -> Result<Vec<Driver>, AppError> {
        let limit = filters.limit.unwrap_or(100).min(500);
        let offset = filters.offset.unwrap_or(0).max(0);

        let drivers = sqlx::query_as::<_, Driver>(
            r#"
            SELECT * FROM drivers
            WHERE company_id = $1
              AND ($2::text IS NULL OR driver_status = $2)
              AND ($3::text IS NULL OR full_name ILIKE '%' || $3 || '%' OR cpf ILIKE '%' || $3 || '%')
            ORDER BY full_name ASC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(company_id)
        .bind(filters.driver_status.as_deref())
        .bind(filters.search.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(drivers)
    }

    pub async fn cpf_exists(&self, company_id: Uuid, cpf: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM drivers WHERE company_id = $1 AND cpf = $2)",
        )
        .bind(company_id)
        .bind(cpf)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        company_id: Uuid,
        payload: &UpdateDriverRequest,
    ) -> Result<Driver, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorista não encontrado".to_string()))?;

        if current.company_id != company_id {
            return Err(AppError::Forbidden(
                "Motorista não pertence a esta empresa".to_string(),
            ));
        }

        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET full_name = $2, cpf = $3, phone = $4, cnh_number = $5, cnh_category = $6, cnh_expiry = $7, driver_status = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.full_name.clone().unwrap_or(current.full_name))
        .bind(payload.cpf.clone().or(current.cpf))
        .bind(payload.phone.clone().or(current.phone))
        .bind(payload.cnh_number.clone().or(current.cnh_number))
        .bind(payload.cnh_category.clone().or(current.cnh_category))
        .bind(payload.cnh_expiry.or(current.cnh_expiry))
        .bind(payload.driver_status.clone().unwrap_or(current.driver_status))
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        let driver = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorista não encontrado".to_string()))?;

        if driver.company_id != company_id {
            return Err(AppError::Forbidden(
                "Motorista não pertence a esta empresa".to_string(),
            ));
        }

        sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
