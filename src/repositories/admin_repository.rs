use sqlx::PgPool;
use uuid::Uuid;

use crate::models::admin::Admin;
use crate::utils::errors::AppError;

pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Busca por email para o login. Emails são únicos por empresa.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT * FROM admins WHERE LOWER(email) = LOWER($1) LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(admin)
    }

    pub async fn find_by_company(&self, company_id: Uuid) -> Result<Vec<Admin>, AppError> {
        let admins = sqlx::query_as::<_, Admin>(
            "SELECT * FROM admins WHERE company_id = $1 ORDER BY created_at ASC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(admins)
    }

    pub async fn email_exists(&self, company_id: Uuid, email: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM admins WHERE company_id = $1 AND LOWER(email) = LOWER($2))",
        )
        .bind(company_id)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        full_name: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<Admin, AppError> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (id, company_id, full_name, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, now())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(company_id)
        .bind(full_name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        Ok(admin)
    }

    pub async fn update(
        &self,
        id: Uuid,
        company_id: Uuid,
        full_name: Option<String>,
        role: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Admin, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Administrador não encontrado".to_string()))?;

        if current.company_id != company_id {
            return Err(AppError::Forbidden(
                "Administrador não pertence a esta empresa".to_string(),
            ));
        }

        let admin = sqlx::query_as::<_, Admin>(
            r#"
            UPDATE admins
            SET full_name = $2, role = $3, password_hash = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(full_name.unwrap_or(current.full_name))
        .bind(role.unwrap_or(current.role))
        .bind(password_hash.unwrap_or(current.password_hash))
        .fetch_one(&self.pool)
        .await?;

        Ok(admin)
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        let admin = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Administrador não encontrado".to_string()))?;

        if admin.company_id != company_id {
            return Err(AppError::Forbidden(
                "Administrador não pertence a esta empresa".to_string(),
            ));
        }

        sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
