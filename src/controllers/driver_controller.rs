use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::AuthContext;
use crate::models::driver::{
    CreateDriverRequest, DriverFilters, DriverResponse, UpdateDriverRequest,
};
use crate::repositories::driver_repository::DriverRepository;
use crate::services::audit_service::AuditService;
use crate::utils::errors::AppError;

pub struct DriverController {
    repository: DriverRepository,
    audit: AuditService,
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DriverRepository::new(pool.clone()),
            audit: AuditService::new(pool),
        }
    }

    pub async fn create(
        &self,
        ctx: &AuthContext,
        request: CreateDriverRequest,
    ) -> Result<DriverResponse, AppError> {
        request.validate()?;

        if let Some(cpf) = &request.cpf {
            if self.repository.cpf_exists(ctx.company_id, cpf).await? {
                return Err(AppError::Conflict(
                    "Já existe um motorista com este CPF".to_string(),
                ));
            }
        }

        let driver = self.repository.create(ctx.company_id, &request).await?;

        self.audit
            .record(
                ctx,
                "create",
                "driver",
                Some(driver.id),
                Some(json!({ "full_name": driver.full_name })),
            )
            .await;

        Ok(DriverResponse::from(driver))
    }

    pub async fn get_by_id(&self, ctx: &AuthContext, id: Uuid) -> Result<DriverResponse, AppError> {
        let driver = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorista não encontrado".to_string()))?;

        if driver.company_id != ctx.company_id {
            return Err(AppError::Forbidden(
                "Motorista não pertence a esta empresa".to_string(),
            ));
        }

        Ok(DriverResponse::from(driver))
    }

    pub async fn list(
        &self,
        ctx: &AuthContext,
        filters: DriverFilters,
    ) -> Result<Vec<DriverResponse>, AppError> {
        let drivers = self
            .repository
            .find_by_company(ctx.company_id, &filters)
            .await?;

        Ok(drivers.into_iter().map(DriverResponse::from).collect())
    }

    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: Uuid,
        request: UpdateDriverRequest,
    ) -> Result<DriverResponse, AppError> {
        request.validate()?;

        let driver = self.repository.update(id, ctx.company_id, &request).await?;

        self.audit
            .record(ctx, "update", "driver", Some(driver.id), None)
            .await;

        Ok(DriverResponse::from(driver))
    }

    pub async fn delete(&self, ctx: &AuthContext, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, ctx.company_id).await?;

        self.audit.record(ctx, "delete", "driver", Some(id), None).await;

        Ok(())
    }
}
