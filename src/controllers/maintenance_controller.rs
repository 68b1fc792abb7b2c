use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::AuthContext;
use crate::models::maintenance::{
    CreateMaintenanceRequest, MaintenanceFilters, MaintenanceResponse, UpdateMaintenanceRequest,
};
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::audit_service::AuditService;
use crate::utils::errors::AppError;

pub struct MaintenanceController {
    repository: MaintenanceRepository,
    vehicles: VehicleRepository,
    audit: AuditService,
}

impl MaintenanceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: MaintenanceRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            audit: AuditService::new(pool),
        }
    }

    pub async fn create(
        &self,
        ctx: &AuthContext,
        request: CreateMaintenanceRequest,
    ) -> Result<MaintenanceResponse, AppError> {
        request.validate()?;

        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Veículo não encontrado".to_string()))?;

        if vehicle.company_id != ctx.company_id {
            return Err(AppError::Forbidden(
                "Veículo não pertence a esta empresa".to_string(),
            ));
        }

        let record = self.repository.create(ctx.company_id, &request).await?;

        self.audit
            .record(
                ctx,
                "create",
                "maintenance",
                Some(record.id),
                Some(json!({ "vehicle_id": record.vehicle_id, "maintenance_type": record.maintenance_type })),
            )
            .await;

        Ok(MaintenanceResponse::from(record))
    }

    pub async fn list(
        &self,
        ctx: &AuthContext,
        filters: MaintenanceFilters,
    ) -> Result<Vec<MaintenanceResponse>, AppError> {
        let records = self
            .repository
            .find_by_company(ctx.company_id, &filters)
            .await?;

        Ok(records.into_iter().map(MaintenanceResponse::from).collect())
    }

    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: Uuid,
        request: UpdateMaintenanceRequest,
    ) -> Result<MaintenanceResponse, AppError> {
        request.validate()?;

        let record = self.repository.update(id, ctx.company_id, &request).await?;

        self.audit
            .record(ctx, "update", "maintenance", Some(record.id), None)
            .await;

        Ok(MaintenanceResponse::from(record))
    }

    pub async fn delete(&self, ctx: &AuthContext, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, ctx.company_id).await?;

        self.audit
            .record(ctx, "delete", "maintenance", Some(id), None)
            .await;

        Ok(())
    }
}
