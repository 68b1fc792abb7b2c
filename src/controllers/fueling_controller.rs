use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::AuthContext;
use crate::models::fueling::{CreateFuelingRequest, FuelingFilters, FuelingResponse};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::fueling_repository::FuelingRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::audit_service::AuditService;
use crate::utils::errors::AppError;

pub struct FuelingController {
    repository: FuelingRepository,
    vehicles: VehicleRepository,
    drivers: DriverRepository,
    audit: AuditService,
}

impl FuelingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: FuelingRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool.clone()),
            audit: AuditService::new(pool),
        }
    }

    pub async fn create(
        &self,
        ctx: &AuthContext,
        request: CreateFuelingRequest,
    ) -> Result<FuelingResponse, AppError> {
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

        if let Some(driver_id) = request.driver_id {
            let driver = self
                .drivers
                .find_by_id(driver_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Motorista não encontrado".to_string()))?;

            if driver.company_id != ctx.company_id {
                return Err(AppError::Forbidden(
                    "Motorista não pertence a esta empresa".to_string(),
                ));
            }
        }

        let event = self.repository.create(ctx.company_id, &request).await?;

        self.audit
            .record(
                ctx,
                "create",
                "fueling",
                Some(event.id),
                Some(json!({ "vehicle_id": event.vehicle_id, "fueled_at": event.fueled_at })),
            )
            .await;

        // A response sai da view para já incluir placa e motorista
        self.repository
            .find_report_by_id(event.id)
            .await?
            .map(FuelingResponse::from)
            .ok_or_else(|| AppError::Internal("Abastecimento recém-criado não encontrado na view".to_string()))
    }

    pub async fn list(
        &self,
        ctx: &AuthContext,
        filters: FuelingFilters,
    ) -> Result<Vec<FuelingResponse>, AppError> {
        let rows = self.repository.find_report(ctx.company_id, &filters).await?;
        Ok(rows.into_iter().map(FuelingResponse::from).collect())
    }

    pub async fn delete(&self, ctx: &AuthContext, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, ctx.company_id).await?;

        self.audit.record(ctx, "delete", "fueling", Some(id), None).await;

        Ok(())
    }
}
