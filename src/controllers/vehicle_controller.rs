use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::AuthContext;
use crate::models::vehicle::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters, VehicleResponse,
};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::audit_service::AuditService;
use crate::utils::errors::AppError;

pub struct VehicleController {
    repository: VehicleRepository,
    audit: AuditService,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            audit: AuditService::new(pool),
        }
    }

    pub async fn create(
        &self,
        ctx: &AuthContext,
        request: CreateVehicleRequest,
    ) -> Result<VehicleResponse, AppError> {
        request.validate()?;

        if self.repository.plate_exists(ctx.company_id, &request.plate).await? {
            return Err(AppError::Conflict(
                "Já existe um veículo com esta placa".to_string(),
            ));
        }

        let vehicle = self.repository.create(ctx.company_id, &request).await?;

        self.audit
            .record(
                ctx,
                "create",
                "vehicle",
                Some(vehicle.id),
                Some(json!({ "plate": vehicle.plate })),
            )
            .await;

        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn get_by_id(
        &self,
        ctx: &AuthContext,
        id: Uuid,
    ) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Veículo não encontrado".to_string()))?;

        if vehicle.company_id != ctx.company_id {
            return Err(AppError::Forbidden(
                "Veículo não pertence a esta empresa".to_string(),
            ));
        }

        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn list(
        &self,
        ctx: &AuthContext,
        filters: VehicleFilters,
    ) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self
            .repository
            .find_by_company(ctx.company_id, &filters)
            .await?;

        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<VehicleResponse, AppError> {
        request.validate()?;

        // Troca de placa também respeita a unicidade por empresa
        if let Some(plate) = &request.plate {
            let current = self
                .repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound("Veículo não encontrado".to_string()))?;

            if !plate.eq_ignore_ascii_case(&current.plate)
                && self.repository.plate_exists(ctx.company_id, plate).await?
            {
                return Err(AppError::Conflict(
                    "Já existe um veículo com esta placa".to_string(),
                ));
            }
        }

        let vehicle = self.repository.update(id, ctx.company_id, &request).await?;

        self.audit
            .record(ctx, "update", "vehicle", Some(vehicle.id), None)
            .await;

        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn delete(&self, ctx: &AuthContext, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, ctx.company_id).await?;

        self.audit.record(ctx, "delete", "vehicle", Some(id), None).await;

        Ok(())
    }
}
