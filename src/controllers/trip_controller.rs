use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::AuthContext;
use crate::models::trip::{
    CreateTripRequest, TripFilters, TripResponse, UpdateTripRequest, UpdateTripStatusRequest,
    TRIP_STATUSES,
};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::trailer_repository::TrailerRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::audit_service::AuditService;
use crate::utils::errors::AppError;

pub struct TripController {
    repository: TripRepository,
    drivers: DriverRepository,
    vehicles: VehicleRepository,
    trailers: TrailerRepository,
    audit: AuditService,
}

impl TripController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TripRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            trailers: TrailerRepository::new(pool.clone()),
            audit: AuditService::new(pool),
        }
    }

    pub async fn create(
        &self,
        ctx: &AuthContext,
        request: CreateTripRequest,
    ) -> Result<TripResponse, AppError> {
        request.validate()?;

        self.ensure_references(ctx, &request.driver_id, &request.vehicle_id, request.trailer_id.as_ref())
            .await?;

        let trip = self.repository.create(ctx.company_id, &request).await?;

        self.audit
            .record(
                ctx,
                "create",
                "trip",
                Some(trip.id),
                Some(json!({ "origin": trip.origin, "destination": trip.destination })),
            )
            .await;

        Ok(TripResponse::from(trip))
    }

    pub async fn get_by_id(&self, ctx: &AuthContext, id: Uuid) -> Result<TripResponse, AppError> {
        let trip = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Viagem não encontrada".to_string()))?;

        if trip.company_id != ctx.company_id {
            return Err(AppError::Forbidden(
                "Viagem não pertence a esta empresa".to_string(),
            ));
        }

        Ok(TripResponse::from(trip))
    }

    pub async fn list(
        &self,
        ctx: &AuthContext,
        filters: TripFilters,
    ) -> Result<Vec<TripResponse>, AppError> {
        let trips = self
            .repository
            .find_by_company(ctx.company_id, &filters)
            .await?;

        Ok(trips.into_iter().map(TripResponse::from).collect())
    }

    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: Uuid,
        request: UpdateTripRequest,
    ) -> Result<TripResponse, AppError> {
        request.validate()?;

        if let Some(driver_id) = &request.driver_id {
            self.ensure_driver(ctx, driver_id).await?;
        }
        if let Some(vehicle_id) = &request.vehicle_id {
            self.ensure_vehicle(ctx, vehicle_id).await?;
        }
        if let Some(trailer_id) = &request.trailer_id {
            self.ensure_trailer(ctx, trailer_id).await?;
        }

        let trip = self.repository.update(id, ctx.company_id, &request).await?;

        self.audit
            .record(ctx, "update", "trip", Some(trip.id), None)
            .await;

        Ok(TripResponse::from(trip))
    }

    pub async fn update_status(
        &self,
        ctx: &AuthContext,
        id: Uuid,
        request: UpdateTripStatusRequest,
    ) -> Result<TripResponse, AppError> {
        if !TRIP_STATUSES.contains(&request.trip_status.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Estado de viagem desconhecido: {}",
                request.trip_status
            )));
        }

        let trip = self
            .repository
            .update_status(id, ctx.company_id, &request.trip_status)
            .await?;

        self.audit
            .record(
                ctx,
                "update_status",
                "trip",
                Some(trip.id),
                Some(json!({ "trip_status": trip.trip_status })),
            )
            .await;

        Ok(TripResponse::from(trip))
    }

    pub async fn delete(&self, ctx: &AuthContext, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, ctx.company_id).await?;

        self.audit.record(ctx, "delete", "trip", Some(id), None).await;

        Ok(())
    }

    async fn ensure_references(
        &self,
        ctx: &AuthContext,
        driver_id: &Uuid,
        vehicle_id: &Uuid,
        trailer_id: Option<&Uuid>,
    ) -> Result<(), AppError> {
        self.ensure_driver(ctx, driver_id).await?;
        self.ensure_vehicle(ctx, vehicle_id).await?;
        if let Some(trailer_id) = trailer_id {
            self.ensure_trailer(ctx, trailer_id).await?;
        }
        Ok(())
    }

    async fn ensure_driver(&self, ctx: &AuthContext, id: &Uuid) -> Result<(), AppError> {
        let driver = self
            .drivers
            .find_by_id(*id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorista não encontrado".to_string()))?;
        if driver.company_id != ctx.company_id {
            return Err(AppError::Forbidden(
                "Motorista não pertence a esta empresa".to_string(),
            ));
        }
        Ok(())
    }

    async fn ensure_vehicle(&self, ctx: &AuthContext, id: &Uuid) -> Result<(), AppError> {
        let vehicle = self
            .vehicles
            .find_by_id(*id)
            .await?
            .ok_or_else(|| AppError::NotFound("Veículo não encontrado".to_string()))?;
        if vehicle.company_id != ctx.company_id {
            return Err(AppError::Forbidden(
                "Veículo não pertence a esta empresa".to_string(),
            ));
        }
        Ok(())
    }

    async fn ensure_trailer(&self, ctx: &AuthContext, id: &Uuid) -> Result<(), AppError> {
        let trailer = self
            .trailers
            .find_by_id(*id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reboque não encontrado".to_string()))?;
        if trailer.company_id != ctx.company_id {
            return Err(AppError::Forbidden(
                "Reboque não pertence a esta empresa".to_string(),
            ));
        }
        Ok(())
    }
}
