use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::AuthContext;
use crate::models::trailer::{CreateTrailerRequest, TrailerResponse, UpdateTrailerRequest};
use crate::repositories::trailer_repository::TrailerRepository;
use crate::services::audit_service::AuditService;
use crate::utils::errors::AppError;

pub struct TrailerController {
    repository: TrailerRepository,
    audit: AuditService,
}

impl TrailerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TrailerRepository::new(pool.clone()),
            audit: AuditService::new(pool),
        }
    }

    pub async fn create(
        &self,
        ctx: &AuthContext,
        request: CreateTrailerRequest,
    ) -> Result<TrailerResponse, AppError> {
        request.validate()?;

        if self.repository.plate_exists(ctx.company_id, &request.plate).await? {
            return Err(AppError::Conflict(
                "Já existe um reboque com esta placa".to_string(),
            ));
        }

        let trailer = self.repository.create(ctx.company_id, &request).await?;

        self.audit
            .record(
                ctx,
                "create",
                "trailer",
                Some(trailer.id),
                Some(json!({ "plate": trailer.plate })),
            )
            .await;

        Ok(TrailerResponse::from(trailer))
    }

    pub async fn get_by_id(
        &self,
        ctx: &AuthContext,
        id: Uuid,
    ) -> Result<TrailerResponse, AppError> {
        let trailer = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reboque não encontrado".to_string()))?;

        if trailer.company_id != ctx.company_id {
            return Err(AppError::Forbidden(
                "Reboque não pertence a esta empresa".to_string(),
            ));
        }

        Ok(TrailerResponse::from(trailer))
    }

    pub async fn list(&self, ctx: &AuthContext) -> Result<Vec<TrailerResponse>, AppError> {
        let trailers = self.repository.find_by_company(ctx.company_id).await?;
        Ok(trailers.into_iter().map(TrailerResponse::from).collect())
    }

    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: Uuid,
        request: UpdateTrailerRequest,
    ) -> Result<TrailerResponse, AppError> {
        request.validate()?;

        let trailer = self.repository.update(id, ctx.company_id, &request).await?;

        self.audit
            .record(ctx, "update", "trailer", Some(trailer.id), None)
            .await;

        Ok(TrailerResponse::from(trailer))
    }

    pub async fn delete(&self, ctx: &AuthContext, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, ctx.company_id).await?;

        self.audit.record(ctx, "delete", "trailer", Some(id), None).await;

        Ok(())
    }
}
