use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::{ensure_owner, AuthContext};
use crate::models::admin::{AdminResponse, AdminRole, CreateAdminRequest, UpdateAdminRequest};
use crate::repositories::admin_repository::AdminRepository;
use crate::services::audit_service::AuditService;
use crate::utils::errors::AppError;

pub struct AdminController {
    repository: AdminRepository,
    audit: AuditService,
}

impl AdminController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AdminRepository::new(pool.clone()),
            audit: AuditService::new(pool),
        }
    }

    pub async fn list(&self, ctx: &AuthContext) -> Result<Vec<AdminResponse>, AppError> {
        let admins = self.repository.find_by_company(ctx.company_id).await?;
        Ok(admins.into_iter().map(AdminResponse::from).collect())
    }

    pub async fn create(
        &self,
        ctx: &AuthContext,
        request: CreateAdminRequest,
    ) -> Result<AdminResponse, AppError> {
        ensure_owner(ctx)?;
        request.validate()?;

        let role = match &request.role {
            Some(raw) => AdminRole::from_str(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Papel desconhecido: {}", raw)))?,
            None => AdminRole::Admin,
        };

        if self.repository.email_exists(ctx.company_id, &request.email).await? {
            return Err(AppError::Conflict(
                "Já existe um administrador com este email".to_string(),
            ));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Erro gerando hash de senha: {}", e)))?;

        let admin = self
            .repository
            .create(
                ctx.company_id,
                &request.full_name,
                &request.email,
                &password_hash,
                role.as_str(),
            )
            .await?;

        self.audit
            .record(
                ctx,
                "create",
                "admin",
                Some(admin.id),
                Some(json!({ "email": admin.email, "role": admin.role })),
            )
            .await;

        Ok(AdminResponse::from(admin))
    }

    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: Uuid,
        request: UpdateAdminRequest,
    ) -> Result<AdminResponse, AppError> {
        ensure_owner(ctx)?;
        request.validate()?;

        if let Some(raw) = &request.role {
            if AdminRole::from_str(raw).is_none() {
                return Err(AppError::BadRequest(format!("Papel desconhecido: {}", raw)));
            }
        }

        let password_hash = match &request.password {
            Some(password) => Some(
                bcrypt::hash(password, bcrypt::DEFAULT_COST)
                    .map_err(|e| AppError::Hash(format!("Erro gerando hash de senha: {}", e)))?,
            ),
            None => None,
        };

        let admin = self
            .repository
            .update(
                id,
                ctx.company_id,
                request.full_name.clone(),
                request.role.clone(),
                password_hash,
            )
            .await?;

        self.audit
            .record(ctx, "update", "admin", Some(admin.id), None)
            .await;

        Ok(AdminResponse::from(admin))
    }

    /// Remoção exige papel owner e é checada antes de qualquer escrita.
    pub async fn delete(&self, ctx: &AuthContext, id: Uuid) -> Result<(), AppError> {
        ensure_owner(ctx)?;

        if id == ctx.admin_id {
            return Err(AppError::BadRequest(
                "Um administrador não pode remover a própria conta".to_string(),
            ));
        }

        self.repository.delete(id, ctx.company_id).await?;

        self.audit.record(ctx, "delete", "admin", Some(id), None).await;

        Ok(())
    }
}
