use sqlx::PgPool;
use validator::Validate;

use crate::middleware::AuthContext;
use crate::models::admin::{AdminResponse, LoginPayload, LoginRequest};
use crate::repositories::admin_repository::AdminRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    repository: AdminRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            repository: AdminRepository::new(pool),
            jwt_config,
        }
    }

    /// Login do painel: email + senha, devolve token e perfil.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginPayload, AppError> {
        request.validate()?;

        // Credencial inválida nunca diz qual das duas partes falhou
        let admin = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Email ou senha inválidos".to_string()))?;

        let valid = bcrypt::verify(&request.password, &admin.password_hash)
            .map_err(|e| AppError::Hash(format!("Erro verificando senha: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Email ou senha inválidos".to_string()));
        }

        let token = generate_token(admin.id, admin.company_id, &admin.role, &self.jwt_config)?;

        log::info!("🔐 Login de {} (empresa {})", admin.email, admin.company_id);

        Ok(LoginPayload {
            token,
            admin: AdminResponse::from(admin),
        })
    }

    /// Perfil do administrador autenticado.
    pub async fn me(&self, ctx: &AuthContext) -> Result<AdminResponse, AppError> {
        let admin = self
            .repository
            .find_by_id(ctx.admin_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Administrador não encontrado".to_string()))?;

        Ok(AdminResponse::from(admin))
    }
}
