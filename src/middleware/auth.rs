use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::HeaderMap;
use uuid::Uuid;

use crate::models::admin::AdminRole;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};

/// Identidade do administrador autenticado, inserida como extensão
/// da requisição após a validação do token.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub admin_id: Uuid,
    pub company_id: Uuid,
    pub role: AdminRole,
}

/// Middleware de autenticação: valida o Bearer token e injeta o
/// `AuthContext` na requisição. Rotas protegidas assumem sua presença.
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Header Authorization ausente".to_string()))?;

    let token = extract_token_from_header(auth_header)?;

    let jwt_config = JwtConfig::from(&state.config);
    let claims = verify_token(token, &jwt_config)?;

    let admin_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Token com identificador inválido".to_string()))?;
    let company_id = Uuid::parse_str(&claims.company_id)
        .map_err(|_| AppError::Unauthorized("Token com empresa inválida".to_string()))?;
    let role = AdminRole::from_str(&claims.role)
        .ok_or_else(|| AppError::Unauthorized("Token com papel desconhecido".to_string()))?;

    request.extensions_mut().insert(AuthContext {
        admin_id,
        company_id,
        role,
    });

    Ok(next.run(request).await)
}

/// Verifica se o administrador autenticado possui o papel `owner`.
/// Operações destrutivas sobre administradores exigem esse papel.
pub fn ensure_owner(ctx: &AuthContext) -> AppResult<()> {
    if ctx.role != AdminRole::Owner {
        return Err(AppError::Forbidden(
            "Apenas administradores com papel 'owner' podem executar esta operação".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with_role(role: AdminRole) -> AuthContext {
        AuthContext {
            admin_id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn test_ensure_owner_accepts_owner() {
        let ctx = context_with_role(AdminRole::Owner);
        assert!(ensure_owner(&ctx).is_ok());
    }

    #[test]
    fn test_ensure_owner_rejects_admin() {
        let ctx = context_with_role(AdminRole::Admin);
        let err = ensure_owner(&ctx).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
