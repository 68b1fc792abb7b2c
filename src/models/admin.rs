//! Modelo de Admin
//!
//! Administradores do painel. O papel `owner` é o único autorizado a
//! gerenciar outros administradores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Papéis de administrador
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminRole {
    Owner,
    Admin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Owner => "owner",
            AdminRole::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "owner" => Some(AdminRole::Owner),
            "admin" => Some(AdminRole::Admin),
            _ => None,
        }
    }
}

/// Admin principal - mapeia a tabela admins
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub company_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Request de login do painel
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Request para criar um novo administrador
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdminRequest {
    #[validate(length(min = 2, max = 120))]
    pub full_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 72))]
    pub password: String,

    /// "owner" ou "admin"; default "admin"
    pub role: Option<String>,
}

/// Request para atualizar um administrador
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAdminRequest {
    #[validate(length(min = 2, max = 120))]
    pub full_name: Option<String>,

    pub role: Option<String>,

    #[validate(length(min = 8, max = 72))]
    pub password: Option<String>,
}

/// Response de administrador (nunca expõe o hash)
#[derive(Debug, Serialize)]
pub struct AdminResponse {
    pub id: String,
    pub company_id: String,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id.to_string(),
            company_id: admin.company_id.to_string(),
            full_name: admin.full_name,
            email: admin.email,
            role: admin.role,
            created_at: admin.created_at.to_rfc3339(),
        }
    }
}

/// Payload devolvido pelo login
#[derive(Debug, Serialize)]
pub struct LoginPayload {
    pub token: String,
    pub admin: AdminResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        assert_eq!(AdminRole::from_str("owner"), Some(AdminRole::Owner));
        assert_eq!(AdminRole::from_str("admin"), Some(AdminRole::Admin));
        assert_eq!(AdminRole::from_str("super"), None);
        assert_eq!(AdminRole::Owner.as_str(), "owner");
    }

    #[test]
    fn test_response_hides_password_hash() {
        let admin = Admin {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            full_name: "Ana Souza".to_string(),
            email: "ana@frota.com.br".to_string(),
            password_hash: "$2b$12$abc".to_string(),
            role: "owner".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(AdminResponse::from(admin)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "ana@frota.com.br");
    }
}
