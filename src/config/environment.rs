//! Configuração de variáveis de ambiente
//!
//! Este módulo carrega a configuração do ambiente no startup. Variáveis
//! essenciais derrubam o processo cedo se ausentes; chaves de integrações
//! opcionais (mapas, push) viram erros de configuração visíveis só quando
//! a funcionalidade correspondente é usada.

use std::env;

/// Configuração do ambiente
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    /// Chave mestra (base64, 32 bytes) que cifra as chaves de API na tabela de settings
    pub settings_encryption_key: String,
    pub maps_api_key: Option<String>,
    pub push_public_key: Option<String>,
    pub push_private_key: Option<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            port: env::var("PORT")
                .expect("PORT must be set")
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").expect("HOST must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .expect("JWT_EXPIRATION must be set")
                .parse()
                .expect("JWT_EXPIRATION must be a valid number"),
            settings_encryption_key: env::var("SETTINGS_ENCRYPTION_KEY")
                .expect("SETTINGS_ENCRYPTION_KEY must be set"),
            maps_api_key: env::var("MAPS_API_KEY").ok(),
            push_public_key: env::var("PUSH_PUBLIC_KEY").ok(),
            push_private_key: env::var("PUSH_PRIVATE_KEY").ok(),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar se estamos em modo desenvolvimento
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar se estamos em modo produção
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obter a URL do servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
