mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::Router;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use database::create_pool;
use middleware::cors_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Carregar variáveis de ambiente
    dotenv().ok();

    let config = EnvironmentConfig::default();

    // Configurar logging
    let log_level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("🚛 Fleet Backoffice - Gestão de Frota");
    info!("=====================================");

    // Inicializar base de dados
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Erro conectando à base de dados: {}", e);
            return Err(anyhow::anyhow!("Erro de base de dados: {}", e));
        }
    };
    info!("✅ PostgreSQL conectado");

    // Montar o router da API
    let app_state = AppState::new(pool, config.clone());

    let app = Router::new()
        .merge(routes::create_api_router(app_state.clone()))
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando em http://{}", addr);
    info!("🔍 Endpoints disponíveis:");
    info!("   GET  /health - Liveness do serviço");
    info!("🔐 Auth:");
    info!("   POST /api/auth/login - Login do administrador");
    info!("   GET  /api/auth/me - Perfil autenticado");
    info!("👥 Admins:");
    info!("   GET/POST /api/admins - Listar e criar");
    info!("   PUT/DELETE /api/admins/:id - Atualizar e remover (owner)");
    info!("🚚 Frota:");
    info!("   /api/vehicles, /api/drivers, /api/trailers - CRUD");
    info!("   /api/trips - CRUD + PATCH /api/trips/:id/status");
    info!("   /api/maintenance - Registros de manutenção");
    info!("   /api/fuelings - Abastecimentos (listagem pela view)");
    info!("📍 Mapa ao vivo:");
    info!("   POST /api/locations - Ping de posição");
    info!("   GET  /api/locations/latest - Última posição por motorista");
    info!("   GET  /api/locations/online - Motoristas online");
    info!("💬 Chat:");
    info!("   POST /api/chat/threads - Abrir conversa");
    info!("   GET  /api/chat/threads - Conversas do admin");
    info!("   GET  /api/chat/threads/:id/messages - Mensagens");
    info!("   POST /api/chat/messages - Enviar mensagem");
    info!("📋 Auditoria e configurações:");
    info!("   GET  /api/audit - Trilha de auditoria");
    info!("   GET/PUT /api/settings - Configurações da empresa");
    info!("   GET  /api/settings/client-config - Chaves para os apps");
    info!("🤖 Copiloto:");
    info!("   POST /api/copilot/ask - Pergunta com resumo da frota");
    info!("   POST /api/copilot/operations - Pergunta com ferramentas");
    info!("   GET  /api/copilot/history - Histórico da conversa");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Sinal de desligamento graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C recebido, desligando servidor...");
        },
        _ = terminate => {
            info!("🛑 Sinal de término recebido, desligando servidor...");
        },
    }
}
