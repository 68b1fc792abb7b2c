//! Controller de Locations
//!
//! Recebe os pings de posição do app do motorista e serve o mapa ao
//! vivo do painel. A flag `online` é derivada na leitura, comparando o
//! instante do último ping com a janela recente.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::AuthContext;
use crate::models::location::{CreateLocationRequest, DriverLocation, LatestLocationResponse};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::location_repository::LocationRepository;
use crate::utils::errors::AppError;

pub struct LocationController {
    repository: LocationRepository,
    drivers: DriverRepository,
}

impl LocationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: LocationRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool),
        }
    }

    pub async fn ping(
        &self,
        ctx: &AuthContext,
        request: CreateLocationRequest,
    ) -> Result<DriverLocation, AppError> {
        request.validate()?;

        let driver = self
            .drivers
            .find_by_id(request.driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorista não encontrado".to_string()))?;

        if driver.company_id != ctx.company_id {
            return Err(AppError::Forbidden(
                "Motorista pertence a outra empresa".to_string(),
            ));
        }

        self.repository.insert_ping(ctx.company_id, &request).await
    }

    /// Última posição de cada motorista da empresa, para o mapa.
    pub async fn latest(&self, ctx: &AuthContext) -> Result<Vec<LatestLocationResponse>, AppError> {
        let now = Utc::now();
        let rows = self.repository.find_latest_per_driver(ctx.company_id).await?;

        Ok(rows
            .into_iter()
            .map(|row| LatestLocationResponse::from_row(row, now))
            .collect())
    }

    /// Só os motoristas com ping dentro da janela recente.
    pub async fn online(&self, ctx: &AuthContext) -> Result<Vec<LatestLocationResponse>, AppError> {
        let all = self.latest(ctx).await?;
        Ok(all.into_iter().filter(|location| location.online).collect())
    }

    pub async fn latest_for_driver(
        &self,
        ctx: &AuthContext,
        driver_id: Uuid,
    ) -> Result<LatestLocationResponse, AppError> {
        let now = Utc::now();
        let row = self
            .repository
            .find_latest_for_driver(ctx.company_id, driver_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Sem posição registrada para este motorista".to_string())
            })?;

        Ok(LatestLocationResponse::from_row(row, now))
    }
}
