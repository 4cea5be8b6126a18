pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;
pub mod telemetry;
pub mod utils;

use std::sync::Arc;

use crate::config::{get_config, init_config};
use crate::database::pool::create_pool;
use crate::repositories::{
    PgRequirementRepo, PgResponsibilityRepo, PgSkillRepo, PgTx, PgVacancyDisabilityRepo,
    PgVacancyRepo,
};
use crate::services::vacancy_service::VacancyService;
use sqlx::PgPool;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub vacancy_service: VacancyService<PgTx>,
}

impl AppState {
    /// Wires the PostgreSQL repositories into the services.
    pub fn new(pool: PgPool) -> Self {
        let vacancy_service = VacancyService::new(
            Arc::new(PgVacancyRepo::new(pool.clone())),
            Arc::new(PgSkillRepo::new(pool.clone())),
            Arc::new(PgRequirementRepo::new(pool.clone())),
            Arc::new(PgResponsibilityRepo::new(pool.clone())),
            Arc::new(PgVacancyDisabilityRepo::new(pool.clone())),
        );

        Self {
            pool,
            vacancy_service,
        }
    }

    /// Process entry point: loads the environment config, installs the tracing
    /// subscriber, connects the pool and applies the bundled migrations.
    /// Call once per process.
    pub async fn bootstrap() -> error::Result<Self> {
        init_config()?;
        let config = get_config()?;
        telemetry::init(config)?;

        let pool = create_pool(config).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("migrations applied");

        Ok(Self::new(pool))
    }
}
