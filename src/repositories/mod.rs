//! Per-table data access.
//!
//! Every repository is an `async` trait generic over the transaction type it
//! writes through, with a PostgreSQL implementation next to it. Reads go
//! straight to the pool; writes take `&mut Tx` so the caller decides the
//! atomicity boundary.

pub mod requirement_repo;
pub mod responsibility_repo;
pub mod skill_repo;
pub mod vacancy_disability_repo;
pub mod vacancy_repo;

use async_trait::async_trait;
use sqlx::Postgres;

use crate::error::Entity;

pub use requirement_repo::{PgRequirementRepo, RequirementRepo};
pub use responsibility_repo::{PgResponsibilityRepo, ResponsibilityRepo};
pub use skill_repo::{PgSkillRepo, SkillRepo};
pub use vacancy_disability_repo::{PgVacancyDisabilityRepo, VacancyDisabilityRepo};
pub use vacancy_repo::{PgVacancyRepo, VacancyRepo};

pub type PgTx = sqlx::Transaction<'static, Postgres>;

pub type RepoResult<T> = std::result::Result<T, RepoError>;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i32 },

    #[error("invalid {entity} data: {detail}")]
    InvalidData { entity: Entity, detail: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepoError {
    pub fn code(&self) -> &'static str {
        match self {
            RepoError::NotFound { .. } => "not_found",
            RepoError::InvalidData { .. } => "invalid_data",
            RepoError::Database(_) => "database",
        }
    }
}

/// A unit of work opened by [`VacancyRepo::begin_transaction`].
#[async_trait]
pub trait RepoTransaction: Send + Sized + 'static {
    async fn commit(self) -> RepoResult<()>;
    async fn rollback(self) -> RepoResult<()>;
}

#[async_trait]
impl RepoTransaction for PgTx {
    async fn commit(self) -> RepoResult<()> {
        sqlx::Transaction::commit(self).await?;
        Ok(())
    }

    async fn rollback(self) -> RepoResult<()> {
        sqlx::Transaction::rollback(self).await?;
        Ok(())
    }
}
