use async_trait::async_trait;
use sqlx::PgPool;

use super::{PgTx, RepoResult, RepoTransaction};
use crate::models::requirement::{NewRequirement, Requirement};

#[async_trait]
pub trait RequirementRepo<Tx: RepoTransaction>: Send + Sync {
    async fn create_requirement(
        &self,
        requirement: &NewRequirement,
        tx: &mut Tx,
    ) -> RepoResult<i32>;

    async fn list_requirements_by_vacancy_id(
        &self,
        vacancy_id: i32,
    ) -> RepoResult<Vec<Requirement>>;

    async fn delete_requirements_by_vacancy_id(
        &self,
        vacancy_id: i32,
        tx: &mut Tx,
    ) -> RepoResult<u64>;
}

#[derive(Clone)]
pub struct PgRequirementRepo {
    pool: PgPool,
}

impl PgRequirementRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequirementRepo<PgTx> for PgRequirementRepo {
    async fn create_requirement(
        &self,
        requirement: &NewRequirement,
        tx: &mut PgTx,
    ) -> RepoResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO requirements (requirement, vacancy_id)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&requirement.requirement)
        .bind(requirement.vacancy_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(id)
    }

    async fn list_requirements_by_vacancy_id(
        &self,
        vacancy_id: i32,
    ) -> RepoResult<Vec<Requirement>> {
        let rows = sqlx::query_as::<_, Requirement>(
            r#"
            SELECT id, requirement, vacancy_id
            FROM requirements
            WHERE vacancy_id = $1
            ORDER BY id
            "#,
        )
        .bind(vacancy_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn delete_requirements_by_vacancy_id(
        &self,
        vacancy_id: i32,
        tx: &mut PgTx,
    ) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM requirements WHERE vacancy_id = $1")
            .bind(vacancy_id)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }
}
