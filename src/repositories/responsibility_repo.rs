use async_trait::async_trait;
use sqlx::PgPool;

use super::{PgTx, RepoResult, RepoTransaction};
use crate::models::responsibility::{NewResponsibility, Responsibility};

#[async_trait]
pub trait ResponsibilityRepo<Tx: RepoTransaction>: Send + Sync {
    async fn create_responsibility(
        &self,
        responsibility: &NewResponsibility,
        tx: &mut Tx,
    ) -> RepoResult<i32>;

    async fn list_responsibilities_by_vacancy_id(
        &self,
        vacancy_id: i32,
    ) -> RepoResult<Vec<Responsibility>>;

    async fn delete_responsibilities_by_vacancy_id(
        &self,
        vacancy_id: i32,
        tx: &mut Tx,
    ) -> RepoResult<u64>;
}

#[derive(Clone)]
pub struct PgResponsibilityRepo {
    pool: PgPool,
}

impl PgResponsibilityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResponsibilityRepo<PgTx> for PgResponsibilityRepo {
    async fn create_responsibility(
        &self,
        responsibility: &NewResponsibility,
        tx: &mut PgTx,
    ) -> RepoResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO responsibilities (responsibility, vacancy_id)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&responsibility.responsibility)
        .bind(responsibility.vacancy_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(id)
    }

    async fn list_responsibilities_by_vacancy_id(
        &self,
        vacancy_id: i32,
    ) -> RepoResult<Vec<Responsibility>> {
        let rows = sqlx::query_as::<_, Responsibility>(
            r#"
            SELECT id, responsibility, vacancy_id
            FROM responsibilities
            WHERE vacancy_id = $1
            ORDER BY id
            "#,
        )
        .bind(vacancy_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn delete_responsibilities_by_vacancy_id(
        &self,
        vacancy_id: i32,
        tx: &mut PgTx,
    ) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM responsibilities WHERE vacancy_id = $1")
            .bind(vacancy_id)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }
}
