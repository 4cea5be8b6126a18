use async_trait::async_trait;
use sqlx::PgPool;

use super::{PgTx, RepoResult, RepoTransaction};
use crate::models::skill::{NewSkill, Skill};

#[async_trait]
pub trait SkillRepo<Tx: RepoTransaction>: Send + Sync {
    async fn create_skill(&self, skill: &NewSkill, tx: &mut Tx) -> RepoResult<i32>;

    async fn list_skills_by_vacancy_id(&self, vacancy_id: i32) -> RepoResult<Vec<Skill>>;

    async fn delete_skills_by_vacancy_id(
        &self,
        vacancy_id: i32,
        tx: &mut Tx,
    ) -> RepoResult<u64>;
}

#[derive(Clone)]
pub struct PgSkillRepo {
    pool: PgPool,
}

impl PgSkillRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SkillRepo<PgTx> for PgSkillRepo {
    async fn create_skill(&self, skill: &NewSkill, tx: &mut PgTx) -> RepoResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO skills (skill, vacancy_id)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&skill.skill)
        .bind(skill.vacancy_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(id)
    }

    async fn list_skills_by_vacancy_id(&self, vacancy_id: i32) -> RepoResult<Vec<Skill>> {
        let rows = sqlx::query_as::<_, Skill>(
            r#"
            SELECT id, skill, vacancy_id
            FROM skills
            WHERE vacancy_id = $1
            ORDER BY id
            "#,
        )
        .bind(vacancy_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn delete_skills_by_vacancy_id(
        &self,
        vacancy_id: i32,
        tx: &mut PgTx,
    ) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM skills WHERE vacancy_id = $1")
            .bind(vacancy_id)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }
}
