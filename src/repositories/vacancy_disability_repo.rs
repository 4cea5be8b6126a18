use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::{PgTx, RepoError, RepoResult, RepoTransaction};
use crate::error::Entity;
use crate::models::disability::{Disability, NewVacancyDisability, VacancyDisability};

#[async_trait]
pub trait VacancyDisabilityRepo<Tx: RepoTransaction>: Send + Sync {
    /// Links a disability to a vacancy. Linking the same pair twice is a no-op;
    /// an unknown disability id is `NotFound`.
    async fn upsert_vacancy_disability(
        &self,
        link: NewVacancyDisability,
        tx: &mut Tx,
    ) -> RepoResult<()>;

    /// Join rows for a vacancy in insertion order, each with its disability resolved.
    async fn get_vacancy_disabilities(
        &self,
        vacancy_id: i32,
    ) -> RepoResult<Vec<VacancyDisability>>;

    async fn delete_vacancy_disabilities(&self, vacancy_id: i32, tx: &mut Tx) -> RepoResult<u64>;
}

const DISABILITY_FOREIGN_KEY: &str = "vacancy_disabilities_disability_id_fkey";

fn is_unknown_disability(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| {
            db_err.code().as_deref() == Some("23503")
                && db_err.constraint() == Some(DISABILITY_FOREIGN_KEY)
        })
        .unwrap_or(false)
}

#[derive(Debug, FromRow)]
struct VacancyDisabilityRow {
    id: i32,
    vacancy_id: i32,
    disability_id: i32,
    disability_name: String,
    disability_category: String,
}

impl From<VacancyDisabilityRow> for VacancyDisability {
    fn from(row: VacancyDisabilityRow) -> Self {
        Self {
            id: row.id,
            vacancy_id: row.vacancy_id,
            disability_id: row.disability_id,
            disability: Disability {
                id: row.disability_id,
                name: row.disability_name,
                category: row.disability_category,
            },
        }
    }
}

#[derive(Clone)]
pub struct PgVacancyDisabilityRepo {
    pool: PgPool,
}

impl PgVacancyDisabilityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VacancyDisabilityRepo<PgTx> for PgVacancyDisabilityRepo {
    async fn upsert_vacancy_disability(
        &self,
        link: NewVacancyDisability,
        tx: &mut PgTx,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vacancy_disabilities (vacancy_id, disability_id)
            VALUES ($1, $2)
            ON CONFLICT (vacancy_id, disability_id) DO NOTHING
            "#,
        )
        .bind(link.vacancy_id)
        .bind(link.disability_id)
        .execute(&mut **tx)
        .await
        .map_err(|err| {
            if is_unknown_disability(&err) {
                RepoError::NotFound {
                    entity: Entity::Disability,
                    id: link.disability_id,
                }
            } else {
                err.into()
            }
        })?;

        Ok(())
    }

    async fn get_vacancy_disabilities(
        &self,
        vacancy_id: i32,
    ) -> RepoResult<Vec<VacancyDisability>> {
        let rows = sqlx::query_as::<_, VacancyDisabilityRow>(
            r#"
            SELECT
                vd.id,
                vd.vacancy_id,
                vd.disability_id,
                d.name AS disability_name,
                d.category AS disability_category
            FROM vacancy_disabilities vd
            JOIN disabilities d ON d.id = vd.disability_id
            WHERE vd.vacancy_id = $1
            ORDER BY vd.id
            "#,
        )
        .bind(vacancy_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_vacancy_disabilities(
        &self,
        vacancy_id: i32,
        tx: &mut PgTx,
    ) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM vacancy_disabilities WHERE vacancy_id = $1")
            .bind(vacancy_id)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }
}
