use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::{PgTx, RepoError, RepoResult, RepoTransaction};
use crate::error::Entity;
use crate::models::vacancy::{Vacancy, VacancyDraft, VacancyFilter};

#[async_trait]
pub trait VacancyRepo<Tx: RepoTransaction>: Send + Sync {
    async fn begin_transaction(&self) -> RepoResult<Tx>;

    /// Inserts a new row when `id` is `None`. Otherwise overwrites the row with
    /// that id, holding its lock for the rest of `tx`; a missing row is `NotFound`.
    async fn upsert_vacancy(
        &self,
        id: Option<i32>,
        vacancy: &VacancyDraft,
        tx: &mut Tx,
    ) -> RepoResult<i32>;

    async fn list_vacancies(&self, filter: &VacancyFilter) -> RepoResult<Vec<Vacancy>>;

    async fn get_vacancy_by_id(&self, id: i32) -> RepoResult<Vacancy>;

    async fn delete_vacancy(&self, id: i32, tx: &mut Tx) -> RepoResult<()>;
}

#[derive(Debug, FromRow)]
struct VacancyRow {
    id: i32,
    company_id: i32,
    title: String,
    description: String,
    area: String,
    contract_type: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<VacancyRow> for Vacancy {
    type Error = RepoError;

    fn try_from(row: VacancyRow) -> RepoResult<Self> {
        let contract_type = row
            .contract_type
            .parse()
            .map_err(|detail| RepoError::InvalidData {
                entity: Entity::Vacancy,
                detail,
            })?;

        Ok(Vacancy {
            id: row.id,
            company_id: row.company_id,
            title: row.title,
            description: row.description,
            area: row.area,
            contract_type,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// `ILIKE` pattern matching `text` literally anywhere in the column.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

const VACANCY_COLUMNS: &str = "v.id, v.company_id, v.title, v.description, v.area, \
     v.contract_type, v.created_at, v.updated_at";

#[derive(Clone)]
pub struct PgVacancyRepo {
    pool: PgPool,
}

impl PgVacancyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VacancyRepo<PgTx> for PgVacancyRepo {
    async fn begin_transaction(&self) -> RepoResult<PgTx> {
        Ok(self.pool.begin().await?)
    }

    async fn upsert_vacancy(
        &self,
        id: Option<i32>,
        vacancy: &VacancyDraft,
        tx: &mut PgTx,
    ) -> RepoResult<i32> {
        let statement = match id {
            Some(id) => sqlx::query_scalar::<_, i32>(
                r#"
                UPDATE vacancies SET
                    company_id = $2,
                    title = $3,
                    description = $4,
                    area = $5,
                    contract_type = $6,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING id
                "#,
            )
            .bind(id),
            None => sqlx::query_scalar::<_, i32>(
                r#"
                INSERT INTO vacancies (company_id, title, description, area, contract_type)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id
                "#,
            ),
        };

        statement
            .bind(vacancy.company_id)
            .bind(&vacancy.title)
            .bind(&vacancy.description)
            .bind(&vacancy.area)
            .bind(vacancy.contract_type.as_str())
            .fetch_optional(&mut **tx)
            .await?
            .ok_or(RepoError::NotFound {
                entity: Entity::Vacancy,
                id: id.unwrap_or_default(),
            })
    }

    async fn list_vacancies(&self, filter: &VacancyFilter) -> RepoResult<Vec<Vacancy>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM vacancies v WHERE 1 = 1",
            VACANCY_COLUMNS
        ));

        if let Some(company_id) = filter.company_id {
            query.push(" AND v.company_id = ").push_bind(company_id);
        }
        if let Some(area) = &filter.area {
            query
                .push(" AND LOWER(v.area) = LOWER(")
                .push_bind(area.clone())
                .push(")");
        }
        if let Some(contract_type) = filter.contract_type {
            query
                .push(" AND v.contract_type = ")
                .push_bind(contract_type.as_str());
        }
        if let Some(search) = &filter.search_text {
            let pattern = contains_pattern(search);
            query
                .push(" AND (v.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR v.description ILIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }
        if let Some(category) = &filter.disability_category {
            query
                .push(
                    " AND EXISTS (SELECT 1 FROM vacancy_disabilities vd \
                     JOIN disabilities d ON d.id = vd.disability_id \
                     WHERE vd.vacancy_id = v.id AND d.category = ",
                )
                .push_bind(category.clone())
                .push(")");
        }

        query
            .push(" ORDER BY v.id ASC LIMIT ")
            .push_bind(filter.per_page)
            .push(" OFFSET ")
            .push_bind(filter.offset());

        let rows = query
            .build_query_as::<VacancyRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Vacancy::try_from).collect()
    }

    async fn get_vacancy_by_id(&self, id: i32) -> RepoResult<Vacancy> {
        let row = sqlx::query_as::<_, VacancyRow>(&format!(
            "SELECT {} FROM vacancies v WHERE v.id = $1",
            VACANCY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepoError::NotFound {
            entity: Entity::Vacancy,
            id,
        })?;

        Vacancy::try_from(row)
    }

    async fn delete_vacancy(&self, id: i32, tx: &mut PgTx) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM vacancies WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Vacancy,
                id,
            });
        }
        Ok(())
    }
}
