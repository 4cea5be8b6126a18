use std::sync::Arc;

use tracing::{error, info, warn};

use crate::dto::vacancy_dto::{
    VacancyListQuery, VacancyRequest, VacancyResponse, VacancySimpleResponse,
};
use crate::error::{Error, Result, VacancyOperation};
use crate::models::disability::{NewVacancyDisability, VacancyDisability};
use crate::models::vacancy::VacancyFilter;
use crate::repositories::{
    RepoError, RepoResult, RepoTransaction, RequirementRepo, ResponsibilityRepo, SkillRepo,
    VacancyDisabilityRepo, VacancyRepo,
};
use crate::utils::collections::dedup_preserving_order;

pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;

/// Reads and writes whole vacancy aggregates: the vacancy row, its skills,
/// requirements and responsibilities, and its disability links.
///
/// Writes run inside one transaction opened through the vacancy repository and
/// are rolled back entirely on the first failing statement. Reads are issued
/// independently against the pool.
pub struct VacancyService<Tx: RepoTransaction> {
    vacancy_repo: Arc<dyn VacancyRepo<Tx>>,
    skills_repo: Arc<dyn SkillRepo<Tx>>,
    requirements_repo: Arc<dyn RequirementRepo<Tx>>,
    responsibilities_repo: Arc<dyn ResponsibilityRepo<Tx>>,
    vacancy_disabilities_repo: Arc<dyn VacancyDisabilityRepo<Tx>>,
}

impl<Tx: RepoTransaction> Clone for VacancyService<Tx> {
    fn clone(&self) -> Self {
        Self {
            vacancy_repo: Arc::clone(&self.vacancy_repo),
            skills_repo: Arc::clone(&self.skills_repo),
            requirements_repo: Arc::clone(&self.requirements_repo),
            responsibilities_repo: Arc::clone(&self.responsibilities_repo),
            vacancy_disabilities_repo: Arc::clone(&self.vacancy_disabilities_repo),
        }
    }
}

impl<Tx: RepoTransaction> VacancyService<Tx> {
    pub fn new(
        vacancy_repo: Arc<dyn VacancyRepo<Tx>>,
        skills_repo: Arc<dyn SkillRepo<Tx>>,
        requirements_repo: Arc<dyn RequirementRepo<Tx>>,
        responsibilities_repo: Arc<dyn ResponsibilityRepo<Tx>>,
        vacancy_disabilities_repo: Arc<dyn VacancyDisabilityRepo<Tx>>,
    ) -> Self {
        Self {
            vacancy_repo,
            skills_repo,
            requirements_repo,
            responsibilities_repo,
            vacancy_disabilities_repo,
        }
    }

    /// Persists the vacancy and all of its children, returning the new id.
    pub async fn create_vacancy(&self, vacancy: VacancyRequest) -> Result<i32> {
        let op = VacancyOperation::Create;
        let mut tx = self
            .vacancy_repo
            .begin_transaction()
            .await
            .map_err(|err| fail(op, None, err))?;

        let outcome = self.write_aggregate(None, &vacancy, &mut tx).await;
        let id = finish(tx, outcome)
            .await
            .map_err(|err| fail(op, None, err))?;

        info!(
            vacancy_id = id,
            company_id = vacancy.company_id,
            skills = vacancy.skills.len(),
            requirements = vacancy.requirements.len(),
            responsibilities = vacancy.responsibilities.len(),
            disabilities = vacancy.disabilities.len(),
            "vacancy created"
        );
        Ok(id)
    }

    pub async fn list_vacancies(
        &self,
        query: VacancyListQuery,
    ) -> Result<Vec<VacancySimpleResponse>> {
        let filter = build_filter(query);

        let vacancies = self
            .vacancy_repo
            .list_vacancies(&filter)
            .await
            .map_err(|err| fail(VacancyOperation::List, None, err))?;

        let mut items = Vec::with_capacity(vacancies.len());
        for vacancy in vacancies {
            let links = self
                .vacancy_disabilities_repo
                .get_vacancy_disabilities(vacancy.id)
                .await
                .map_err(|err| fail(VacancyOperation::ListDisabilities, Some(vacancy.id), err))?;

            let categories = disability_categories(&links);
            if let Some(category) = &filter.disability_category {
                if !categories.contains(category) {
                    continue;
                }
            }

            items.push(VacancySimpleResponse::new(vacancy, categories));
        }

        Ok(items)
    }

    pub async fn get_vacancy_by_id(&self, id: i32) -> Result<VacancyResponse> {
        let vacancy = self
            .vacancy_repo
            .get_vacancy_by_id(id)
            .await
            .map_err(|err| fail(VacancyOperation::Get, Some(id), err))?;

        let skills = self
            .skills_repo
            .list_skills_by_vacancy_id(id)
            .await
            .map_err(|err| fail(VacancyOperation::GetSkills, Some(id), err))?;

        let requirements = self
            .requirements_repo
            .list_requirements_by_vacancy_id(id)
            .await
            .map_err(|err| fail(VacancyOperation::GetRequirements, Some(id), err))?;

        let responsibilities = self
            .responsibilities_repo
            .list_responsibilities_by_vacancy_id(id)
            .await
            .map_err(|err| fail(VacancyOperation::GetResponsibilities, Some(id), err))?;

        let links = self
            .vacancy_disabilities_repo
            .get_vacancy_disabilities(id)
            .await
            .map_err(|err| fail(VacancyOperation::GetDisabilities, Some(id), err))?;

        Ok(VacancyResponse::assemble(
            vacancy,
            disability_categories(&links),
            skills,
            responsibilities,
            requirements,
        ))
    }

    /// Replaces the vacancy columns and all four child collections with the request's.
    /// The vacancy row is written first, so a vacancy missing at that point fails
    /// the whole transaction.
    pub async fn update_vacancy(&self, vacancy: VacancyRequest, id: i32) -> Result<()> {
        let op = VacancyOperation::Update;
        let mut tx = self
            .vacancy_repo
            .begin_transaction()
            .await
            .map_err(|err| fail(op, Some(id), err))?;

        let outcome = self.write_aggregate(Some(id), &vacancy, &mut tx).await;
        finish(tx, outcome)
            .await
            .map_err(|err| fail(op, Some(id), err))?;

        info!(vacancy_id = id, "vacancy updated");
        Ok(())
    }

    /// Deletes the vacancy together with its children and disability links.
    pub async fn delete_vacancy(&self, id: i32) -> Result<()> {
        let op = VacancyOperation::Delete;
        let mut tx = self
            .vacancy_repo
            .begin_transaction()
            .await
            .map_err(|err| fail(op, Some(id), err))?;

        let outcome = self.remove_aggregate(id, &mut tx).await;
        finish(tx, outcome)
            .await
            .map_err(|err| fail(op, Some(id), err))?;

        info!(vacancy_id = id, "vacancy deleted");
        Ok(())
    }

    async fn write_aggregate(
        &self,
        id: Option<i32>,
        vacancy: &VacancyRequest,
        tx: &mut Tx,
    ) -> RepoResult<i32> {
        let vacancy_id = self
            .vacancy_repo
            .upsert_vacancy(id, &vacancy.to_model(), tx)
            .await?;
        if id.is_some() {
            self.clear_children(vacancy_id, tx).await?;
        }

        for skill in &vacancy.skills {
            self.skills_repo
                .create_skill(&skill.to_model(vacancy_id), tx)
                .await?;
        }

        for requirement in &vacancy.requirements {
            self.requirements_repo
                .create_requirement(&requirement.to_model(vacancy_id), tx)
                .await?;
        }

        for responsibility in &vacancy.responsibilities {
            self.responsibilities_repo
                .create_responsibility(&responsibility.to_model(vacancy_id), tx)
                .await?;
        }

        for &disability_id in &vacancy.disabilities {
            self.vacancy_disabilities_repo
                .upsert_vacancy_disability(
                    NewVacancyDisability {
                        vacancy_id,
                        disability_id,
                    },
                    tx,
                )
                .await?;
        }

        Ok(vacancy_id)
    }

    async fn remove_aggregate(&self, id: i32, tx: &mut Tx) -> RepoResult<()> {
        self.clear_children(id, tx).await?;
        self.vacancy_repo.delete_vacancy(id, tx).await
    }

    async fn clear_children(&self, id: i32, tx: &mut Tx) -> RepoResult<()> {
        self.skills_repo.delete_skills_by_vacancy_id(id, tx).await?;
        self.requirements_repo
            .delete_requirements_by_vacancy_id(id, tx)
            .await?;
        self.responsibilities_repo
            .delete_responsibilities_by_vacancy_id(id, tx)
            .await?;
        self.vacancy_disabilities_repo
            .delete_vacancy_disabilities(id, tx)
            .await?;
        Ok(())
    }
}

/// Category names of the linked disabilities, deduplicated in first-seen order.
pub fn disability_categories(links: &[VacancyDisability]) -> Vec<String> {
    dedup_preserving_order(links.iter().map(|link| link.disability.category.clone()))
}

fn build_filter(query: VacancyListQuery) -> VacancyFilter {
    VacancyFilter {
        page: query.page.unwrap_or(1).max(1),
        per_page: query
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE),
        company_id: query.company_id.filter(|id| *id > 0),
        disability_category: non_empty(query.disability_category),
        area: non_empty(query.area),
        contract_type: query.contract_type,
        search_text: non_empty(query.search_text),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

async fn finish<Tx: RepoTransaction, T>(tx: Tx, outcome: RepoResult<T>) -> RepoResult<T> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}

fn fail(operation: VacancyOperation, id: Option<i32>, source: RepoError) -> Error {
    error!(
        code = operation.code(),
        vacancy_id = ?id,
        cause = source.code(),
        error = %source,
        "{}",
        operation.message()
    );
    Error::vacancy(operation, id)
}
