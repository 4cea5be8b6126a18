#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jobboard_backend::dto::vacancy_dto::{
    RequirementRequest, ResponsibilityRequest, SkillRequest, VacancyRequest,
};
use jobboard_backend::error::Entity;
use jobboard_backend::models::disability::{Disability, NewVacancyDisability, VacancyDisability};
use jobboard_backend::models::requirement::{NewRequirement, Requirement};
use jobboard_backend::models::responsibility::{NewResponsibility, Responsibility};
use jobboard_backend::models::skill::{NewSkill, Skill};
use jobboard_backend::models::vacancy::{
    Vacancy, VacancyContractType, VacancyDraft, VacancyFilter,
};
use jobboard_backend::repositories::{
    RepoError, RepoResult, RepoTransaction, RequirementRepo, ResponsibilityRepo, SkillRepo,
    VacancyDisabilityRepo, VacancyRepo,
};
use jobboard_backend::services::vacancy_service::VacancyService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    Begin,
    UpsertVacancy,
    CreateSkill,
    CreateRequirement,
    CreateResponsibility,
    UpsertDisability,
    ListVacancies,
    GetVacancy,
    ListSkills,
    ListRequirements,
    ListResponsibilities,
    ListDisabilities,
    DeleteChildren,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRow {
    pub id: i32,
    pub vacancy_id: i32,
    pub disability_id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub vacancies: Vec<Vacancy>,
    pub skills: Vec<Skill>,
    pub requirements: Vec<Requirement>,
    pub responsibilities: Vec<Responsibility>,
    pub disabilities: Vec<Disability>,
    pub links: Vec<LinkRow>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn children_of(&self, vacancy_id: i32) -> (usize, usize, usize, usize) {
        (
            self.skills.iter().filter(|r| r.vacancy_id == vacancy_id).count(),
            self.requirements
                .iter()
                .filter(|r| r.vacancy_id == vacancy_id)
                .count(),
            self.responsibilities
                .iter()
                .filter(|r| r.vacancy_id == vacancy_id)
                .count(),
            self.links.iter().filter(|r| r.vacancy_id == vacancy_id).count(),
        )
    }
}

#[derive(Default)]
struct Inner {
    tables: Mutex<Tables>,
    fail_on: Mutex<Option<FailPoint>>,
    storage_ignores_category: Mutex<bool>,
    remove_on_begin: Mutex<Option<i32>>,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
}

/// Shared in-memory tables implementing every repository trait. Writes are
/// staged on a copy held by the transaction and published on commit.
#[derive(Clone, Default)]
pub struct MemoryDb {
    inner: Arc<Inner>,
}

#[derive(Debug)]
pub struct MemoryTx {
    db: MemoryDb,
    staged: Tables,
}

impl std::fmt::Debug for MemoryDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryDb").finish_non_exhaustive()
    }
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_disability(&self, name: &str, category: &str) -> i32 {
        let mut tables = self.inner.tables.lock().unwrap();
        let id = tables.next_id();
        tables.disabilities.push(Disability {
            id,
            name: name.to_string(),
            category: category.to_string(),
        });
        id
    }

    pub fn snapshot(&self) -> Tables {
        self.inner.tables.lock().unwrap().clone()
    }

    pub fn fail_on(&self, point: FailPoint) {
        *self.inner.fail_on.lock().unwrap() = Some(point);
    }

    pub fn clear_failure(&self) {
        *self.inner.fail_on.lock().unwrap() = None;
    }

    /// Makes `list_vacancies` ignore the disability category, leaving it to the caller.
    pub fn ignore_category_in_storage(&self) {
        *self.inner.storage_ignores_category.lock().unwrap() = true;
    }

    /// Deletes the vacancy and its children from committed state when the next
    /// transaction begins, as a concurrent delete committing first would.
    pub fn remove_on_next_begin(&self, vacancy_id: i32) {
        *self.inner.remove_on_begin.lock().unwrap() = Some(vacancy_id);
    }

    pub fn commits(&self) -> usize {
        self.inner.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.inner.rollbacks.load(Ordering::SeqCst)
    }

    fn check(&self, point: FailPoint) -> RepoResult<()> {
        if *self.inner.fail_on.lock().unwrap() == Some(point) {
            return Err(RepoError::Database(sqlx::Error::Protocol(format!(
                "injected failure at {:?}",
                point
            ))));
        }
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        f(&self.inner.tables.lock().unwrap())
    }
}

#[async_trait]
impl RepoTransaction for MemoryTx {
    async fn commit(self) -> RepoResult<()> {
        *self.db.inner.tables.lock().unwrap() = self.staged;
        self.db.inner.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self) -> RepoResult<()> {
        self.db.inner.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl VacancyRepo<MemoryTx> for MemoryDb {
    async fn begin_transaction(&self) -> RepoResult<MemoryTx> {
        self.check(FailPoint::Begin)?;
        if let Some(id) = self.inner.remove_on_begin.lock().unwrap().take() {
            let mut tables = self.inner.tables.lock().unwrap();
            tables.vacancies.retain(|v| v.id != id);
            tables.skills.retain(|r| r.vacancy_id != id);
            tables.requirements.retain(|r| r.vacancy_id != id);
            tables.responsibilities.retain(|r| r.vacancy_id != id);
            tables.links.retain(|r| r.vacancy_id != id);
        }
        Ok(MemoryTx {
            db: self.clone(),
            staged: self.snapshot(),
        })
    }

    async fn upsert_vacancy(
        &self,
        id: Option<i32>,
        vacancy: &VacancyDraft,
        tx: &mut MemoryTx,
    ) -> RepoResult<i32> {
        self.check(FailPoint::UpsertVacancy)?;
        let tables = &mut tx.staged;
        let id = match id {
            Some(id) if tables.vacancies.iter().any(|v| v.id == id) => id,
            Some(id) => {
                return Err(RepoError::NotFound {
                    entity: Entity::Vacancy,
                    id,
                })
            }
            None => tables.next_id(),
        };
        let row = Vacancy {
            id,
            company_id: vacancy.company_id,
            title: vacancy.title.clone(),
            description: vacancy.description.clone(),
            area: vacancy.area.clone(),
            contract_type: vacancy.contract_type,
            created_at: Some(chrono::Utc::now()),
            updated_at: Some(chrono::Utc::now()),
        };
        match tables.vacancies.iter_mut().find(|v| v.id == id) {
            Some(existing) => {
                let created_at = existing.created_at;
                *existing = Vacancy { created_at, ..row };
            }
            None => tables.vacancies.push(row),
        }
        Ok(id)
    }

    async fn list_vacancies(&self, filter: &VacancyFilter) -> RepoResult<Vec<Vacancy>> {
        self.check(FailPoint::ListVacancies)?;
        let ignore_category = *self.inner.storage_ignores_category.lock().unwrap();
        Ok(self.read(|tables| {
            let mut rows: Vec<Vacancy> = tables
                .vacancies
                .iter()
                .filter(|v| filter.company_id.map_or(true, |id| v.company_id == id))
                .filter(|v| {
                    filter
                        .area
                        .as_ref()
                        .map_or(true, |area| v.area.eq_ignore_ascii_case(area))
                })
                .filter(|v| filter.contract_type.map_or(true, |ct| v.contract_type == ct))
                .filter(|v| {
                    filter.search_text.as_ref().map_or(true, |text| {
                        let needle = text.to_lowercase();
                        v.title.to_lowercase().contains(&needle)
                            || v.description.to_lowercase().contains(&needle)
                    })
                })
                .filter(|v| {
                    if ignore_category {
                        return true;
                    }
                    filter.disability_category.as_ref().map_or(true, |category| {
                        tables.links.iter().any(|link| {
                            link.vacancy_id == v.id
                                && tables.disabilities.iter().any(|d| {
                                    d.id == link.disability_id && &d.category == category
                                })
                        })
                    })
                })
                .cloned()
                .collect();
            rows.sort_by_key(|v| v.id);
            rows.into_iter()
                .skip(usize::try_from(filter.offset()).unwrap_or(usize::MAX))
                .take(usize::try_from(filter.per_page).unwrap_or(usize::MAX))
                .collect()
        }))
    }

    async fn get_vacancy_by_id(&self, id: i32) -> RepoResult<Vacancy> {
        self.check(FailPoint::GetVacancy)?;
        self.read(|tables| tables.vacancies.iter().find(|v| v.id == id).cloned())
            .ok_or(RepoError::NotFound {
                entity: Entity::Vacancy,
                id,
            })
    }

    async fn delete_vacancy(&self, id: i32, tx: &mut MemoryTx) -> RepoResult<()> {
        let before = tx.staged.vacancies.len();
        tx.staged.vacancies.retain(|v| v.id != id);
        if tx.staged.vacancies.len() == before {
            return Err(RepoError::NotFound {
                entity: Entity::Vacancy,
                id,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SkillRepo<MemoryTx> for MemoryDb {
    async fn create_skill(&self, skill: &NewSkill, tx: &mut MemoryTx) -> RepoResult<i32> {
        self.check(FailPoint::CreateSkill)?;
        let id = tx.staged.next_id();
        tx.staged.skills.push(Skill {
            id,
            skill: skill.skill.clone(),
            vacancy_id: skill.vacancy_id,
        });
        Ok(id)
    }

    async fn list_skills_by_vacancy_id(&self, vacancy_id: i32) -> RepoResult<Vec<Skill>> {
        self.check(FailPoint::ListSkills)?;
        Ok(self.read(|tables| {
            tables
                .skills
                .iter()
                .filter(|r| r.vacancy_id == vacancy_id)
                .cloned()
                .collect()
        }))
    }

    async fn delete_skills_by_vacancy_id(
        &self,
        vacancy_id: i32,
        tx: &mut MemoryTx,
    ) -> RepoResult<u64> {
        self.check(FailPoint::DeleteChildren)?;
        let before = tx.staged.skills.len();
        tx.staged.skills.retain(|r| r.vacancy_id != vacancy_id);
        Ok((before - tx.staged.skills.len()) as u64)
    }
}

#[async_trait]
impl RequirementRepo<MemoryTx> for MemoryDb {
    async fn create_requirement(
        &self,
        requirement: &NewRequirement,
        tx: &mut MemoryTx,
    ) -> RepoResult<i32> {
        self.check(FailPoint::CreateRequirement)?;
        let id = tx.staged.next_id();
        tx.staged.requirements.push(Requirement {
            id,
            requirement: requirement.requirement.clone(),
            vacancy_id: requirement.vacancy_id,
        });
        Ok(id)
    }

    async fn list_requirements_by_vacancy_id(
        &self,
        vacancy_id: i32,
    ) -> RepoResult<Vec<Requirement>> {
        self.check(FailPoint::ListRequirements)?;
        Ok(self.read(|tables| {
            tables
                .requirements
                .iter()
                .filter(|r| r.vacancy_id == vacancy_id)
                .cloned()
                .collect()
        }))
    }

    async fn delete_requirements_by_vacancy_id(
        &self,
        vacancy_id: i32,
        tx: &mut MemoryTx,
    ) -> RepoResult<u64> {
        let before = tx.staged.requirements.len();
        tx.staged.requirements.retain(|r| r.vacancy_id != vacancy_id);
        Ok((before - tx.staged.requirements.len()) as u64)
    }
}

#[async_trait]
impl ResponsibilityRepo<MemoryTx> for MemoryDb {
    async fn create_responsibility(
        &self,
        responsibility: &NewResponsibility,
        tx: &mut MemoryTx,
    ) -> RepoResult<i32> {
        self.check(FailPoint::CreateResponsibility)?;
        let id = tx.staged.next_id();
        tx.staged.responsibilities.push(Responsibility {
            id,
            responsibility: responsibility.responsibility.clone(),
            vacancy_id: responsibility.vacancy_id,
        });
        Ok(id)
    }

    async fn list_responsibilities_by_vacancy_id(
        &self,
        vacancy_id: i32,
    ) -> RepoResult<Vec<Responsibility>> {
        self.check(FailPoint::ListResponsibilities)?;
        Ok(self.read(|tables| {
            tables
                .responsibilities
                .iter()
                .filter(|r| r.vacancy_id == vacancy_id)
                .cloned()
                .collect()
        }))
    }

    async fn delete_responsibilities_by_vacancy_id(
        &self,
        vacancy_id: i32,
        tx: &mut MemoryTx,
    ) -> RepoResult<u64> {
        let before = tx.staged.responsibilities.len();
        tx.staged
            .responsibilities
            .retain(|r| r.vacancy_id != vacancy_id);
        Ok((before - tx.staged.responsibilities.len()) as u64)
    }
}

#[async_trait]
impl VacancyDisabilityRepo<MemoryTx> for MemoryDb {
    async fn upsert_vacancy_disability(
        &self,
        link: NewVacancyDisability,
        tx: &mut MemoryTx,
    ) -> RepoResult<()> {
        self.check(FailPoint::UpsertDisability)?;
        let tables = &mut tx.staged;
        if !tables.disabilities.iter().any(|d| d.id == link.disability_id) {
            return Err(RepoError::NotFound {
                entity: Entity::Disability,
                id: link.disability_id,
            });
        }
        let exists = tables.links.iter().any(|row| {
            row.vacancy_id == link.vacancy_id && row.disability_id == link.disability_id
        });
        if !exists {
            let id = tables.next_id();
            tables.links.push(LinkRow {
                id,
                vacancy_id: link.vacancy_id,
                disability_id: link.disability_id,
            });
        }
        Ok(())
    }

    async fn get_vacancy_disabilities(
        &self,
        vacancy_id: i32,
    ) -> RepoResult<Vec<VacancyDisability>> {
        self.check(FailPoint::ListDisabilities)?;
        Ok(self.read(|tables| {
            tables
                .links
                .iter()
                .filter(|row| row.vacancy_id == vacancy_id)
                .filter_map(|row| {
                    let disability = tables
                        .disabilities
                        .iter()
                        .find(|d| d.id == row.disability_id)?
                        .clone();
                    Some(VacancyDisability {
                        id: row.id,
                        vacancy_id: row.vacancy_id,
                        disability_id: row.disability_id,
                        disability,
                    })
                })
                .collect()
        }))
    }

    async fn delete_vacancy_disabilities(
        &self,
        vacancy_id: i32,
        tx: &mut MemoryTx,
    ) -> RepoResult<u64> {
        let before = tx.staged.links.len();
        tx.staged.links.retain(|row| row.vacancy_id != vacancy_id);
        Ok((before - tx.staged.links.len()) as u64)
    }
}

pub fn service(db: &MemoryDb) -> VacancyService<MemoryTx> {
    VacancyService::new(
        Arc::new(db.clone()),
        Arc::new(db.clone()),
        Arc::new(db.clone()),
        Arc::new(db.clone()),
        Arc::new(db.clone()),
    )
}

pub fn vacancy_request(title: &str) -> VacancyRequest {
    VacancyRequest {
        company_id: 1,
        title: title.to_string(),
        description: format!("{} position", title),
        area: "Engineering".to_string(),
        contract_type: VacancyContractType::Clt,
        skills: vec![
            SkillRequest {
                skill: "Rust".to_string(),
            },
            SkillRequest {
                skill: "SQL".to_string(),
            },
        ],
        requirements: vec![RequirementRequest {
            requirement: "3 years of experience".to_string(),
        }],
        responsibilities: vec![
            ResponsibilityRequest {
                responsibility: "Maintain services".to_string(),
            },
            ResponsibilityRequest {
                responsibility: "Review code".to_string(),
            },
            ResponsibilityRequest {
                responsibility: "Mentor juniors".to_string(),
            },
        ],
        disabilities: Vec::new(),
    }
}
