use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::requirement::{NewRequirement, Requirement};
use crate::models::responsibility::{NewResponsibility, Responsibility};
use crate::models::skill::{NewSkill, Skill};
use crate::models::vacancy::{Vacancy, VacancyContractType, VacancyDraft};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRequest {
    pub skill: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementRequest {
    pub requirement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsibilityRequest {
    pub responsibility: String,
}

impl SkillRequest {
    pub fn to_model(&self, vacancy_id: i32) -> NewSkill {
        NewSkill {
            skill: self.skill.clone(),
            vacancy_id,
        }
    }
}

impl RequirementRequest {
    pub fn to_model(&self, vacancy_id: i32) -> NewRequirement {
        NewRequirement {
            requirement: self.requirement.clone(),
            vacancy_id,
        }
    }
}

impl ResponsibilityRequest {
    pub fn to_model(&self, vacancy_id: i32) -> NewResponsibility {
        NewResponsibility {
            responsibility: self.responsibility.clone(),
            vacancy_id,
        }
    }
}

/// A whole vacancy aggregate as submitted by a client. `disabilities` holds disability ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyRequest {
    pub company_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub area: String,
    pub contract_type: VacancyContractType,
    #[serde(default)]
    pub skills: Vec<SkillRequest>,
    #[serde(default)]
    pub requirements: Vec<RequirementRequest>,
    #[serde(default)]
    pub responsibilities: Vec<ResponsibilityRequest>,
    #[serde(default)]
    pub disabilities: Vec<i32>,
}

impl VacancyRequest {
    pub fn to_model(&self) -> VacancyDraft {
        VacancyDraft {
            company_id: self.company_id,
            title: self.title.clone(),
            description: self.description.clone(),
            area: self.area.clone(),
            contract_type: self.contract_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillResponse {
    pub id: i32,
    pub skill: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementResponse {
    pub id: i32,
    pub requirement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsibilityResponse {
    pub id: i32,
    pub responsibility: String,
}

impl From<Skill> for SkillResponse {
    fn from(value: Skill) -> Self {
        Self {
            id: value.id,
            skill: value.skill,
        }
    }
}

impl From<Requirement> for RequirementResponse {
    fn from(value: Requirement) -> Self {
        Self {
            id: value.id,
            requirement: value.requirement,
        }
    }
}

impl From<Responsibility> for ResponsibilityResponse {
    fn from(value: Responsibility) -> Self {
        Self {
            id: value.id,
            responsibility: value.responsibility,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacancyResponse {
    pub id: i32,
    pub company_id: i32,
    pub title: String,
    pub description: String,
    pub area: String,
    pub contract_type: VacancyContractType,
    pub skills: Vec<SkillResponse>,
    pub requirements: Vec<RequirementResponse>,
    pub responsibilities: Vec<ResponsibilityResponse>,
    pub disabilities: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl VacancyResponse {
    pub fn assemble(
        vacancy: Vacancy,
        disabilities: Vec<String>,
        skills: Vec<Skill>,
        responsibilities: Vec<Responsibility>,
        requirements: Vec<Requirement>,
    ) -> Self {
        Self {
            id: vacancy.id,
            company_id: vacancy.company_id,
            title: vacancy.title,
            description: vacancy.description,
            area: vacancy.area,
            contract_type: vacancy.contract_type,
            skills: skills.into_iter().map(Into::into).collect(),
            requirements: requirements.into_iter().map(Into::into).collect(),
            responsibilities: responsibilities.into_iter().map(Into::into).collect(),
            disabilities,
            created_at: vacancy.created_at,
            updated_at: vacancy.updated_at,
        }
    }
}

/// Listing entry: the vacancy columns plus its disability categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacancySimpleResponse {
    pub id: i32,
    pub company_id: i32,
    pub title: String,
    pub area: String,
    pub contract_type: VacancyContractType,
    pub disabilities: Vec<String>,
}

impl VacancySimpleResponse {
    pub fn new(vacancy: Vacancy, disabilities: Vec<String>) -> Self {
        Self {
            id: vacancy.id,
            company_id: vacancy.company_id,
            title: vacancy.title,
            area: vacancy.area,
            contract_type: vacancy.contract_type,
            disabilities,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VacancyListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub company_id: Option<i32>,
    pub disability_category: Option<String>,
    pub area: Option<String>,
    pub contract_type: Option<VacancyContractType>,
    pub search_text: Option<String>,
}
