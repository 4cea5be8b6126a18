use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Disability {
    pub id: i32,
    pub name: String,
    pub category: String,
}

/// Join row between a vacancy and a disability, with the disability resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyDisability {
    pub id: i32,
    pub vacancy_id: i32,
    pub disability_id: i32,
    pub disability: Disability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewVacancyDisability {
    pub vacancy_id: i32,
    pub disability_id: i32,
}
