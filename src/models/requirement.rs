use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Requirement {
    pub id: i32,
    pub requirement: String,
    pub vacancy_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequirement {
    pub requirement: String,
    pub vacancy_id: i32,
}
