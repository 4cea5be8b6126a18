use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Skill {
    pub id: i32,
    pub skill: String,
    pub vacancy_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSkill {
    pub skill: String,
    pub vacancy_id: i32,
}
