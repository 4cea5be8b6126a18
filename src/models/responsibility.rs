use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Responsibility {
    pub id: i32,
    pub responsibility: String,
    pub vacancy_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResponsibility {
    pub responsibility: String,
    pub vacancy_id: i32,
}
