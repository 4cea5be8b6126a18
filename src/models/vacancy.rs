use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VacancyContractType {
    Clt,
    Pj,
    Internship,
    Temporary,
    Freelance,
}

impl VacancyContractType {
    pub fn as_str(self) -> &'static str {
        match self {
            VacancyContractType::Clt => "clt",
            VacancyContractType::Pj => "pj",
            VacancyContractType::Internship => "internship",
            VacancyContractType::Temporary => "temporary",
            VacancyContractType::Freelance => "freelance",
        }
    }
}

impl fmt::Display for VacancyContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VacancyContractType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clt" => Ok(VacancyContractType::Clt),
            "pj" => Ok(VacancyContractType::Pj),
            "internship" => Ok(VacancyContractType::Internship),
            "temporary" => Ok(VacancyContractType::Temporary),
            "freelance" => Ok(VacancyContractType::Freelance),
            other => Err(format!("unknown contract type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: i32,
    pub company_id: i32,
    pub title: String,
    pub description: String,
    pub area: String,
    pub contract_type: VacancyContractType,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Column values of a vacancy row, without identity or timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyDraft {
    pub company_id: i32,
    pub title: String,
    pub description: String,
    pub area: String,
    pub contract_type: VacancyContractType,
}

/// Storage-level filter for listing. `None` means "do not filter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyFilter {
    pub page: i64,
    pub per_page: i64,
    pub company_id: Option<i32>,
    pub disability_category: Option<String>,
    pub area: Option<String>,
    pub contract_type: Option<VacancyContractType>,
    pub search_text: Option<String>,
}

impl VacancyFilter {
    /// Rows to skip. Saturates instead of overflowing on very large pages.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}
