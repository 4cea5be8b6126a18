use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Persisted entity a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Vacancy,
    Disability,
}

impl Entity {
    pub fn as_str(self) -> &'static str {
        match self {
            Entity::Vacancy => "vacancy",
            Entity::Disability => "disability",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Database,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Database => f.write_str("database"),
        }
    }
}

/// Call sites of the vacancy service. Each one maps to a stable two-digit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VacancyOperation {
    Create,
    List,
    Get,
    GetSkills,
    GetRequirements,
    GetResponsibilities,
    GetDisabilities,
    Update,
    Delete,
    /// Per-vacancy disability lookup while listing. Has its own code instead of
    /// sharing `Get`'s `03`.
    ListDisabilities,
}

impl VacancyOperation {
    pub fn code(self) -> &'static str {
        match self {
            VacancyOperation::Create => "01",
            VacancyOperation::List => "02",
            VacancyOperation::Get => "03",
            VacancyOperation::GetSkills => "04",
            VacancyOperation::GetRequirements => "05",
            VacancyOperation::GetResponsibilities => "06",
            VacancyOperation::GetDisabilities => "07",
            VacancyOperation::Update => "08",
            VacancyOperation::Delete => "09",
            VacancyOperation::ListDisabilities => "10",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            VacancyOperation::Create => "failed to create the vacancy",
            VacancyOperation::List => "failed to list the vacancies",
            VacancyOperation::Get => "failed to get the vacancy",
            VacancyOperation::GetSkills => "failed to get the skills",
            VacancyOperation::GetRequirements => "failed to get the requirements",
            VacancyOperation::GetResponsibilities => "failed to get the responsibilities",
            VacancyOperation::GetDisabilities | VacancyOperation::ListDisabilities => {
                "failed to get the disabilities"
            }
            VacancyOperation::Update => "failed to update the vacancy",
            VacancyOperation::Delete => "failed to delete the vacancy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    pub entity: Entity,
    pub operation: VacancyOperation,
    pub id: Option<i32>,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Telemetry(#[from] crate::telemetry::TelemetryError),

    #[error(
        "{} ({}.{}.{})",
        .context.operation.message(),
        .category,
        .context.entity,
        .context.operation.code()
    )]
    Service {
        category: ErrorCategory,
        context: ErrorContext,
    },
}

impl Error {
    pub fn vacancy(operation: VacancyOperation, id: Option<i32>) -> Self {
        Error::Service {
            category: ErrorCategory::Database,
            context: ErrorContext {
                entity: Entity::Vacancy,
                operation,
                id,
            },
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Service { context, .. } => Some(context),
            _ => None,
        }
    }

    pub fn operation(&self) -> Option<VacancyOperation> {
        self.context().map(|ctx| ctx.operation)
    }

    /// Machine-readable code, e.g. `database.vacancy.03`.
    pub fn code(&self) -> String {
        match self {
            Error::Config(_) => "config".to_string(),
            Error::Database(_) => "database".to_string(),
            Error::Migrate(_) => "migrate".to_string(),
            Error::Telemetry(_) => "telemetry".to_string(),
            Error::Service { category, context } => format!(
                "{}.{}.{}",
                category,
                context.entity,
                context.operation.code()
            ),
        }
    }
}
