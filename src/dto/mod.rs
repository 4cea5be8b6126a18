pub mod company_dto;
pub mod vacancy_dto;
