use serde::{Deserialize, Serialize};

use crate::models::company::Company;
use crate::models::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            email: value.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRequest {
    pub name: String,
    pub cnpj: String,
    pub phone: String,
    pub user: UserRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub id: i32,
    pub name: String,
    pub cnpj: String,
    pub phone: String,
    pub user: UserResponse,
}

impl CompanyRequest {
    /// The owning user as it will be stored; `id` is assigned by the database.
    pub fn to_user(&self) -> User {
        User {
            id: 0,
            email: self.user.email.clone(),
            password: self.user.password.clone(),
        }
    }

    /// The company row owned by an already persisted `user`.
    pub fn to_company(&self, user: &User) -> Company {
        Company {
            id: 0,
            name: self.name.clone(),
            cnpj: self.cnpj.clone(),
            phone: self.phone.clone(),
            user_id: user.id,
        }
    }
}

impl CompanyResponse {
    pub fn new(company: Company, user: User) -> Self {
        Self {
            id: company.id,
            name: company.name,
            cnpj: company.cnpj,
            phone: company.phone,
            user: user.into(),
        }
    }
}
