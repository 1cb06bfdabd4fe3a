use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::{User, UserRole};

#[derive(Deserialize, Validate, Debug)]
pub struct RegisterIn {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    pub phone: Option<String>,
    pub role: Option<RegisterRole>,
}

/// Roles a client may self-assign. Admin accounts are seeded, never
/// registered through the API.
#[derive(Deserialize, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum RegisterRole {
    Buyer,
    Seller,
}

impl From<RegisterRole> for UserRole {
    fn from(role: RegisterRole) -> Self {
        match role {
            RegisterRole::Buyer => UserRole::Buyer,
            RegisterRole::Seller => UserRole::Seller,
        }
    }
}

#[derive(Deserialize, Validate, Debug)]
pub struct LoginIn {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize, Debug)]
pub struct UserOut {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserOut,
    pub token: String,
}
