use bigdecimal::ToPrimitive;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::BigDecimal;
use uuid::Uuid;

use crate::features::properties::models::ListingStatus;
use crate::features::properties::schemas::deserialize_status_from_any;
use crate::features::schemas::{PageInfo, PageQuery, deserialize_bool_from_any};
use crate::features::users::models::UserRole;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_properties: i64,
    pub total_rentals: i64,
    pub total_projects: i64,
    pub total_events: i64,
    pub total_investments: i64,
    pub pending_properties: i64,
    pub pending_rentals: i64,
    pub unread_enquiries: i64,
    pub unread_contacts: i64,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct AdminUserQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    pub role: Option<String>,
    #[serde(deserialize_with = "deserialize_bool_from_any")]
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct StatusQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(deserialize_with = "deserialize_status_from_any")]
    pub status: Option<ListingStatus>,
}

/// The user columns an admin sees, the password hash never leaves the
/// database.
#[derive(FromRow, Serialize, Clone, Debug)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

pub const USER_SUMMARY_COLUMNS: &str =
    "id, email, full_name, phone, role, is_active, created_at";

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct AdminUserUpdateIn {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct PropertyStatusIn {
    pub status: Option<ListingStatus>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, Debug)]
pub struct UsersResponse {
    pub users: Vec<UserSummary>,
    pub pagination: PageInfo,
}

#[derive(FromRow, Debug)]
pub struct InvestorRegistrationRow {
    pub id: Uuid,
    pub opportunity_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub investment_budget: Option<BigDecimal>,
    pub preferred_investment_type: Option<String>,
    pub message: Option<String>,
    pub is_contacted: bool,
    pub created_at: DateTime<Utc>,
    pub opportunity_title: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct InvestorRegistrationAdminOut {
    pub id: Uuid,
    pub opportunity_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub investment_budget: Option<f64>,
    pub preferred_investment_type: Option<String>,
    pub message: Option<String>,
    pub is_contacted: bool,
    pub created_at: DateTime<Utc>,
    pub opportunity_title: Option<String>,
}

impl From<InvestorRegistrationRow> for InvestorRegistrationAdminOut {
    fn from(row: InvestorRegistrationRow) -> Self {
        Self {
            id: row.id,
            opportunity_id: row.opportunity_id,
            user_id: row.user_id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            investment_budget: row.investment_budget.as_ref().and_then(|v| v.to_f64()),
            preferred_investment_type: row.preferred_investment_type,
            message: row.message,
            is_contacted: row.is_contacted,
            created_at: row.created_at,
            opportunity_title: row.opportunity_title,
        }
    }
}
