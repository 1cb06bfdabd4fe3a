use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::BigDecimal;
use uuid::Uuid;

#[derive(FromRow, Clone, Debug)]
pub struct InvestmentOpportunity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub city: String,
    pub state: String,
    pub investment_type: String,
    pub min_investment: BigDecimal,
    pub expected_roi: Option<BigDecimal>,
    pub investment_period: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub risk_level: Option<String>,
    pub images: Option<Vec<String>>,
    pub documents: Option<Vec<String>>,
    pub investors_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(FromRow, Clone, Debug)]
pub struct InvestorRegistration {
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
}
