use bigdecimal::ToPrimitive;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::features::investments::models::{InvestmentOpportunity, InvestorRegistration};
use crate::features::schemas::{PageInfo, PageQuery, deserialize_f64_from_json};

#[derive(Deserialize, Validate, Debug)]
pub struct OpportunityIn {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "Investment type is required"))]
    pub investment_type: String,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub min_investment: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub expected_roi: Option<f64>,
    pub investment_period: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub risk_level: Option<String>,
    pub images: Option<Vec<String>>,
    pub documents: Option<Vec<String>>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct InvestorRegistrationIn {
    pub opportunity_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub investment_budget: Option<f64>,
    pub preferred_investment_type: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct OpportunityQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    pub city: Option<String>,
    pub investment_type: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct OpportunityOut {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub city: String,
    pub state: String,
    pub investment_type: String,
    pub min_investment: f64,
    pub expected_roi: Option<f64>,
    pub investment_period: Option<String>,
    pub highlights: Vec<String>,
    pub risk_level: Option<String>,
    pub images: Vec<String>,
    pub documents: Vec<String>,
    pub investors_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InvestmentOpportunity> for OpportunityOut {
    fn from(opportunity: InvestmentOpportunity) -> Self {
        Self {
            id: opportunity.id,
            title: opportunity.title,
            description: opportunity.description,
            location: opportunity.location,
            city: opportunity.city,
            state: opportunity.state,
            investment_type: opportunity.investment_type,
            min_investment: opportunity.min_investment.to_f64().unwrap_or_default(),
            expected_roi: opportunity.expected_roi.as_ref().and_then(|v| v.to_f64()),
            investment_period: opportunity.investment_period,
            highlights: opportunity.highlights.unwrap_or_default(),
            risk_level: opportunity.risk_level,
            images: opportunity.images.unwrap_or_default(),
            documents: opportunity.documents.unwrap_or_default(),
            investors_count: opportunity.investors_count,
            is_active: opportunity.is_active,
            created_at: opportunity.created_at,
            updated_at: opportunity.updated_at,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct InvestorRegistrationOut {
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
}

impl From<InvestorRegistration> for InvestorRegistrationOut {
    fn from(registration: InvestorRegistration) -> Self {
        Self {
            id: registration.id,
            opportunity_id: registration.opportunity_id,
            user_id: registration.user_id,
            full_name: registration.full_name,
            email: registration.email,
            phone: registration.phone,
            investment_budget: registration
                .investment_budget
                .as_ref()
                .and_then(|v| v.to_f64()),
            preferred_investment_type: registration.preferred_investment_type,
            message: registration.message,
            is_contacted: registration.is_contacted,
            created_at: registration.created_at,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct OpportunitiesResponse {
    pub opportunities: Vec<OpportunityOut>,
    pub pagination: PageInfo,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentStatistics {
    pub total_opportunities: i64,
    pub total_investors: i64,
    pub total_investment: f64,
}
