use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::BigDecimal;
use uuid::Uuid;

use crate::features::properties::models::ListingStatus;

#[derive(Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
pub enum RentType {
    Furnished,
    #[serde(rename = "semi_furnished")]
    #[sqlx(rename = "semi_furnished")]
    SemiFurnished,
    Unfurnished,
}

impl RentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Furnished => "furnished",
            Self::SemiFurnished => "semi_furnished",
            Self::Unfurnished => "unfurnished",
        }
    }
}

#[derive(Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
pub enum TenantType {
    Family,
    Bachelors,
    Company,
    Any,
}

impl TenantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Bachelors => "bachelors",
            Self::Company => "company",
            Self::Any => "any",
        }
    }
}

#[derive(FromRow, Clone, Debug)]
pub struct Rental {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub locality: String,
    pub city: String,
    pub state: String,
    pub monthly_rent: BigDecimal,
    pub security_deposit: Option<BigDecimal>,
    pub property_type: String,
    pub area_sqft: BigDecimal,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub rent_type: RentType,
    pub tenant_type: TenantType,
    pub available_from: Option<DateTime<Utc>>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: ListingStatus,
    pub is_active: bool,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
