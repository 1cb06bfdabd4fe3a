use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::BigDecimal;
use uuid::Uuid;

#[derive(FromRow, Clone, Debug)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub city: String,
    pub state: String,
    pub status: String,
    pub total_units: Option<i32>,
    pub available_units: Option<i32>,
    pub price_range_min: Option<BigDecimal>,
    pub price_range_max: Option<BigDecimal>,
    pub amenities: Option<Vec<String>>,
    pub highlights: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub gallery: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub brochure_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub completion_date: Option<DateTime<Utc>>,
    pub possession_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
