use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::BigDecimal;
use uuid::Uuid;

#[derive(Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
pub enum ListingStatus {
    Pending,
    Approved,
    Rejected,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
pub enum PropertyType {
    Land,
    Plot,
    Flat,
    House,
    Villa,
    Apartment,
    Commercial,
    Farmland,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Land => "land",
            Self::Plot => "plot",
            Self::Flat => "flat",
            Self::House => "house",
            Self::Villa => "villa",
            Self::Apartment => "apartment",
            Self::Commercial => "commercial",
            Self::Farmland => "farmland",
        }
    }
}

#[derive(Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
pub enum ListingType {
    Sale,
    Rent,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Rent => "rent",
        }
    }
}

#[derive(FromRow, Clone, Debug)]
pub struct Property {
    pub id: Uuid,
    pub seller_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub locality: String,
    pub city: String,
    pub state: String,
    pub price: BigDecimal,
    pub property_type: PropertyType,
    pub listing_type: ListingType,
    pub area_sqft: BigDecimal,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub floors: Option<i32>,
    pub parking: Option<bool>,
    pub plot_number: Option<String>,
    pub facing: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub google_earth_link: Option<String>,
    pub farmland_bigha: Option<BigDecimal>,
    pub farmland_acre: Option<BigDecimal>,
    pub price_per_bigha: Option<BigDecimal>,
    pub plot_total_area: Option<BigDecimal>,
    pub plot_length: Option<BigDecimal>,
    pub plot_width: Option<BigDecimal>,
    pub number_of_plots: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub status: ListingStatus,
    pub views: i32,
    pub is_active: bool,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
