use bigdecimal::ToPrimitive;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::features::properties::models::ListingStatus;
use crate::features::properties::schemas::deserialize_status_from_any;
use crate::features::rentals::models::{Rental, RentType, TenantType};
use crate::features::schemas::{
    PageInfo, PageQuery, deserialize_f64_from_any, deserialize_f64_from_json,
    deserialize_i32_from_json, deserialize_i64_from_any,
};

#[derive(Deserialize, Validate, Debug)]
pub struct RentalIn {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Locality is required"))]
    pub locality: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub monthly_rent: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub security_deposit: Option<f64>,
    #[validate(length(min = 1, message = "Property type is required"))]
    pub property_type: String,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub area_sqft: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_i32_from_json")]
    pub bedrooms: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_i32_from_json")]
    pub bathrooms: Option<i32>,
    pub rent_type: Option<RentType>,
    pub tenant_type: Option<TenantType>,
    pub available_from: Option<DateTime<Utc>>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub longitude: Option<f64>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct RentalQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    pub city: Option<String>,
    pub state: Option<String>,
    pub property_type: Option<String>,
    #[serde(deserialize_with = "deserialize_f64_from_any")]
    pub min_rent: Option<f64>,
    #[serde(deserialize_with = "deserialize_f64_from_any")]
    pub max_rent: Option<f64>,
    #[serde(deserialize_with = "deserialize_i64_from_any")]
    pub bedrooms: Option<i64>,
    pub rent_type: Option<RentType>,
    pub tenant_type: Option<TenantType>,
    #[serde(deserialize_with = "deserialize_status_from_any")]
    pub status: Option<ListingStatus>,
}

#[derive(Serialize, Debug)]
pub struct RentalOut {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub locality: String,
    pub city: String,
    pub state: String,
    pub monthly_rent: f64,
    pub security_deposit: Option<f64>,
    pub property_type: String,
    pub area_sqft: f64,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub rent_type: RentType,
    pub tenant_type: TenantType,
    pub available_from: Option<DateTime<Utc>>,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
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

impl From<Rental> for RentalOut {
    fn from(rental: Rental) -> Self {
        Self {
            id: rental.id,
            owner_id: rental.owner_id,
            title: rental.title,
            description: rental.description,
            locality: rental.locality,
            city: rental.city,
            state: rental.state,
            monthly_rent: rental.monthly_rent.to_f64().unwrap_or(0.0),
            security_deposit: rental.security_deposit.as_ref().and_then(|v| v.to_f64()),
            property_type: rental.property_type,
            area_sqft: rental.area_sqft.to_f64().unwrap_or(0.0),
            bedrooms: rental.bedrooms,
            bathrooms: rental.bathrooms,
            rent_type: rental.rent_type,
            tenant_type: rental.tenant_type,
            available_from: rental.available_from,
            amenities: rental.amenities.unwrap_or_default(),
            images: rental.images.unwrap_or_default(),
            latitude: rental.latitude,
            longitude: rental.longitude,
            status: rental.status,
            is_active: rental.is_active,
            full_name: rental.full_name,
            email: rental.email,
            phone: rental.phone,
            created_at: rental.created_at,
            updated_at: rental.updated_at,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct RentalsResponse {
    pub rentals: Vec<RentalOut>,
    pub pagination: PageInfo,
}
