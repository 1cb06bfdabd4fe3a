use bigdecimal::ToPrimitive;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::features::properties::models::{ListingStatus, ListingType, Property, PropertyType};
use crate::features::schemas::{
    PageInfo, PageQuery, deserialize_bool_from_any, deserialize_f64_from_any,
    deserialize_f64_from_json, deserialize_i32_from_json, deserialize_i64_from_any,
};
use crate::utilities::errors::AppError;

pub const MAX_PRICE: f64 = 999_999_999_999_999.99;
pub const MAX_AREA_SQFT: f64 = 99_999_999.99;

#[derive(Deserialize, Validate, Debug)]
pub struct PropertyIn {
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
    pub price: Option<f64>,
    pub property_type: PropertyType,
    pub listing_type: Option<ListingType>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub area_sqft: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_i32_from_json")]
    pub bedrooms: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_i32_from_json")]
    pub bathrooms: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_i32_from_json")]
    pub floors: Option<i32>,
    pub parking: Option<bool>,
    pub plot_number: Option<String>,
    pub facing: Option<String>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub longitude: Option<f64>,
    pub google_earth_link: Option<String>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub farmland_bigha: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub farmland_acre: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub price_per_bigha: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub plot_total_area: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub plot_length: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub plot_width: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_i32_from_json")]
    pub number_of_plots: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub status: Option<ListingStatus>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Resolve the stored price for a new listing.
///
/// Farmland may omit the price, it is then derived from
/// `price_per_bigha * farmland_bigha`, falling back to zero. All other
/// property types require a strictly positive price.
pub fn resolve_price(
    property_type: PropertyType,
    price: Option<f64>,
    price_per_bigha: Option<f64>,
    farmland_bigha: Option<f64>,
) -> Result<f64, AppError> {
    if property_type == PropertyType::Farmland {
        return match price {
            Some(price) => {
                if price < 0.0 {
                    return Err(AppError::ValidationError(
                        "Invalid price. Please enter a valid positive number if provided."
                            .to_string(),
                    ));
                }
                if price > MAX_PRICE {
                    return Err(AppError::ValidationError(
                        "Price exceeds maximum allowed value".to_string(),
                    ));
                }
                Ok(price)
            }
            None => match (price_per_bigha, farmland_bigha) {
                (Some(per_bigha), Some(bigha)) if per_bigha > 0.0 && bigha > 0.0 => {
                    Ok(per_bigha * bigha)
                }
                _ => Ok(0.0),
            },
        };
    }

    let price = price.ok_or_else(|| {
        AppError::ValidationError("Invalid price. Please enter a valid positive number.".to_string())
    })?;
    if price <= 0.0 {
        return Err(AppError::ValidationError(
            "Invalid price. Please enter a valid positive number.".to_string(),
        ));
    }
    if price > MAX_PRICE {
        return Err(AppError::ValidationError(
            "Price exceeds maximum allowed value".to_string(),
        ));
    }
    Ok(price)
}

/// Resolve the stored area for a new listing. Plot and farmland
/// listings carry their own area fields, so `area_sqft` is optional for
/// them and defaults to zero.
pub fn resolve_area(
    property_type: PropertyType,
    area_sqft: Option<f64>,
) -> Result<f64, AppError> {
    let optional = matches!(property_type, PropertyType::Plot | PropertyType::Farmland);

    match area_sqft {
        Some(area) => {
            if area < 0.0 || (!optional && area == 0.0) {
                return Err(AppError::ValidationError(
                    "Invalid area. Please enter a valid positive number.".to_string(),
                ));
            }
            if area > MAX_AREA_SQFT {
                return Err(AppError::ValidationError(
                    "Area exceeds maximum allowed value".to_string(),
                ));
            }
            Ok(area)
        }
        None if optional => Ok(0.0),
        None => Err(AppError::ValidationError(
            "Invalid area. Please enter a valid positive number.".to_string(),
        )),
    }
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct PropertyQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(deserialize_with = "deserialize_property_type_from_any")]
    pub property_type: Option<PropertyType>,
    #[serde(deserialize_with = "deserialize_f64_from_any")]
    pub min_price: Option<f64>,
    #[serde(deserialize_with = "deserialize_f64_from_any")]
    pub max_price: Option<f64>,
    #[serde(deserialize_with = "deserialize_f64_from_any")]
    pub min_area: Option<f64>,
    #[serde(deserialize_with = "deserialize_f64_from_any")]
    pub max_area: Option<f64>,
    #[serde(deserialize_with = "deserialize_i64_from_any")]
    pub bedrooms: Option<i64>,
    #[serde(deserialize_with = "deserialize_status_from_any")]
    pub status: Option<ListingStatus>,
    #[serde(deserialize_with = "deserialize_bool_from_any")]
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct MyPropertiesQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(deserialize_with = "deserialize_status_from_any")]
    pub status: Option<ListingStatus>,
    #[serde(deserialize_with = "deserialize_property_type_from_any")]
    pub property_type: Option<PropertyType>,
    pub search: Option<String>,
}

pub fn deserialize_status_from_any<'de, D>(
    deserializer: D,
) -> Result<Option<ListingStatus>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.trim() {
        "pending" => Some(ListingStatus::Pending),
        "approved" => Some(ListingStatus::Approved),
        "rejected" => Some(ListingStatus::Rejected),
        _ => None,
    }))
}

pub fn deserialize_property_type_from_any<'de, D>(
    deserializer: D,
) -> Result<Option<PropertyType>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.trim() {
        "land" => Some(PropertyType::Land),
        "plot" => Some(PropertyType::Plot),
        "flat" => Some(PropertyType::Flat),
        "house" => Some(PropertyType::House),
        "villa" => Some(PropertyType::Villa),
        "apartment" => Some(PropertyType::Apartment),
        "commercial" => Some(PropertyType::Commercial),
        "farmland" => Some(PropertyType::Farmland),
        _ => None,
    }))
}

/// Wire shape of a property. Numeric columns come back as `BigDecimal`
/// and are flattened to plain JSON numbers, null arrays become empty.
#[derive(Serialize, Debug)]
pub struct PropertyOut {
    pub id: Uuid,
    pub seller_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub locality: String,
    pub city: String,
    pub state: String,
    pub price: f64,
    pub property_type: PropertyType,
    pub listing_type: ListingType,
    pub area_sqft: f64,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub floors: Option<i32>,
    pub parking: Option<bool>,
    pub plot_number: Option<String>,
    pub facing: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub google_earth_link: Option<String>,
    pub farmland_bigha: Option<f64>,
    pub farmland_acre: Option<f64>,
    pub price_per_bigha: Option<f64>,
    pub plot_total_area: Option<f64>,
    pub plot_length: Option<f64>,
    pub plot_width: Option<f64>,
    pub number_of_plots: Option<i32>,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub status: ListingStatus,
    pub views: i32,
    pub is_active: bool,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Property> for PropertyOut {
    fn from(property: Property) -> Self {
        Self {
            id: property.id,
            seller_id: property.seller_id,
            title: property.title,
            description: property.description,
            locality: property.locality,
            city: property.city,
            state: property.state,
            price: property.price.to_f64().unwrap_or(0.0),
            property_type: property.property_type,
            listing_type: property.listing_type,
            area_sqft: property.area_sqft.to_f64().unwrap_or(0.0),
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            floors: property.floors,
            parking: property.parking,
            plot_number: property.plot_number,
            facing: property.facing,
            latitude: property.latitude,
            longitude: property.longitude,
            google_earth_link: property.google_earth_link,
            farmland_bigha: property.farmland_bigha.as_ref().and_then(|v| v.to_f64()),
            farmland_acre: property.farmland_acre.as_ref().and_then(|v| v.to_f64()),
            price_per_bigha: property.price_per_bigha.as_ref().and_then(|v| v.to_f64()),
            plot_total_area: property.plot_total_area.as_ref().and_then(|v| v.to_f64()),
            plot_length: property.plot_length.as_ref().and_then(|v| v.to_f64()),
            plot_width: property.plot_width.as_ref().and_then(|v| v.to_f64()),
            number_of_plots: property.number_of_plots,
            amenities: property.amenities.unwrap_or_default(),
            images: property.images.unwrap_or_default(),
            status: property.status,
            views: property.views,
            is_active: property.is_active,
            full_name: property.full_name,
            email: property.email,
            phone: property.phone,
            created_at: property.created_at,
            updated_at: property.updated_at,
        }
    }
}

impl PropertyOut {
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }
}

#[derive(Serialize, Debug)]
pub struct PropertiesResponse {
    pub properties: Vec<PropertyOut>,
    pub pagination: PageInfo,
}

#[derive(Serialize, Debug)]
pub struct PropertyResponse {
    pub property: PropertyOut,
}

#[derive(Serialize, Debug)]
pub struct PropertyCreatedResponse {
    pub message: String,
    pub property: PropertyOut,
    #[serde(rename = "autoApproved")]
    pub auto_approved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::{BigDecimal, FromPrimitive};

    #[test]
    fn price_required_and_positive_for_regular_types() {
        assert!(resolve_price(PropertyType::House, None, None, None).is_err());
        assert!(resolve_price(PropertyType::House, Some(0.0), None, None).is_err());
        assert!(resolve_price(PropertyType::House, Some(-5.0), None, None).is_err());
        assert_eq!(
            resolve_price(PropertyType::House, Some(2_500_000.0), None, None).unwrap(),
            2_500_000.0
        );
    }

    #[test]
    fn price_cap_is_enforced() {
        assert!(resolve_price(PropertyType::Flat, Some(MAX_PRICE + 1.0), None, None).is_err());
        assert!(
            resolve_price(PropertyType::Farmland, Some(MAX_PRICE + 1.0), None, None).is_err()
        );
    }

    #[test]
    fn farmland_price_derived_from_bigha() {
        let price =
            resolve_price(PropertyType::Farmland, None, Some(100_000.0), Some(5.0)).unwrap();
        assert_eq!(price, 500_000.0);
    }

    #[test]
    fn farmland_price_defaults_to_zero() {
        assert_eq!(
            resolve_price(PropertyType::Farmland, None, None, None).unwrap(),
            0.0
        );
        assert_eq!(
            resolve_price(PropertyType::Farmland, None, Some(-1.0), Some(5.0)).unwrap(),
            0.0
        );
    }

    #[test]
    fn farmland_explicit_zero_price_is_kept() {
        assert_eq!(
            resolve_price(PropertyType::Farmland, Some(0.0), Some(100.0), Some(5.0)).unwrap(),
            0.0
        );
    }

    #[test]
    fn area_required_for_regular_types() {
        assert!(resolve_area(PropertyType::Villa, None).is_err());
        assert!(resolve_area(PropertyType::Villa, Some(0.0)).is_err());
        assert_eq!(resolve_area(PropertyType::Villa, Some(1200.0)).unwrap(), 1200.0);
    }

    #[test]
    fn area_optional_for_plot_and_farmland() {
        assert_eq!(resolve_area(PropertyType::Plot, None).unwrap(), 0.0);
        assert_eq!(resolve_area(PropertyType::Farmland, None).unwrap(), 0.0);
        assert_eq!(resolve_area(PropertyType::Plot, Some(0.0)).unwrap(), 0.0);
        assert!(resolve_area(PropertyType::Plot, Some(-1.0)).is_err());
    }

    #[test]
    fn area_cap_is_enforced() {
        assert!(resolve_area(PropertyType::Flat, Some(MAX_AREA_SQFT + 1.0)).is_err());
    }

    #[test]
    fn property_out_flattens_numerics_and_arrays() {
        let property = Property {
            id: Uuid::new_v4(),
            seller_id: None,
            title: "3BHK".to_string(),
            description: None,
            locality: "Vijay Nagar".to_string(),
            city: "Indore".to_string(),
            state: "Madhya Pradesh".to_string(),
            price: BigDecimal::from_f64(4500000.50).unwrap(),
            property_type: PropertyType::Flat,
            listing_type: ListingType::Sale,
            area_sqft: BigDecimal::from_f64(1450.25).unwrap(),
            bedrooms: Some(3),
            bathrooms: Some(2),
            floors: None,
            parking: Some(true),
            plot_number: None,
            facing: None,
            latitude: Some(22.72),
            longitude: Some(75.86),
            google_earth_link: None,
            farmland_bigha: None,
            farmland_acre: None,
            price_per_bigha: None,
            plot_total_area: None,
            plot_length: None,
            plot_width: None,
            number_of_plots: None,
            amenities: None,
            images: None,
            status: ListingStatus::Approved,
            views: 7,
            is_active: true,
            full_name: None,
            email: None,
            phone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let out = PropertyOut::from(property);
        assert_eq!(out.price, 4500000.50);
        assert_eq!(out.area_sqft, 1450.25);
        assert_eq!(out.amenities, Vec::<String>::new());
        assert_eq!(out.images, Vec::<String>::new());
        assert_eq!(out.views, 7);
    }

    #[test]
    fn status_filter_parses_leniently() {
        let query: PropertyQuery =
            serde_urlencoded::from_str("status=pending&property_type=bogus").unwrap();
        assert_eq!(query.status, Some(ListingStatus::Pending));
        assert_eq!(query.property_type, None);
    }
}
