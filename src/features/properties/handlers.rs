use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bigdecimal::{BigDecimal, FromPrimitive};
use serde::Deserialize;
use serde_json::json;
use sqlx::QueryBuilder;
use uuid::Uuid;
use validator::Validate;

use crate::{
    features::{
        properties::{
            models::{ListingStatus, ListingType, Property, PropertyType},
            repository::{
                PropertyFilters, get_property, images_for_properties, increment_views,
                list_my_properties, list_properties, set_moderation,
            },
            schemas::{
                MyPropertiesQuery, PropertiesResponse, PropertyCreatedResponse, PropertyIn,
                PropertyOut, PropertyQuery, PropertyResponse, resolve_area, resolve_price,
            },
        },
        schemas::{Pagination, deserialize_f64_from_json, deserialize_i32_from_json},
        users::models::UserRole,
    },
    services::database::Database,
    utilities::{
        auth::{AdminUser, CurrentUser, OptionalUser},
        errors::AppError,
    },
};

pub async fn list_properties_handler(
    State(database): State<Database>,
    OptionalUser(user): OptionalUser,
    Query(query): Query<PropertyQuery>,
) -> Result<Response, AppError> {
    let is_admin = user.is_some_and(|u| u.role == UserRole::Admin);
    let pagination = Pagination::clamped(&query.page, 20);
    let filters = PropertyFilters::from_query(&query, is_admin);

    let (properties, total) = list_properties(&database.pool, &filters, pagination).await?;

    let property_ids: Vec<Uuid> = properties.iter().map(|p| p.id).collect();
    let mut images = images_for_properties(&database.pool, &property_ids).await?;

    let properties = properties
        .into_iter()
        .map(|property| {
            let gallery = images.remove(&property.id).unwrap_or_default();
            PropertyOut::from(property).with_images(gallery)
        })
        .collect();

    Ok(Json(PropertiesResponse {
        properties,
        pagination: pagination.page_info(total),
    })
    .into_response())
}

pub async fn get_property_handler(
    State(database): State<Database>,
    Path(property_id): Path<Uuid>,
) -> Result<Response, AppError> {
    increment_views(&database.pool, property_id).await?;

    let property = get_property(&database.pool, property_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Property".to_string()))?;

    let mut images = images_for_properties(&database.pool, &[property_id]).await?;
    let gallery = images.remove(&property_id).unwrap_or_default();

    Ok(Json(PropertyResponse {
        property: PropertyOut::from(property).with_images(gallery),
    })
    .into_response())
}

pub async fn create_property_handler(
    State(database): State<Database>,
    OptionalUser(user): OptionalUser,
    Json(property_in): Json<PropertyIn>,
) -> Result<Response, AppError> {
    property_in.validate()?;

    let property_type = property_in.property_type;
    let price = resolve_price(
        property_type,
        property_in.price,
        property_in.price_per_bigha,
        property_in.farmland_bigha,
    )?;
    let area_sqft = resolve_area(property_type, property_in.area_sqft)?;

    let is_farmland = property_type == PropertyType::Farmland;
    let is_plot = property_type == PropertyType::Plot;

    // Type-specific fields are dropped unless they belong to this
    // property type and carry a positive value.
    let keep_positive = |v: Option<f64>, keep: bool| v.filter(|v| keep && *v > 0.0);
    let farmland_bigha = keep_positive(property_in.farmland_bigha, is_farmland);
    let farmland_acre = keep_positive(property_in.farmland_acre, is_farmland);
    let price_per_bigha = keep_positive(property_in.price_per_bigha, is_farmland);
    let plot_total_area = keep_positive(property_in.plot_total_area, is_plot);
    let plot_length = keep_positive(property_in.plot_length, is_plot);
    let plot_width = keep_positive(property_in.plot_width, is_plot);
    let number_of_plots = property_in
        .number_of_plots
        .filter(|v| is_plot && *v > 0);

    let non_negative = |v: Option<i32>| v.filter(|v| *v >= 0);

    // Moderation gate: admins publish immediately, everyone else lands
    // in the pending queue regardless of what the payload claims.
    let is_admin = user
        .as_ref()
        .is_some_and(|u| u.role == UserRole::Admin);
    let (status, is_active) = if is_admin {
        (ListingStatus::Approved, true)
    } else {
        (ListingStatus::Pending, false)
    };

    let seller_id = user.as_ref().map(|u| u.id);
    let listing_type = property_in.listing_type.unwrap_or(ListingType::Sale);
    let amenities = property_in.amenities.clone().unwrap_or_default();
    let images = property_in.images.clone().unwrap_or_default();

    let mut tx = database.pool.begin().await?;

    let property = sqlx::query_as::<_, Property>(
        r#"
        INSERT INTO properties (
            seller_id, title, description, locality, city, state, price,
            property_type, listing_type, area_sqft, bedrooms, bathrooms,
            floors, parking, plot_number, facing, latitude, longitude,
            google_earth_link, farmland_bigha, farmland_acre,
            price_per_bigha, plot_total_area, plot_length, plot_width,
            number_of_plots, amenities, images, status, is_active,
            full_name, email, phone)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
            $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25,
            $26, $27, $28, $29, $30, $31, $32, $33)
        RETURNING *
        "#,
    )
    .bind(seller_id)
    .bind(&property_in.title)
    .bind(&property_in.description)
    .bind(&property_in.locality)
    .bind(&property_in.city)
    .bind(&property_in.state)
    .bind(BigDecimal::from_f64(price).unwrap_or_default())
    .bind(property_type.as_str())
    .bind(listing_type.as_str())
    .bind(BigDecimal::from_f64(area_sqft).unwrap_or_default())
    .bind(non_negative(property_in.bedrooms))
    .bind(non_negative(property_in.bathrooms))
    .bind(non_negative(property_in.floors))
    .bind(property_in.parking)
    .bind(&property_in.plot_number)
    .bind(&property_in.facing)
    .bind(property_in.latitude)
    .bind(property_in.longitude)
    .bind(&property_in.google_earth_link)
    .bind(farmland_bigha.and_then(BigDecimal::from_f64))
    .bind(farmland_acre.and_then(BigDecimal::from_f64))
    .bind(price_per_bigha.and_then(BigDecimal::from_f64))
    .bind(plot_total_area.and_then(BigDecimal::from_f64))
    .bind(plot_length.and_then(BigDecimal::from_f64))
    .bind(plot_width.and_then(BigDecimal::from_f64))
    .bind(number_of_plots)
    .bind(&amenities)
    .bind(&images)
    .bind(status.as_str())
    .bind(is_active)
    .bind(&property_in.full_name)
    .bind(&property_in.email)
    .bind(&property_in.phone)
    .fetch_one(&mut *tx)
    .await?;

    for (idx, image_url) in images.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO property_images (property_id, image_url, display_order)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(property.id)
        .bind(image_url)
        .bind(idx as i32)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    let message = if is_admin {
        "Property listed successfully and approved automatically"
    } else {
        "Property created successfully"
    };

    let response = PropertyCreatedResponse {
        message: message.to_string(),
        property: PropertyOut::from(property).with_images(images),
        auto_approved: is_admin,
    };
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct PropertyUpdateIn {
    pub title: Option<String>,
    pub description: Option<String>,
    pub locality: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(deserialize_with = "deserialize_f64_from_json")]
    pub price: Option<f64>,
    pub listing_type: Option<ListingType>,
    #[serde(deserialize_with = "deserialize_f64_from_json")]
    pub area_sqft: Option<f64>,
    #[serde(deserialize_with = "deserialize_i32_from_json")]
    pub bedrooms: Option<i32>,
    #[serde(deserialize_with = "deserialize_i32_from_json")]
    pub bathrooms: Option<i32>,
    #[serde(deserialize_with = "deserialize_i32_from_json")]
    pub floors: Option<i32>,
    pub parking: Option<bool>,
    pub plot_number: Option<String>,
    pub facing: Option<String>,
    #[serde(deserialize_with = "deserialize_f64_from_json")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "deserialize_f64_from_json")]
    pub longitude: Option<f64>,
    pub google_earth_link: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub async fn update_property_handler(
    State(database): State<Database>,
    CurrentUser(user): CurrentUser,
    Path(property_id): Path<Uuid>,
    Json(update_in): Json<PropertyUpdateIn>,
) -> Result<Response, AppError> {
    let property = get_property(&database.pool, property_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Property".to_string()))?;

    if user.role != UserRole::Admin && property.seller_id != Some(user.id) {
        return Err(AppError::Forbidden(
            "Not authorized to update this property".to_string(),
        ));
    }

    let mut qb = QueryBuilder::new("UPDATE properties SET updated_at = now()");

    if let Some(title) = &update_in.title {
        qb.push(", title = ").push_bind(title.clone());
    }
    if let Some(description) = &update_in.description {
        qb.push(", description = ").push_bind(description.clone());
    }
    if let Some(locality) = &update_in.locality {
        qb.push(", locality = ").push_bind(locality.clone());
    }
    if let Some(city) = &update_in.city {
        qb.push(", city = ").push_bind(city.clone());
    }
    if let Some(state) = &update_in.state {
        qb.push(", state = ").push_bind(state.clone());
    }
    if let Some(price) = update_in.price {
        qb.push(", price = ")
            .push_bind(price.to_string())
            .push("::numeric");
    }
    if let Some(listing_type) = update_in.listing_type {
        qb.push(", listing_type = ").push_bind(listing_type.as_str());
    }
    if let Some(area_sqft) = update_in.area_sqft {
        qb.push(", area_sqft = ")
            .push_bind(area_sqft.to_string())
            .push("::numeric");
    }
    if let Some(bedrooms) = update_in.bedrooms {
        qb.push(", bedrooms = ").push_bind(bedrooms);
    }
    if let Some(bathrooms) = update_in.bathrooms {
        qb.push(", bathrooms = ").push_bind(bathrooms);
    }
    if let Some(floors) = update_in.floors {
        qb.push(", floors = ").push_bind(floors);
    }
    if let Some(parking) = update_in.parking {
        qb.push(", parking = ").push_bind(parking);
    }
    if let Some(plot_number) = &update_in.plot_number {
        qb.push(", plot_number = ").push_bind(plot_number.clone());
    }
    if let Some(facing) = &update_in.facing {
        qb.push(", facing = ").push_bind(facing.clone());
    }
    if let Some(latitude) = update_in.latitude {
        qb.push(", latitude = ").push_bind(latitude);
    }
    if let Some(longitude) = update_in.longitude {
        qb.push(", longitude = ").push_bind(longitude);
    }
    if let Some(google_earth_link) = &update_in.google_earth_link {
        qb.push(", google_earth_link = ")
            .push_bind(google_earth_link.clone());
    }
    if let Some(amenities) = &update_in.amenities {
        qb.push(", amenities = ").push_bind(amenities.clone());
    }
    if let Some(images) = &update_in.images {
        qb.push(", images = ").push_bind(images.clone());
    }
    if let Some(full_name) = &update_in.full_name {
        qb.push(", full_name = ").push_bind(full_name.clone());
    }
    if let Some(email) = &update_in.email {
        qb.push(", email = ").push_bind(email.clone());
    }
    if let Some(phone) = &update_in.phone {
        qb.push(", phone = ").push_bind(phone.clone());
    }

    qb.push(" WHERE id = ").push_bind(property_id);
    qb.push(" RETURNING *");

    let updated = qb
        .build_query_as::<Property>()
        .fetch_one(&database.pool)
        .await?;

    Ok(Json(json!({
        "message": "Property updated successfully",
        "property": PropertyOut::from(updated),
    }))
    .into_response())
}

/// Soft delete, the row stays for the seller's history but drops out of
/// every public listing.
pub async fn delete_property_handler(
    State(database): State<Database>,
    CurrentUser(user): CurrentUser,
    Path(property_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let property = get_property(&database.pool, property_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Property".to_string()))?;

    if user.role != UserRole::Admin && property.seller_id != Some(user.id) {
        return Err(AppError::Forbidden("Not authorized".to_string()));
    }

    sqlx::query("UPDATE properties SET is_active = false WHERE id = $1")
        .bind(property_id)
        .execute(&database.pool)
        .await?;

    Ok(Json(json!({"message": "Property deleted successfully"})).into_response())
}

pub async fn my_properties_handler(
    State(database): State<Database>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<MyPropertiesQuery>,
) -> Result<Response, AppError> {
    let pagination = Pagination::clamped(&query.page, 10);

    let (properties, total) =
        list_my_properties(&database.pool, user.id, &query, pagination).await?;

    Ok(Json(PropertiesResponse {
        properties: properties.into_iter().map(PropertyOut::from).collect(),
        pagination: pagination.page_info(total),
    })
    .into_response())
}

pub async fn pending_properties_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
) -> Result<Response, AppError> {
    let properties = sqlx::query_as::<_, Property>(
        "SELECT * FROM properties WHERE status = 'pending' ORDER BY created_at DESC",
    )
    .fetch_all(&database.pool)
    .await?;

    let properties: Vec<PropertyOut> = properties.into_iter().map(PropertyOut::from).collect();
    Ok(Json(json!({ "properties": properties })).into_response())
}

pub async fn approve_property_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(property_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let property = set_moderation(&database.pool, property_id, ListingStatus::Approved, true)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Property".to_string()))?;

    Ok(Json(json!({
        "message": "Property approved successfully",
        "property": PropertyOut::from(property),
    }))
    .into_response())
}

pub async fn reject_property_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(property_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let property = set_moderation(&database.pool, property_id, ListingStatus::Rejected, false)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Property".to_string()))?;

    Ok(Json(json!({
        "message": "Property rejected successfully",
        "property": PropertyOut::from(property),
    }))
    .into_response())
}
