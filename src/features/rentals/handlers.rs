use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bigdecimal::{BigDecimal, FromPrimitive};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    features::{
        properties::models::ListingStatus,
        rentals::{
            models::{Rental, RentType, TenantType},
            repository::{RentalFilters, list_rentals, set_rental_moderation},
            schemas::{RentalIn, RentalOut, RentalQuery, RentalsResponse},
        },
        schemas::Pagination,
        users::models::UserRole,
    },
    services::database::Database,
    utilities::{
        auth::{AdminUser, OptionalUser},
        errors::AppError,
    },
};

pub async fn list_rentals_handler(
    State(database): State<Database>,
    OptionalUser(user): OptionalUser,
    Query(query): Query<RentalQuery>,
) -> Result<Response, AppError> {
    let is_admin = user.is_some_and(|u| u.role == UserRole::Admin);
    let pagination = Pagination::clamped(&query.page, 20);
    let filters = RentalFilters::from_query(&query, is_admin);

    let (rentals, total) = list_rentals(&database.pool, &filters, pagination).await?;

    Ok(Json(RentalsResponse {
        rentals: rentals.into_iter().map(RentalOut::from).collect(),
        pagination: pagination.page_info(total),
    })
    .into_response())
}

pub async fn get_rental_handler(
    State(database): State<Database>,
    Path(rental_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let rental = sqlx::query_as::<_, Rental>("SELECT * FROM rental_properties WHERE id = $1")
        .bind(rental_id)
        .fetch_optional(&database.pool)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Rental property".to_string()))?;

    Ok(Json(json!({ "rental": RentalOut::from(rental) })).into_response())
}

pub async fn create_rental_handler(
    State(database): State<Database>,
    OptionalUser(user): OptionalUser,
    Json(rental_in): Json<RentalIn>,
) -> Result<Response, AppError> {
    rental_in.validate()?;

    let monthly_rent = rental_in
        .monthly_rent
        .filter(|v| *v > 0.0)
        .ok_or_else(|| {
            AppError::ValidationError(
                "Invalid monthly rent. Please enter a valid positive number.".to_string(),
            )
        })?;
    let area_sqft = rental_in.area_sqft.filter(|v| *v > 0.0).ok_or_else(|| {
        AppError::ValidationError(
            "Invalid area. Please enter a valid positive number.".to_string(),
        )
    })?;

    let owner_id = user.map(|u| u.id);
    let amenities = rental_in.amenities.unwrap_or_default();
    let images = rental_in.images.unwrap_or_default();
    let rent_type = rental_in.rent_type.unwrap_or(RentType::Unfurnished);
    let tenant_type = rental_in.tenant_type.unwrap_or(TenantType::Any);

    let rental = sqlx::query_as::<_, Rental>(
        r#"
        INSERT INTO rental_properties (
            owner_id, title, description, locality, city, state,
            monthly_rent, security_deposit, property_type, area_sqft,
            bedrooms, bathrooms, rent_type, tenant_type, available_from,
            amenities, images, latitude, longitude, full_name, email, phone)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
            $14, $15, $16, $17, $18, $19, $20, $21, $22)
        RETURNING *
        "#,
    )
    .bind(owner_id)
    .bind(&rental_in.title)
    .bind(&rental_in.description)
    .bind(&rental_in.locality)
    .bind(&rental_in.city)
    .bind(&rental_in.state)
    .bind(BigDecimal::from_f64(monthly_rent).unwrap_or_default())
    .bind(rental_in.security_deposit.and_then(BigDecimal::from_f64))
    .bind(&rental_in.property_type)
    .bind(BigDecimal::from_f64(area_sqft).unwrap_or_default())
    .bind(rental_in.bedrooms.filter(|v| *v >= 0))
    .bind(rental_in.bathrooms.filter(|v| *v >= 0))
    .bind(rent_type.as_str())
    .bind(tenant_type.as_str())
    .bind(rental_in.available_from)
    .bind(&amenities)
    .bind(&images)
    .bind(rental_in.latitude)
    .bind(rental_in.longitude)
    .bind(&rental_in.full_name)
    .bind(&rental_in.email)
    .bind(&rental_in.phone)
    .fetch_one(&database.pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Rental property created successfully",
            "rental": RentalOut::from(rental),
        })),
    )
        .into_response())
}

pub async fn pending_rentals_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
) -> Result<Response, AppError> {
    let rentals = sqlx::query_as::<_, Rental>(
        "SELECT * FROM rental_properties WHERE status = 'pending' ORDER BY created_at DESC",
    )
    .fetch_all(&database.pool)
    .await?;

    let rentals: Vec<RentalOut> = rentals.into_iter().map(RentalOut::from).collect();
    Ok(Json(json!({ "rentals": rentals })).into_response())
}

pub async fn approve_rental_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(rental_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let rental = set_rental_moderation(&database.pool, rental_id, ListingStatus::Approved)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Rental property".to_string()))?;
    Ok(Json(json!({
        "message": "Rental property approved",
        "rental": RentalOut::from(rental),
    }))
    .into_response())
}

pub async fn reject_rental_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(rental_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let rental = set_rental_moderation(&database.pool, rental_id, ListingStatus::Rejected)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Rental property".to_string()))?;
    Ok(Json(json!({
        "message": "Rental property rejected",
        "rental": RentalOut::from(rental),
    }))
    .into_response())
}
