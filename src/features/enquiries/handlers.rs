use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    features::{
        enquiries::{
            models::{Enquiry, ReceivedEnquiry, SentEnquiry},
            schemas::EnquiryIn,
        },
        properties::{models::Property, repository::get_property},
        users::models::UserRole,
    },
    services::database::Database,
    utilities::{auth::CurrentUser, errors::AppError},
};

pub async fn create_enquiry_handler(
    State(database): State<Database>,
    CurrentUser(user): CurrentUser,
    Json(enquiry_in): Json<EnquiryIn>,
) -> Result<Response, AppError> {
    enquiry_in.validate()?;

    let property: Property = get_property(&database.pool, enquiry_in.property_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Property".to_string()))?;

    let seller_id = property
        .seller_id
        .ok_or_else(|| AppError::ValidationError("Property has no seller".to_string()))?;

    sqlx::query(
        r#"
        INSERT INTO enquiries (property_id, buyer_id, seller_id, message)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(enquiry_in.property_id)
    .bind(user.id)
    .bind(seller_id)
    .bind(&enquiry_in.message)
    .execute(&database.pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Enquiry submitted successfully"})),
    )
        .into_response())
}

pub async fn sent_enquiries_handler(
    State(database): State<Database>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    let enquiries = sqlx::query_as::<_, SentEnquiry>(
        r#"
        SELECT enquiries.*,
               properties.title AS property_title,
               properties.locality,
               properties.city
        FROM enquiries
        JOIN properties ON enquiries.property_id = properties.id
        WHERE enquiries.buyer_id = $1
        ORDER BY enquiries.created_at DESC
        "#,
    )
    .bind(user.id)
    .fetch_all(&database.pool)
    .await?;

    Ok(Json(json!({ "enquiries": enquiries })).into_response())
}

pub async fn received_enquiries_handler(
    State(database): State<Database>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    let enquiries = sqlx::query_as::<_, ReceivedEnquiry>(
        r#"
        SELECT enquiries.*,
               properties.title AS property_title,
               properties.locality,
               properties.city,
               users.full_name AS buyer_name,
               users.email AS buyer_email,
               users.phone AS buyer_phone
        FROM enquiries
        JOIN properties ON enquiries.property_id = properties.id
        JOIN users ON enquiries.buyer_id = users.id
        WHERE enquiries.seller_id = $1
        ORDER BY enquiries.created_at DESC
        "#,
    )
    .bind(user.id)
    .fetch_all(&database.pool)
    .await?;

    Ok(Json(json!({ "enquiries": enquiries })).into_response())
}

pub async fn mark_enquiry_read_handler(
    State(database): State<Database>,
    CurrentUser(user): CurrentUser,
    Path(enquiry_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let enquiry = sqlx::query_as::<_, Enquiry>("SELECT * FROM enquiries WHERE id = $1")
        .bind(enquiry_id)
        .fetch_optional(&database.pool)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Enquiry".to_string()))?;

    if user.role != UserRole::Admin && enquiry.seller_id != Some(user.id) {
        return Err(AppError::Forbidden("Not authorized".to_string()));
    }

    sqlx::query("UPDATE enquiries SET is_read = true WHERE id = $1")
        .bind(enquiry_id)
        .execute(&database.pool)
        .await?;

    Ok(Json(json!({"message": "Enquiry marked as read"})).into_response())
}
