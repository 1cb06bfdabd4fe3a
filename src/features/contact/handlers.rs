use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;
use validator::Validate;

use crate::{
    features::{
        contact::{
            models::ContactSubmission,
            schemas::{ContactIn, SubmissionQuery, SubmissionsResponse},
        },
        schemas::Pagination,
    },
    services::database::Database,
    utilities::{auth::AdminUser, errors::AppError},
};

pub async fn submit_contact_handler(
    State(database): State<Database>,
    Json(contact_in): Json<ContactIn>,
) -> Result<Response, AppError> {
    contact_in.validate()?;

    sqlx::query(
        r#"
        INSERT INTO contact_submissions (full_name, email, phone, subject, message)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(&contact_in.full_name)
    .bind(&contact_in.email)
    .bind(&contact_in.phone)
    .bind(&contact_in.subject)
    .bind(&contact_in.message)
    .execute(&database.pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Contact form submitted successfully"})),
    )
        .into_response())
}

fn push_read_filter(qb: &mut QueryBuilder<'_, Postgres>, is_read: Option<bool>) {
    if let Some(is_read) = is_read {
        qb.push(" AND is_read = ").push_bind(is_read);
    }
}

pub async fn list_submissions_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Query(query): Query<SubmissionQuery>,
) -> Result<Response, AppError> {
    let pagination = Pagination::clamped(&query.page, 50);

    let mut page_qb = QueryBuilder::new("SELECT * FROM contact_submissions WHERE 1=1");
    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM contact_submissions WHERE 1=1");

    push_read_filter(&mut page_qb, query.is_read);
    push_read_filter(&mut count_qb, query.is_read);

    page_qb.push(" ORDER BY created_at DESC");
    page_qb.push(" LIMIT ").push_bind(pagination.limit);
    page_qb.push(" OFFSET ").push_bind(pagination.offset());

    let total = count_qb
        .build_query_scalar::<i64>()
        .fetch_one(&database.pool)
        .await?;
    let submissions = page_qb
        .build_query_as::<ContactSubmission>()
        .fetch_all(&database.pool)
        .await?;

    Ok(Json(SubmissionsResponse {
        submissions,
        pagination: pagination.page_info(total),
    })
    .into_response())
}

pub async fn get_submission_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(submission_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let submission =
        sqlx::query_as::<_, ContactSubmission>("SELECT * FROM contact_submissions WHERE id = $1")
            .bind(submission_id)
            .fetch_optional(&database.pool)
            .await?
            .ok_or_else(|| AppError::NotFoundError("Submission".to_string()))?;

    Ok(Json(json!({ "submission": submission })).into_response())
}

pub async fn mark_submission_read_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(submission_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let updated = sqlx::query("UPDATE contact_submissions SET is_read = true WHERE id = $1")
        .bind(submission_id)
        .execute(&database.pool)
        .await?;

    if updated.rows_affected() == 0 {
        return Err(AppError::NotFoundError("Submission".to_string()));
    }

    Ok(Json(json!({"message": "Submission marked as read"})).into_response())
}

pub async fn mark_submission_responded_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(submission_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let updated = sqlx::query(
        "UPDATE contact_submissions SET is_responded = true, is_read = true WHERE id = $1",
    )
    .bind(submission_id)
    .execute(&database.pool)
    .await?;

    if updated.rows_affected() == 0 {
        return Err(AppError::NotFoundError("Submission".to_string()));
    }

    Ok(Json(json!({"message": "Submission marked as responded"})).into_response())
}

/// Hard delete, a contact submission carries no history worth keeping.
pub async fn delete_submission_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(submission_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let deleted = sqlx::query("DELETE FROM contact_submissions WHERE id = $1")
        .bind(submission_id)
        .execute(&database.pool)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFoundError("Submission".to_string()));
    }

    Ok(Json(json!({"message": "Submission deleted successfully"})).into_response())
}
