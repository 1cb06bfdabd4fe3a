use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde_json::json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    features::{
        admin::schemas::{
            AdminUserQuery, AdminUserUpdateIn, DashboardStats, InvestorRegistrationAdminOut,
            InvestorRegistrationRow, PropertyStatusIn, StatusQuery, USER_SUMMARY_COLUMNS,
            UserSummary, UsersResponse,
        },
        events::{models::Event, schemas::EventOut},
        investments::{models::InvestmentOpportunity, schemas::OpportunityOut},
        projects::{models::Project, schemas::ProjectOut},
        properties::{models::Property, repository::get_property, schemas::PropertyOut},
        rentals::{models::Rental, schemas::RentalOut},
        schemas::Pagination,
        users::models::UserRole,
    },
    services::database::Database,
    utilities::{auth::AdminUser, errors::AppError},
};

async fn count_where(pool: &PgPool, sql: &str) -> Result<i64, AppError> {
    let count = sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await?;
    Ok(count)
}

pub async fn dashboard_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
) -> Result<Response, AppError> {
    let pool = &database.pool;

    let (
        total_users,
        total_properties,
        total_rentals,
        total_projects,
        total_events,
        total_investments,
        pending_properties,
        pending_rentals,
        unread_enquiries,
        unread_contacts,
    ) = tokio::try_join!(
        count_where(pool, "SELECT COUNT(*) FROM users"),
        count_where(pool, "SELECT COUNT(*) FROM properties WHERE is_active = true"),
        count_where(
            pool,
            "SELECT COUNT(*) FROM rental_properties WHERE is_active = true",
        ),
        count_where(pool, "SELECT COUNT(*) FROM projects WHERE is_active = true"),
        count_where(pool, "SELECT COUNT(*) FROM events WHERE is_active = true"),
        count_where(
            pool,
            "SELECT COUNT(*) FROM investment_opportunities WHERE is_active = true",
        ),
        count_where(pool, "SELECT COUNT(*) FROM properties WHERE status = 'pending'"),
        count_where(
            pool,
            "SELECT COUNT(*) FROM rental_properties WHERE status = 'pending'",
        ),
        count_where(pool, "SELECT COUNT(*) FROM enquiries WHERE is_read = false"),
        count_where(
            pool,
            "SELECT COUNT(*) FROM contact_submissions WHERE is_read = false",
        ),
    )?;

    Ok(Json(json!({
        "stats": DashboardStats {
            total_users,
            total_properties,
            total_rentals,
            total_projects,
            total_events,
            total_investments,
            pending_properties,
            pending_rentals,
            unread_enquiries,
            unread_contacts,
        }
    }))
    .into_response())
}

fn push_user_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &AdminUserQuery) {
    if let Some(role) = &query.role {
        qb.push(" AND role = ").push_bind(role.clone());
    }
    if let Some(is_active) = query.is_active {
        qb.push(" AND is_active = ").push_bind(is_active);
    }
}

pub async fn list_users_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Query(query): Query<AdminUserQuery>,
) -> Result<Response, AppError> {
    let pagination = Pagination::clamped(&query.page, 50);

    let mut page_qb = QueryBuilder::new(format!(
        "SELECT {USER_SUMMARY_COLUMNS} FROM users WHERE 1=1"
    ));
    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM users WHERE 1=1");

    push_user_filters(&mut page_qb, &query);
    push_user_filters(&mut count_qb, &query);

    page_qb.push(" ORDER BY created_at DESC");
    page_qb.push(" LIMIT ").push_bind(pagination.limit);
    page_qb.push(" OFFSET ").push_bind(pagination.offset());

    let total = count_qb
        .build_query_scalar::<i64>()
        .fetch_one(&database.pool)
        .await?;
    let users = page_qb
        .build_query_as::<UserSummary>()
        .fetch_all(&database.pool)
        .await?;

    Ok(Json(UsersResponse {
        users,
        pagination: pagination.page_info(total),
    })
    .into_response())
}

async fn get_user_summary(pool: &PgPool, user_id: Uuid) -> Result<UserSummary, AppError> {
    sqlx::query_as::<_, UserSummary>(&format!(
        "SELECT {USER_SUMMARY_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFoundError("User".to_string()))
}

pub async fn get_user_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let user = get_user_summary(&database.pool, user_id).await?;
    Ok(Json(json!({ "user": user })).into_response())
}

pub async fn toggle_user_status_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let user = get_user_summary(&database.pool, user_id).await?;

    let updated = sqlx::query_as::<_, UserSummary>(&format!(
        "UPDATE users SET is_active = NOT is_active, updated_at = now() \
         WHERE id = $1 RETURNING {USER_SUMMARY_COLUMNS}"
    ))
    .bind(user.id)
    .fetch_one(&database.pool)
    .await?;

    let message = if updated.is_active {
        "User activated"
    } else {
        "User deactivated"
    };

    Ok(Json(json!({ "message": message, "user": updated })).into_response())
}

pub async fn update_user_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(user_id): Path<Uuid>,
    Json(update_in): Json<AdminUserUpdateIn>,
) -> Result<Response, AppError> {
    get_user_summary(&database.pool, user_id).await?;

    let mut qb = QueryBuilder::new("UPDATE users SET updated_at = now()");

    if let Some(role) = update_in.role {
        qb.push(", role = ").push_bind(role.as_str());
    }
    if let Some(is_active) = update_in.is_active {
        qb.push(", is_active = ").push_bind(is_active);
    }
    if let Some(full_name) = &update_in.full_name {
        qb.push(", full_name = ").push_bind(full_name.clone());
    }
    if let Some(phone) = &update_in.phone {
        qb.push(", phone = ").push_bind(phone.clone());
    }

    qb.push(" WHERE id = ").push_bind(user_id);
    qb.push(" RETURNING ").push(USER_SUMMARY_COLUMNS);

    let updated = qb
        .build_query_as::<UserSummary>()
        .fetch_one(&database.pool)
        .await?;

    Ok(Json(json!({
        "message": "User updated successfully",
        "user": updated,
    }))
    .into_response())
}

/// Admin accounts cannot be deactivated this way, everyone else is
/// soft deleted.
pub async fn delete_user_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let user = get_user_summary(&database.pool, user_id).await?;

    if user.role == UserRole::Admin {
        return Err(AppError::Forbidden("Cannot delete admin users".to_string()));
    }

    sqlx::query("UPDATE users SET is_active = false, updated_at = now() WHERE id = $1")
        .bind(user_id)
        .execute(&database.pool)
        .await?;

    Ok(Json(json!({"message": "User deactivated successfully"})).into_response())
}

fn push_status_filter(qb: &mut QueryBuilder<'_, Postgres>, query: &StatusQuery) {
    if let Some(status) = query.status {
        qb.push(" AND status = ").push_bind(status.as_str());
    }
}

pub async fn list_all_properties_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Query(query): Query<StatusQuery>,
) -> Result<Response, AppError> {
    let pagination = Pagination::clamped(&query.page, 50);

    let mut page_qb = QueryBuilder::new("SELECT * FROM properties WHERE 1=1");
    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM properties WHERE 1=1");

    push_status_filter(&mut page_qb, &query);
    push_status_filter(&mut count_qb, &query);

    page_qb.push(" ORDER BY created_at DESC");
    page_qb.push(" LIMIT ").push_bind(pagination.limit);
    page_qb.push(" OFFSET ").push_bind(pagination.offset());

    let total = count_qb
        .build_query_scalar::<i64>()
        .fetch_one(&database.pool)
        .await?;
    let properties = page_qb
        .build_query_as::<Property>()
        .fetch_all(&database.pool)
        .await?;

    let properties: Vec<PropertyOut> = properties.into_iter().map(PropertyOut::from).collect();
    Ok(Json(json!({
        "properties": properties,
        "pagination": pagination.page_info(total),
    }))
    .into_response())
}

/// Unlike the public lookup this does not bump the view counter.
pub async fn get_property_admin_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(property_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let property = get_property(&database.pool, property_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Property".to_string()))?;

    Ok(Json(json!({ "property": PropertyOut::from(property) })).into_response())
}

pub async fn update_property_status_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(property_id): Path<Uuid>,
    Json(status_in): Json<PropertyStatusIn>,
) -> Result<Response, AppError> {
    get_property(&database.pool, property_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Property".to_string()))?;

    let mut qb = QueryBuilder::new("UPDATE properties SET updated_at = now()");

    if let Some(status) = status_in.status {
        qb.push(", status = ").push_bind(status.as_str());
    }
    if let Some(is_active) = status_in.is_active {
        qb.push(", is_active = ").push_bind(is_active);
    }

    qb.push(" WHERE id = ").push_bind(property_id);
    qb.push(" RETURNING *");

    let updated = qb
        .build_query_as::<Property>()
        .fetch_one(&database.pool)
        .await?;

    Ok(Json(json!({
        "message": "Property status updated successfully",
        "property": PropertyOut::from(updated),
    }))
    .into_response())
}

/// Hard delete, the row and its images go away for good.
pub async fn delete_property_admin_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(property_id): Path<Uuid>,
) -> Result<Response, AppError> {
    get_property(&database.pool, property_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Property".to_string()))?;

    sqlx::query("DELETE FROM properties WHERE id = $1")
        .bind(property_id)
        .execute(&database.pool)
        .await?;

    Ok(Json(json!({"message": "Property deleted successfully"})).into_response())
}

pub async fn list_all_rentals_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Query(query): Query<StatusQuery>,
) -> Result<Response, AppError> {
    let pagination = Pagination::clamped(&query.page, 50);

    let mut page_qb = QueryBuilder::new("SELECT * FROM rental_properties WHERE 1=1");
    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM rental_properties WHERE 1=1");

    push_status_filter(&mut page_qb, &query);
    push_status_filter(&mut count_qb, &query);

    page_qb.push(" ORDER BY created_at DESC");
    page_qb.push(" LIMIT ").push_bind(pagination.limit);
    page_qb.push(" OFFSET ").push_bind(pagination.offset());

    let total = count_qb
        .build_query_scalar::<i64>()
        .fetch_one(&database.pool)
        .await?;
    let rentals = page_qb
        .build_query_as::<Rental>()
        .fetch_all(&database.pool)
        .await?;

    let rentals: Vec<RentalOut> = rentals.into_iter().map(RentalOut::from).collect();
    Ok(Json(json!({
        "rentals": rentals,
        "pagination": pagination.page_info(total),
    }))
    .into_response())
}

pub async fn list_all_projects_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
) -> Result<Response, AppError> {
    let projects =
        sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY created_at DESC")
            .fetch_all(&database.pool)
            .await?;

    let projects: Vec<ProjectOut> = projects.into_iter().map(ProjectOut::from).collect();
    Ok(Json(json!({ "projects": projects })).into_response())
}

pub async fn list_all_events_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
) -> Result<Response, AppError> {
    let events = sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY event_date DESC")
        .fetch_all(&database.pool)
        .await?;

    let events: Vec<EventOut> = events.into_iter().map(EventOut::from).collect();
    Ok(Json(json!({ "events": events })).into_response())
}

pub async fn list_all_investments_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
) -> Result<Response, AppError> {
    let opportunities = sqlx::query_as::<_, InvestmentOpportunity>(
        "SELECT * FROM investment_opportunities ORDER BY created_at DESC",
    )
    .fetch_all(&database.pool)
    .await?;

    let opportunities: Vec<OpportunityOut> =
        opportunities.into_iter().map(OpportunityOut::from).collect();
    Ok(Json(json!({ "opportunities": opportunities })).into_response())
}

pub async fn list_investor_registrations_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
) -> Result<Response, AppError> {
    let registrations = sqlx::query_as::<_, InvestorRegistrationRow>(
        r#"
        SELECT investor_registrations.*,
               investment_opportunities.title AS opportunity_title
        FROM investor_registrations
        LEFT JOIN investment_opportunities
            ON investor_registrations.opportunity_id = investment_opportunities.id
        ORDER BY investor_registrations.created_at DESC
        "#,
    )
    .fetch_all(&database.pool)
    .await?;

    let registrations: Vec<InvestorRegistrationAdminOut> = registrations
        .into_iter()
        .map(InvestorRegistrationAdminOut::from)
        .collect();
    Ok(Json(json!({ "registrations": registrations })).into_response())
}
