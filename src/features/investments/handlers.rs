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
        investments::{
            models::InvestmentOpportunity,
            repository::{OpportunityFilters, investment_statistics, list_opportunities},
            schemas::{
                InvestorRegistrationIn, OpportunitiesResponse, OpportunityIn, OpportunityOut,
                OpportunityQuery,
            },
        },
        schemas::Pagination,
    },
    services::database::Database,
    utilities::{
        auth::{AdminUser, OptionalUser},
        errors::AppError,
    },
};

pub async fn list_opportunities_handler(
    State(database): State<Database>,
    Query(query): Query<OpportunityQuery>,
) -> Result<Response, AppError> {
    let pagination = Pagination::clamped(&query.page, 20);
    let filters = OpportunityFilters::from_query(&query);

    let (opportunities, total) = list_opportunities(&database.pool, &filters, pagination).await?;

    Ok(Json(OpportunitiesResponse {
        opportunities: opportunities.into_iter().map(OpportunityOut::from).collect(),
        pagination: pagination.page_info(total),
    })
    .into_response())
}

pub async fn investment_statistics_handler(
    State(database): State<Database>,
) -> Result<Response, AppError> {
    let statistics = investment_statistics(&database.pool).await?;
    Ok(Json(statistics).into_response())
}

pub async fn get_opportunity_handler(
    State(database): State<Database>,
    Path(opportunity_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let opportunity = sqlx::query_as::<_, InvestmentOpportunity>(
        "SELECT * FROM investment_opportunities WHERE id = $1",
    )
    .bind(opportunity_id)
    .fetch_optional(&database.pool)
    .await?
    .ok_or_else(|| AppError::NotFoundError("Investment opportunity".to_string()))?;

    Ok(Json(json!({ "opportunity": OpportunityOut::from(opportunity) })).into_response())
}

pub async fn create_opportunity_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Json(opportunity_in): Json<OpportunityIn>,
) -> Result<Response, AppError> {
    opportunity_in.validate()?;

    let min_investment = opportunity_in
        .min_investment
        .filter(|v| *v > 0.0)
        .ok_or_else(|| {
            AppError::ValidationError(
                "Invalid minimum investment. Please enter a valid positive number.".to_string(),
            )
        })?;

    let highlights = opportunity_in.highlights.unwrap_or_default();
    let images = opportunity_in.images.unwrap_or_default();
    let documents = opportunity_in.documents.unwrap_or_default();

    let opportunity = sqlx::query_as::<_, InvestmentOpportunity>(
        r#"
        INSERT INTO investment_opportunities (
            title, description, location, city, state, investment_type,
            min_investment, expected_roi, investment_period, highlights,
            risk_level, images, documents)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(&opportunity_in.title)
    .bind(&opportunity_in.description)
    .bind(&opportunity_in.location)
    .bind(&opportunity_in.city)
    .bind(&opportunity_in.state)
    .bind(&opportunity_in.investment_type)
    .bind(BigDecimal::from_f64(min_investment).unwrap_or_default())
    .bind(opportunity_in.expected_roi.and_then(BigDecimal::from_f64))
    .bind(&opportunity_in.investment_period)
    .bind(&highlights)
    .bind(&opportunity_in.risk_level)
    .bind(&images)
    .bind(&documents)
    .fetch_one(&database.pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Investment opportunity created successfully",
            "opportunity": OpportunityOut::from(opportunity),
        })),
    )
        .into_response())
}

pub async fn register_investor_handler(
    State(database): State<Database>,
    OptionalUser(user): OptionalUser,
    Json(registration_in): Json<InvestorRegistrationIn>,
) -> Result<Response, AppError> {
    registration_in.validate()?;

    let mut tx = database.pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO investor_registrations (
            opportunity_id, user_id, full_name, email, phone,
            investment_budget, preferred_investment_type, message)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(registration_in.opportunity_id)
    .bind(user.map(|u| u.id))
    .bind(&registration_in.full_name)
    .bind(&registration_in.email)
    .bind(&registration_in.phone)
    .bind(
        registration_in
            .investment_budget
            .and_then(BigDecimal::from_f64),
    )
    .bind(&registration_in.preferred_investment_type)
    .bind(&registration_in.message)
    .execute(&mut *tx)
    .await?;

    if let Some(opportunity_id) = registration_in.opportunity_id {
        sqlx::query(
            "UPDATE investment_opportunities SET investors_count = investors_count + 1 WHERE id = $1",
        )
        .bind(opportunity_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Investor registration submitted successfully"})),
    )
        .into_response())
}

pub async fn delete_opportunity_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(opportunity_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let deleted = sqlx::query("UPDATE investment_opportunities SET is_active = false WHERE id = $1")
        .bind(opportunity_id)
        .execute(&database.pool)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFoundError(
            "Investment opportunity".to_string(),
        ));
    }

    Ok(Json(json!({"message": "Investment opportunity deleted successfully"})).into_response())
}

pub async fn mark_investor_contacted_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(registration_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let updated = sqlx::query("UPDATE investor_registrations SET is_contacted = true WHERE id = $1")
        .bind(registration_id)
        .execute(&database.pool)
        .await?;

    if updated.rows_affected() == 0 {
        return Err(AppError::NotFoundError("Investor registration".to_string()));
    }

    Ok(Json(json!({"message": "Investor marked as contacted"})).into_response())
}
