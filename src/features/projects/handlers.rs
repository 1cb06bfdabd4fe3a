use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bigdecimal::{BigDecimal, FromPrimitive};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use sqlx::QueryBuilder;
use uuid::Uuid;
use validator::Validate;

use crate::{
    features::{
        projects::{
            models::Project,
            repository::{ProjectFilters, list_projects},
            schemas::{ProjectIn, ProjectOut, ProjectQuery, ProjectsResponse},
        },
        schemas::{Pagination, deserialize_f64_from_json, deserialize_i32_from_json},
    },
    services::database::Database,
    utilities::{auth::AdminUser, errors::AppError},
};

pub async fn list_projects_handler(
    State(database): State<Database>,
    Query(query): Query<ProjectQuery>,
) -> Result<Response, AppError> {
    let pagination = Pagination::clamped(&query.page, 20);
    let filters = ProjectFilters::from_query(&query);

    let (projects, total) = list_projects(&database.pool, &filters, pagination).await?;

    Ok(Json(ProjectsResponse {
        projects: projects.into_iter().map(ProjectOut::from).collect(),
        pagination: pagination.page_info(total),
    })
    .into_response())
}

pub async fn get_project_handler(
    State(database): State<Database>,
    Path(project_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
        .bind(project_id)
        .fetch_optional(&database.pool)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Project".to_string()))?;

    Ok(Json(json!({ "project": ProjectOut::from(project) })).into_response())
}

pub async fn create_project_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Json(project_in): Json<ProjectIn>,
) -> Result<Response, AppError> {
    project_in.validate()?;

    let amenities = project_in.amenities.unwrap_or_default();
    let highlights = project_in.highlights.unwrap_or_default();
    let images = project_in.images.unwrap_or_default();
    let gallery = project_in.gallery.unwrap_or_default();
    let videos = project_in.videos.unwrap_or_default();

    let project = sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (
            name, description, location, city, state, status,
            total_units, available_units, price_range_min, price_range_max,
            amenities, highlights, images, gallery, videos, brochure_url,
            latitude, longitude, completion_date, possession_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
            $14, $15, $16, $17, $18, $19, $20)
        RETURNING *
        "#,
    )
    .bind(&project_in.name)
    .bind(&project_in.description)
    .bind(&project_in.location)
    .bind(&project_in.city)
    .bind(&project_in.state)
    .bind(&project_in.status)
    .bind(project_in.total_units)
    .bind(project_in.available_units)
    .bind(project_in.price_range_min.and_then(BigDecimal::from_f64))
    .bind(project_in.price_range_max.and_then(BigDecimal::from_f64))
    .bind(&amenities)
    .bind(&highlights)
    .bind(&images)
    .bind(&gallery)
    .bind(&videos)
    .bind(&project_in.brochure_url)
    .bind(project_in.latitude)
    .bind(project_in.longitude)
    .bind(project_in.completion_date)
    .bind(project_in.possession_date)
    .fetch_one(&database.pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Project created successfully",
            "project": ProjectOut::from(project),
        })),
    )
        .into_response())
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct ProjectUpdateIn {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub status: Option<String>,
    #[serde(deserialize_with = "deserialize_i32_from_json")]
    pub total_units: Option<i32>,
    #[serde(deserialize_with = "deserialize_i32_from_json")]
    pub available_units: Option<i32>,
    #[serde(deserialize_with = "deserialize_f64_from_json")]
    pub price_range_min: Option<f64>,
    #[serde(deserialize_with = "deserialize_f64_from_json")]
    pub price_range_max: Option<f64>,
    pub amenities: Option<Vec<String>>,
    pub highlights: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub gallery: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub brochure_url: Option<String>,
    #[serde(deserialize_with = "deserialize_f64_from_json")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "deserialize_f64_from_json")]
    pub longitude: Option<f64>,
    pub completion_date: Option<DateTime<Utc>>,
    pub possession_date: Option<DateTime<Utc>>,
}

pub async fn update_project_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(project_id): Path<Uuid>,
    Json(update_in): Json<ProjectUpdateIn>,
) -> Result<Response, AppError> {
    let mut qb = QueryBuilder::new("UPDATE projects SET updated_at = now()");

    if let Some(name) = &update_in.name {
        qb.push(", name = ").push_bind(name.clone());
    }
    if let Some(description) = &update_in.description {
        qb.push(", description = ").push_bind(description.clone());
    }
    if let Some(location) = &update_in.location {
        qb.push(", location = ").push_bind(location.clone());
    }
    if let Some(city) = &update_in.city {
        qb.push(", city = ").push_bind(city.clone());
    }
    if let Some(state) = &update_in.state {
        qb.push(", state = ").push_bind(state.clone());
    }
    if let Some(status) = &update_in.status {
        qb.push(", status = ").push_bind(status.clone());
    }
    if let Some(total_units) = update_in.total_units {
        qb.push(", total_units = ").push_bind(total_units);
    }
    if let Some(available_units) = update_in.available_units {
        qb.push(", available_units = ").push_bind(available_units);
    }
    if let Some(price_range_min) = update_in.price_range_min {
        qb.push(", price_range_min = ")
            .push_bind(price_range_min.to_string())
            .push("::numeric");
    }
    if let Some(price_range_max) = update_in.price_range_max {
        qb.push(", price_range_max = ")
            .push_bind(price_range_max.to_string())
            .push("::numeric");
    }
    if let Some(amenities) = &update_in.amenities {
        qb.push(", amenities = ").push_bind(amenities.clone());
    }
    if let Some(highlights) = &update_in.highlights {
        qb.push(", highlights = ").push_bind(highlights.clone());
    }
    if let Some(images) = &update_in.images {
        qb.push(", images = ").push_bind(images.clone());
    }
    if let Some(gallery) = &update_in.gallery {
        qb.push(", gallery = ").push_bind(gallery.clone());
    }
    if let Some(videos) = &update_in.videos {
        qb.push(", videos = ").push_bind(videos.clone());
    }
    if let Some(brochure_url) = &update_in.brochure_url {
        qb.push(", brochure_url = ").push_bind(brochure_url.clone());
    }
    if let Some(latitude) = update_in.latitude {
        qb.push(", latitude = ").push_bind(latitude);
    }
    if let Some(longitude) = update_in.longitude {
        qb.push(", longitude = ").push_bind(longitude);
    }
    if let Some(completion_date) = update_in.completion_date {
        qb.push(", completion_date = ").push_bind(completion_date);
    }
    if let Some(possession_date) = update_in.possession_date {
        qb.push(", possession_date = ").push_bind(possession_date);
    }

    qb.push(" WHERE id = ").push_bind(project_id);
    qb.push(" RETURNING *");

    let updated = qb
        .build_query_as::<Project>()
        .fetch_optional(&database.pool)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Project".to_string()))?;

    Ok(Json(json!({
        "message": "Project updated successfully",
        "project": ProjectOut::from(updated),
    }))
    .into_response())
}

pub async fn delete_project_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(project_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let deleted = sqlx::query("UPDATE projects SET is_active = false WHERE id = $1")
        .bind(project_id)
        .execute(&database.pool)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFoundError("Project".to_string()));
    }

    Ok(Json(json!({"message": "Project deleted successfully"})).into_response())
}
