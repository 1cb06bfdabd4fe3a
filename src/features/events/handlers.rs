use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use sqlx::QueryBuilder;
use uuid::Uuid;
use validator::Validate;

use crate::{
    features::{
        events::{
            models::Event,
            repository::{EventFilters, claim_event_seat, get_event, list_events, sweep_event_status},
            schemas::{
                EventIn, EventOut, EventQuery, EventRegistrationIn, EventsResponse,
                deserialize_media_list, fold_event_time,
            },
        },
        schemas::{Pagination, deserialize_f64_from_json, deserialize_i32_from_json},
    },
    services::database::Database,
    utilities::{auth::AdminUser, errors::AppError},
};

pub async fn list_events_handler(
    State(database): State<Database>,
    Query(query): Query<EventQuery>,
) -> Result<Response, AppError> {
    // A stale is_past flag must not leak into the listing.
    if let Err(error) = sweep_event_status(&database.pool).await {
        tracing::error!("Event status sweep failed: {error}");
    }

    let pagination = Pagination::clamped(&query.page, 20);
    let filters = EventFilters::from_query(&query);

    let (events, total) = list_events(&database.pool, &filters, pagination).await?;

    Ok(Json(EventsResponse {
        events: events.into_iter().map(EventOut::from).collect(),
        pagination: pagination.page_info(total),
    })
    .into_response())
}

pub async fn get_event_handler(
    State(database): State<Database>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let event = get_event(&database.pool, event_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Event".to_string()))?;

    Ok(Json(json!({ "event": EventOut::from(event) })).into_response())
}

pub async fn create_event_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Json(event_in): Json<EventIn>,
) -> Result<Response, AppError> {
    event_in.validate()?;

    let event_date = fold_event_time(event_in.event_date, event_in.event_time.as_deref());
    let is_past = event_date < Utc::now();

    let images = event_in.images.unwrap_or_default();
    let videos = event_in.videos.unwrap_or_default();

    let event = sqlx::query_as::<_, Event>(
        r#"
        INSERT INTO events (
            title, event_type, related_project_id, description, location,
            city, event_date, event_time, agenda, contact_person,
            contact_email, contact_phone, rsvp_info, map_location,
            latitude, longitude, banner_image, registration_link,
            max_attendees, images, videos, is_past)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
            $14, $15, $16, $17, $18, $19, $20, $21, $22)
        RETURNING *
        "#,
    )
    .bind(&event_in.title)
    .bind(&event_in.event_type)
    .bind(event_in.related_project_id)
    .bind(&event_in.description)
    .bind(&event_in.location)
    .bind(&event_in.city)
    .bind(event_date)
    .bind(&event_in.event_time)
    .bind(&event_in.agenda)
    .bind(&event_in.contact_person)
    .bind(&event_in.contact_email)
    .bind(&event_in.contact_phone)
    .bind(&event_in.rsvp_info)
    .bind(&event_in.map_location)
    .bind(event_in.latitude)
    .bind(event_in.longitude)
    .bind(&event_in.banner_image)
    .bind(&event_in.registration_link)
    .bind(event_in.max_attendees)
    .bind(&images)
    .bind(&videos)
    .bind(is_past)
    .fetch_one(&database.pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Event created successfully",
            "event": EventOut::from(event),
        })),
    )
        .into_response())
}

pub async fn register_for_event_handler(
    State(database): State<Database>,
    Path(event_id): Path<Uuid>,
    Json(registration_in): Json<EventRegistrationIn>,
) -> Result<Response, AppError> {
    registration_in.validate()?;

    get_event(&database.pool, event_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Event".to_string()))?;

    let mut tx = database.pool.begin().await?;

    if !claim_event_seat(&mut tx, event_id).await? {
        return Err(AppError::ValidationError("Event is full".to_string()));
    }

    sqlx::query(
        r#"
        INSERT INTO event_registrations (event_id, full_name, email, phone)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(event_id)
    .bind(&registration_in.full_name)
    .bind(&registration_in.email)
    .bind(&registration_in.phone)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Successfully registered for event"})),
    )
        .into_response())
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct EventUpdateIn {
    pub title: Option<String>,
    pub event_type: Option<String>,
    pub related_project_id: Option<Uuid>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub event_time: Option<String>,
    pub agenda: Option<String>,
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub rsvp_info: Option<String>,
    pub map_location: Option<String>,
    #[serde(deserialize_with = "deserialize_f64_from_json")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "deserialize_f64_from_json")]
    pub longitude: Option<f64>,
    pub banner_image: Option<String>,
    pub registration_link: Option<String>,
    #[serde(deserialize_with = "deserialize_i32_from_json")]
    pub max_attendees: Option<i32>,
    #[serde(deserialize_with = "deserialize_media_list")]
    pub images: Option<Vec<String>>,
    #[serde(deserialize_with = "deserialize_media_list")]
    pub videos: Option<Vec<String>>,
}

pub async fn update_event_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(event_id): Path<Uuid>,
    Json(update_in): Json<EventUpdateIn>,
) -> Result<Response, AppError> {
    let event = get_event(&database.pool, event_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Event".to_string()))?;

    let mut qb = QueryBuilder::new("UPDATE events SET updated_at = now()");

    if let Some(title) = &update_in.title {
        qb.push(", title = ").push_bind(title.clone());
    }
    if let Some(event_type) = &update_in.event_type {
        qb.push(", event_type = ").push_bind(event_type.clone());
    }
    if let Some(related_project_id) = update_in.related_project_id {
        qb.push(", related_project_id = ").push_bind(related_project_id);
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
    if let Some(event_date) = update_in.event_date {
        // Moving the date re-folds the wall-clock time and recomputes
        // whether the event already happened.
        let time = update_in
            .event_time
            .as_deref()
            .or(event.event_time.as_deref());
        let event_date = fold_event_time(event_date, time);
        qb.push(", event_date = ").push_bind(event_date);
        qb.push(", is_past = ").push_bind(event_date < Utc::now());
    }
    if let Some(event_time) = &update_in.event_time {
        qb.push(", event_time = ").push_bind(event_time.clone());
    }
    if let Some(agenda) = &update_in.agenda {
        qb.push(", agenda = ").push_bind(agenda.clone());
    }
    if let Some(contact_person) = &update_in.contact_person {
        qb.push(", contact_person = ").push_bind(contact_person.clone());
    }
    if let Some(contact_email) = &update_in.contact_email {
        qb.push(", contact_email = ").push_bind(contact_email.clone());
    }
    if let Some(contact_phone) = &update_in.contact_phone {
        qb.push(", contact_phone = ").push_bind(contact_phone.clone());
    }
    if let Some(rsvp_info) = &update_in.rsvp_info {
        qb.push(", rsvp_info = ").push_bind(rsvp_info.clone());
    }
    if let Some(map_location) = &update_in.map_location {
        qb.push(", map_location = ").push_bind(map_location.clone());
    }
    if let Some(latitude) = update_in.latitude {
        qb.push(", latitude = ").push_bind(latitude);
    }
    if let Some(longitude) = update_in.longitude {
        qb.push(", longitude = ").push_bind(longitude);
    }
    if let Some(banner_image) = &update_in.banner_image {
        qb.push(", banner_image = ").push_bind(banner_image.clone());
    }
    if let Some(registration_link) = &update_in.registration_link {
        qb.push(", registration_link = ")
            .push_bind(registration_link.clone());
    }
    if let Some(max_attendees) = update_in.max_attendees {
        qb.push(", max_attendees = ").push_bind(max_attendees);
    }
    if let Some(images) = &update_in.images {
        qb.push(", images = ").push_bind(images.clone());
    }
    if let Some(videos) = &update_in.videos {
        qb.push(", videos = ").push_bind(videos.clone());
    }

    qb.push(" WHERE id = ").push_bind(event_id);
    qb.push(" RETURNING *");

    let updated = qb
        .build_query_as::<Event>()
        .fetch_one(&database.pool)
        .await?;

    Ok(Json(json!({
        "message": "Event updated successfully",
        "event": EventOut::from(updated),
    }))
    .into_response())
}

pub async fn delete_event_handler(
    State(database): State<Database>,
    AdminUser(_): AdminUser,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let deleted = sqlx::query("UPDATE events SET is_active = false WHERE id = $1")
        .bind(event_id)
        .execute(&database.pool)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFoundError("Event".to_string()));
    }

    Ok(Json(json!({"message": "Event deleted successfully"})).into_response())
}
