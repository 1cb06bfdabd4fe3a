use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(FromRow, Clone, Debug)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub event_type: String,
    pub related_project_id: Option<Uuid>,
    pub description: Option<String>,
    pub location: String,
    pub city: String,
    pub event_date: DateTime<Utc>,
    pub event_time: Option<String>,
    pub agenda: Option<String>,
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub rsvp_info: Option<String>,
    pub map_location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub banner_image: Option<String>,
    pub is_past: bool,
    pub registration_link: Option<String>,
    pub max_attendees: Option<i32>,
    pub images: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub registered_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
