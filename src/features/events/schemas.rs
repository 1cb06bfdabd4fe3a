use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::features::events::models::Event;
use crate::features::schemas::{
    PageInfo, PageQuery, deserialize_bool_from_any, deserialize_f64_from_json,
    deserialize_i32_from_json,
};

/// Folds an optional "HH:MM" wall-clock string into the event date.
/// Unparseable components fall back to zero, a fully invalid time
/// leaves the date untouched.
pub fn fold_event_time(date: DateTime<Utc>, time: Option<&str>) -> DateTime<Utc> {
    let Some(time) = time else {
        return date;
    };
    let mut parts = time.split(':');
    let hours: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let minutes: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);

    date.with_hour(hours)
        .and_then(|d| d.with_minute(minutes))
        .and_then(|d| d.with_second(0))
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(date)
}

/// Accepts either a JSON array of strings or a single string.
pub fn deserialize_media_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        Some(Value::String(s)) => Some(vec![s]),
        _ => None,
    })
}

#[derive(Deserialize, Validate, Debug)]
pub struct EventIn {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Event type is required"))]
    pub event_type: String,
    pub related_project_id: Option<Uuid>,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    pub event_date: DateTime<Utc>,
    pub event_time: Option<String>,
    pub agenda: Option<String>,
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub rsvp_info: Option<String>,
    pub map_location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub longitude: Option<f64>,
    pub banner_image: Option<String>,
    pub registration_link: Option<String>,
    #[serde(default, deserialize_with = "deserialize_i32_from_json")]
    pub max_attendees: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_media_list")]
    pub images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_media_list")]
    pub videos: Option<Vec<String>>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct EventRegistrationIn {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct EventQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    pub city: Option<String>,
    pub event_type: Option<String>,
    #[serde(deserialize_with = "deserialize_bool_from_any")]
    pub is_past: Option<bool>,
}

#[derive(Serialize, Debug)]
pub struct EventOut {
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
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub registered_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventOut {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            event_type: event.event_type,
            related_project_id: event.related_project_id,
            description: event.description,
            location: event.location,
            city: event.city,
            event_date: event.event_date,
            event_time: event.event_time,
            agenda: event.agenda,
            contact_person: event.contact_person,
            contact_email: event.contact_email,
            contact_phone: event.contact_phone,
            rsvp_info: event.rsvp_info,
            map_location: event.map_location,
            latitude: event.latitude,
            longitude: event.longitude,
            banner_image: event.banner_image,
            is_past: event.is_past,
            registration_link: event.registration_link,
            max_attendees: event.max_attendees,
            images: event.images.unwrap_or_default(),
            videos: event.videos.unwrap_or_default(),
            registered_count: event.registered_count,
            is_active: event.is_active,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct EventsResponse {
    pub events: Vec<EventOut>,
    pub pagination: PageInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn fold_event_time_sets_wall_clock() {
        let folded = fold_event_time(base_date(), Some("18:30"));
        assert_eq!(folded.hour(), 18);
        assert_eq!(folded.minute(), 30);
        assert_eq!(folded.second(), 0);
    }

    #[test]
    fn fold_event_time_without_time_keeps_date() {
        assert_eq!(fold_event_time(base_date(), None), base_date());
    }

    #[test]
    fn fold_event_time_garbage_components_fall_back_to_zero() {
        let folded = fold_event_time(base_date(), Some("evening"));
        assert_eq!(folded.hour(), 0);
        assert_eq!(folded.minute(), 0);
    }

    #[test]
    fn fold_event_time_out_of_range_hour_keeps_date() {
        assert_eq!(fold_event_time(base_date(), Some("25:00")), base_date());
    }

    #[test]
    fn media_list_accepts_single_string() {
        #[derive(Deserialize)]
        struct Doc {
            #[serde(default, deserialize_with = "deserialize_media_list")]
            images: Option<Vec<String>>,
        }

        let doc: Doc = serde_json::from_str(r#"{"images": "banner.jpg"}"#).unwrap();
        assert_eq!(doc.images, Some(vec!["banner.jpg".to_string()]));

        let doc: Doc = serde_json::from_str(r#"{"images": ["a.jpg", "b.jpg"]}"#).unwrap();
        assert_eq!(
            doc.images,
            Some(vec!["a.jpg".to_string(), "b.jpg".to_string()])
        );

        let doc: Doc = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(doc.images, None);
    }
}
