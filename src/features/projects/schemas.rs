use bigdecimal::ToPrimitive;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::features::projects::models::Project;
use crate::features::schemas::{
    PageInfo, PageQuery, deserialize_f64_from_json, deserialize_i32_from_json,
};

#[derive(Deserialize, Validate, Debug)]
pub struct ProjectIn {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
    #[serde(default, deserialize_with = "deserialize_i32_from_json")]
    pub total_units: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_i32_from_json")]
    pub available_units: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub price_range_min: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub price_range_max: Option<f64>,
    pub amenities: Option<Vec<String>>,
    pub highlights: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub gallery: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub brochure_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_f64_from_json")]
    pub longitude: Option<f64>,
    pub completion_date: Option<DateTime<Utc>>,
    pub possession_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct ProjectQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    pub city: Option<String>,
    pub state: Option<String>,
    pub status: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ProjectOut {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub city: String,
    pub state: String,
    pub status: String,
    pub total_units: Option<i32>,
    pub available_units: Option<i32>,
    pub price_range_min: Option<f64>,
    pub price_range_max: Option<f64>,
    pub amenities: Vec<String>,
    pub highlights: Vec<String>,
    pub images: Vec<String>,
    pub gallery: Vec<String>,
    pub videos: Vec<String>,
    pub brochure_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub completion_date: Option<DateTime<Utc>>,
    pub possession_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectOut {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            location: project.location,
            city: project.city,
            state: project.state,
            status: project.status,
            total_units: project.total_units,
            available_units: project.available_units,
            price_range_min: project.price_range_min.as_ref().and_then(|v| v.to_f64()),
            price_range_max: project.price_range_max.as_ref().and_then(|v| v.to_f64()),
            amenities: project.amenities.unwrap_or_default(),
            highlights: project.highlights.unwrap_or_default(),
            images: project.images.unwrap_or_default(),
            gallery: project.gallery.unwrap_or_default(),
            videos: project.videos.unwrap_or_default(),
            brochure_url: project.brochure_url,
            latitude: project.latitude,
            longitude: project.longitude,
            completion_date: project.completion_date,
            possession_date: project.possession_date,
            is_active: project.is_active,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ProjectsResponse {
    pub projects: Vec<ProjectOut>,
    pub pagination: PageInfo,
}
