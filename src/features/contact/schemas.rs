use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::contact::models::ContactSubmission;
use crate::features::schemas::{PageInfo, PageQuery, deserialize_bool_from_any};

#[derive(Deserialize, Validate, Debug)]
pub struct ContactIn {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct SubmissionQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(deserialize_with = "deserialize_bool_from_any")]
    pub is_read: Option<bool>,
}

#[derive(Serialize, Debug)]
pub struct SubmissionsResponse {
    pub submissions: Vec<ContactSubmission>,
    pub pagination: PageInfo,
}
