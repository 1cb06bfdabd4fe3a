use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate, Debug)]
pub struct EnquiryIn {
    pub property_id: Uuid,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}
