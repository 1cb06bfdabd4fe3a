use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(FromRow, Clone, Debug)]
pub struct Enquiry {
    pub id: Uuid,
    pub property_id: Option<Uuid>,
    pub buyer_id: Option<Uuid>,
    pub seller_id: Option<Uuid>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// An enquiry as the buyer sees it, joined with the property it
/// concerns.
#[derive(FromRow, Serialize, Clone, Debug)]
pub struct SentEnquiry {
    pub id: Uuid,
    pub property_id: Option<Uuid>,
    pub buyer_id: Option<Uuid>,
    pub seller_id: Option<Uuid>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub property_title: String,
    pub locality: String,
    pub city: String,
}

/// An enquiry as the seller sees it, including the buyer's contact
/// details.
#[derive(FromRow, Serialize, Clone, Debug)]
pub struct ReceivedEnquiry {
    pub id: Uuid,
    pub property_id: Option<Uuid>,
    pub buyer_id: Option<Uuid>,
    pub seller_id: Option<Uuid>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub property_title: String,
    pub locality: String,
    pub city: String,
    pub buyer_name: String,
    pub buyer_email: String,
    pub buyer_phone: Option<String>,
}
