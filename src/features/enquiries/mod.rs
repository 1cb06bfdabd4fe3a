pub mod handlers;
pub mod models;
pub mod schemas;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/enquiries", post(handlers::create_enquiry_handler))
        .route("/api/enquiries/sent", get(handlers::sent_enquiries_handler))
        .route(
            "/api/enquiries/received",
            get(handlers::received_enquiries_handler),
        )
        .route(
            "/api/enquiries/{id}/read",
            put(handlers::mark_enquiry_read_handler),
        )
}
