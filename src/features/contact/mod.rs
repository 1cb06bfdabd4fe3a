pub mod handlers;
pub mod models;
pub mod schemas;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/contact", post(handlers::submit_contact_handler))
        .route(
            "/api/contact/submissions",
            get(handlers::list_submissions_handler),
        )
        .route(
            "/api/contact/submissions/{id}",
            get(handlers::get_submission_handler),
        )
        .route(
            "/api/contact/submissions/{id}/read",
            put(handlers::mark_submission_read_handler),
        )
        .route(
            "/api/contact/submissions/{id}/respond",
            put(handlers::mark_submission_responded_handler),
        )
        .route(
            "/api/contact/submissions/{id}",
            delete(handlers::delete_submission_handler),
        )
}
