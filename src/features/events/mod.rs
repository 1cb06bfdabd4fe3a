pub mod handlers;
pub mod models;
pub mod repository;
pub mod schemas;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(handlers::list_events_handler))
        .route("/api/events", post(handlers::create_event_handler))
        .route("/api/events/{id}", get(handlers::get_event_handler))
        .route("/api/events/{id}", put(handlers::update_event_handler))
        .route("/api/events/{id}", delete(handlers::delete_event_handler))
        .route(
            "/api/events/{id}/register",
            post(handlers::register_for_event_handler),
        )
}
