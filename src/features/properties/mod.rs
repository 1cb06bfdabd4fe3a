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
        .route("/api/properties", get(handlers::list_properties_handler))
        .route("/api/properties", post(handlers::create_property_handler))
        .route(
            "/api/properties/my-properties/list",
            get(handlers::my_properties_handler),
        )
        .route(
            "/api/properties/pending/list",
            get(handlers::pending_properties_handler),
        )
        .route(
            "/api/properties/{id}/approve",
            post(handlers::approve_property_handler),
        )
        .route(
            "/api/properties/{id}/reject",
            post(handlers::reject_property_handler),
        )
        .route("/api/properties/{id}", get(handlers::get_property_handler))
        .route("/api/properties/{id}", put(handlers::update_property_handler))
        .route(
            "/api/properties/{id}",
            delete(handlers::delete_property_handler),
        )
}
