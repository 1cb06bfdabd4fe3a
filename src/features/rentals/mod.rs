pub mod handlers;
pub mod models;
pub mod repository;
pub mod schemas;

use axum::{
    Router,
    routing::{get, post},
};

use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/rentals", get(handlers::list_rentals_handler))
        .route("/api/rentals", post(handlers::create_rental_handler))
        .route(
            "/api/rentals/pending/list",
            get(handlers::pending_rentals_handler),
        )
        .route(
            "/api/rentals/{id}/approve",
            post(handlers::approve_rental_handler),
        )
        .route(
            "/api/rentals/{id}/reject",
            post(handlers::reject_rental_handler),
        )
        .route("/api/rentals/{id}", get(handlers::get_rental_handler))
}
