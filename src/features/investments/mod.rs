pub mod handlers;
pub mod models;
pub mod repository;
pub mod schemas;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/investments", get(handlers::list_opportunities_handler))
        .route("/api/investments", post(handlers::create_opportunity_handler))
        .route(
            "/api/investments/statistics",
            get(handlers::investment_statistics_handler),
        )
        .route(
            "/api/investments/register",
            post(handlers::register_investor_handler),
        )
        .route(
            "/api/investments/registrations/{id}/contact",
            post(handlers::mark_investor_contacted_handler),
        )
        .route(
            "/api/investments/{id}",
            get(handlers::get_opportunity_handler),
        )
        .route(
            "/api/investments/{id}",
            delete(handlers::delete_opportunity_handler),
        )
}
