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
        .route("/api/projects", get(handlers::list_projects_handler))
        .route("/api/projects", post(handlers::create_project_handler))
        .route("/api/projects/{id}", get(handlers::get_project_handler))
        .route("/api/projects/{id}", put(handlers::update_project_handler))
        .route(
            "/api/projects/{id}",
            delete(handlers::delete_project_handler),
        )
}
