pub mod handlers;
pub mod schemas;

use axum::{
    Router,
    routing::{delete, post},
};

use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/upload/single", post(handlers::upload_single_handler))
        .route(
            "/api/upload/multiple",
            post(handlers::upload_multiple_handler),
        )
        .route(
            "/api/upload/property-images",
            post(handlers::upload_property_images_handler),
        )
        .route(
            "/api/upload/project-files",
            post(handlers::upload_project_files_handler),
        )
        .route("/api/upload/file", delete(handlers::delete_file_handler))
        .route("/api/upload/files", delete(handlers::delete_files_handler))
}
