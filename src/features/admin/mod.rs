pub mod handlers;
pub mod schemas;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::features::{contact, properties};
use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/dashboard", get(handlers::dashboard_handler))
        .route("/api/admin/users", get(handlers::list_users_handler))
        .route("/api/admin/users/{id}", get(handlers::get_user_handler))
        .route(
            "/api/admin/users/{id}/toggle",
            put(handlers::toggle_user_status_handler),
        )
        .route("/api/admin/users/{id}", put(handlers::update_user_handler))
        .route(
            "/api/admin/users/{id}",
            delete(handlers::delete_user_handler),
        )
        .route(
            "/api/admin/properties",
            get(handlers::list_all_properties_handler),
        )
        .route(
            "/api/admin/properties/{id}",
            get(handlers::get_property_admin_handler),
        )
        .route(
            "/api/admin/properties/{id}/status",
            put(handlers::update_property_status_handler),
        )
        .route(
            "/api/admin/properties/{id}/approve",
            post(properties::handlers::approve_property_handler),
        )
        .route(
            "/api/admin/properties/{id}/reject",
            post(properties::handlers::reject_property_handler),
        )
        .route(
            "/api/admin/properties/{id}",
            delete(handlers::delete_property_admin_handler),
        )
        .route("/api/admin/rentals", get(handlers::list_all_rentals_handler))
        .route(
            "/api/admin/projects",
            get(handlers::list_all_projects_handler),
        )
        .route("/api/admin/events", get(handlers::list_all_events_handler))
        .route(
            "/api/admin/investments",
            get(handlers::list_all_investments_handler),
        )
        .route(
            "/api/admin/investor-registrations",
            get(handlers::list_investor_registrations_handler),
        )
        .route(
            "/api/admin/contact-submissions",
            get(contact::handlers::list_submissions_handler),
        )
        .route(
            "/api/admin/contact-submissions/{id}",
            get(contact::handlers::get_submission_handler),
        )
        .route(
            "/api/admin/contact-submissions/{id}",
            delete(contact::handlers::delete_submission_handler),
        )
}
