mod features;
mod services;
mod utilities;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::services::{database::Database, storage::build_s3};
use crate::utilities::{app_state::AppState, config::Config, errors::AppError};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let config = Config::init().await?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.tracing_level.to_string()));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(env_filter)
        .init();

    let database = Database::init(&config).await?;
    let s3 = build_s3(&config)?;

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .frontend_endpoint
                .parse::<HeaderValue>()
                .map_err(|e| AppError::InternalError(format!("invalid frontend endpoint: {e}")))?,
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let server_address = config.server_address.clone();
    let state = AppState {
        database,
        config,
        s3,
    };

    let app = Router::new()
        .merge(features::users::routes())
        .merge(features::properties::routes())
        .merge(features::rentals::routes())
        .merge(features::projects::routes())
        .merge(features::events::routes())
        .merge(features::investments::routes())
        .merge(features::contact::routes())
        .merge(features::enquiries::routes())
        .merge(features::admin::routes())
        .merge(features::uploads::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    info!("listening on {server_address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install shutdown handler: {error}");
        return;
    }
    info!("shutdown signal received");
}
