use axum::extract::FromRef;
use object_store::aws::AmazonS3;

use crate::{services::database::Database, utilities::config::Config};

#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub config: Config,
    pub s3: Option<AmazonS3>,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.database.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Option<AmazonS3> {
    fn from_ref(state: &AppState) -> Self {
        state.s3.clone()
    }
}
