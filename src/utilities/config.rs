use std::{path::Path, str::FromStr};

use tokio::fs;
use tracing::Level;

use crate::utilities::errors::AppError;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_address: String,
    pub frontend_endpoint: String,
    pub tracing_level: Level,

    // DATABASE
    pub database_url: String,

    // JWT
    pub jwt_secret_key: String,
    pub token_expire_in_days: i64,

    // S3
    pub s3_access_key_id: Option<String>,
    pub s3_secret_key: Option<String>,
    pub s3_endpoint: Option<String>,
    pub s3_region: Option<String>,
    pub s3_bucket_name: Option<String>,
}

impl Config {
    pub async fn init() -> Result<Self, AppError> {
        let server_address = get_config_value(
            "SERVER_ADDRESS",
            Some("SERVER_ADDRESS"),
            Some("0.0.0.0:8000".to_string()),
        )
        .await?
        .ok_or_else(|| AppError::EnvironmentVariableNotSetError("SERVER_ADDRESS".to_string()))?;

        let frontend_endpoint = get_config_value(
            "FRONTEND_ENDPOINT",
            Some("FRONTEND_ENDPOINT"),
            Some("http://localhost:5173".to_string()),
        )
        .await?
        .ok_or_else(|| AppError::EnvironmentVariableNotSetError("FRONTEND_ENDPOINT".to_string()))?;

        let tracing_level = get_config_value(
            "TRACING_LEVEL",
            Some("TRACING_LEVEL"),
            Some(Level::DEBUG),
        )
        .await?
        .ok_or_else(|| AppError::EnvironmentVariableNotSetError("TRACING_LEVEL".to_string()))?;

        let database_url = get_config_value("DATABASE_URL", Some("DATABASE_URL"), None)
            .await?
            .ok_or_else(|| AppError::EnvironmentVariableNotSetError("DATABASE_URL".to_string()))?;

        let jwt_secret_key = get_config_value("JWT_SECRET", Some("JWT_SECRET"), None)
            .await?
            .ok_or_else(|| AppError::EnvironmentVariableNotSetError("JWT_SECRET".to_string()))?;

        let token_expire_in_days = get_config_value(
            "TOKEN_EXPIRE_IN_DAYS",
            Some("TOKEN_EXPIRE_IN_DAYS"),
            Some(7),
        )
        .await?
        .ok_or_else(|| {
            AppError::EnvironmentVariableNotSetError("TOKEN_EXPIRE_IN_DAYS".to_string())
        })?;

        let s3_access_key_id =
            get_config_value("S3_ACCESS_KEY_ID", Some("S3_ACCESS_KEY_ID"), None).await?;
        let s3_secret_key = get_config_value("S3_SECRET_KEY", Some("S3_SECRET_KEY"), None).await?;
        let s3_endpoint = get_config_value("S3_ENDPOINT", Some("S3_ENDPOINT"), None).await?;
        let s3_region = get_config_value("S3_REGION", Some("S3_REGION"), None).await?;
        let s3_bucket_name =
            get_config_value("S3_BUCKET_NAME", Some("S3_BUCKET_NAME"), None).await?;

        Ok(Config {
            server_address,
            frontend_endpoint,
            tracing_level,
            database_url,
            jwt_secret_key,
            token_expire_in_days,
            s3_access_key_id,
            s3_secret_key,
            s3_endpoint,
            s3_region,
            s3_bucket_name,
        })
    }
}

/// Try to resolve config value from Docker secrets or env var.
/// - `secret_name` → filename inside `/run/secrets/`
/// - `env_name` → optional environment variable key
///
/// Returns parsed `T` if found and successfully parsed.
pub async fn get_config_value<T>(
    secret_name: &str,
    env_name: Option<&str>,
    fallback: Option<T>,
) -> Result<Option<T>, AppError>
where
    T: FromStr,
{
    // 1. Docker secrets
    let docker_secret = Path::new("/run/secrets").join(secret_name);
    if docker_secret.exists() {
        match fs::read_to_string(&docker_secret).await {
            Ok(content) => {
                if let Ok(parsed) = T::from_str(content.trim()) {
                    return Ok(Some(parsed));
                }
            }
            Err(e) => {
                return Err(AppError::FileReadError(format!(
                    "docker secret at {0}, {e}",
                    docker_secret.display()
                )));
            }
        }
    }

    // 2. Env var
    if let Some(env_key) = env_name
        && let Ok(val) = std::env::var(env_key)
        && let Ok(parsed) = T::from_str(val.trim())
    {
        return Ok(Some(parsed));
    }

    // 3. Final fallback
    Ok(fallback)
}
