use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFoundError(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Invalid reference")]
    InvalidReference,
    #[error("Validation error, {0}")]
    ValidationError(String),
    #[error("Validation errors, {0}")]
    ValidatorValidationErrors(#[from] validator::ValidationErrors),
    #[error("Missing authorization token")]
    MissingAuthorizationToken,
    #[error("Invalid or expired token")]
    JsonWebTokenError(#[from] jsonwebtoken::errors::Error),
    #[error("Wrong credentials")]
    WrongCredentials,
    #[error("Account is deactivated")]
    AccountDeactivated,
    #[error("Environment variable {0} not set")]
    EnvironmentVariableNotSetError(String),
    #[error("Failed to read {0}")]
    FileReadError(String),
    #[error("Database connection error")]
    DatabaseConnectionError,
    #[error("Sqlx error: {0}")]
    SqlxError(sqlx::Error),
    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("Object storage error: {0}")]
    ObjectStorageError(#[from] object_store::Error),
    #[error("Url parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
    #[error("Serde json error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
    #[error("Invalid form data, {0}")]
    InvalidFormData(String),
    #[error("Unsupported file type, {0}")]
    UnsupportedFileType(String),
    #[error("File exceeds maximum allowed size")]
    FileTooLarge,
    #[error("IO error, {0}")]
    IoError(#[from] std::io::Error),
    #[error("Internal error, {0}")]
    InternalError(String),
}

// Unique and foreign key violations surface to clients as their own
// statuses instead of a blanket 500.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some("23505") => return Self::Conflict("Duplicate entry".to_string()),
                Some("23503") => return Self::InvalidReference,
                _ => {}
            }
        }
        Self::SqlxError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Self::NotFoundError(resource) => {
                (StatusCode::NOT_FOUND, format!("{resource} not found"))
            }
            Self::Unauthorized(e) => (StatusCode::UNAUTHORIZED, e),
            Self::MissingAuthorizationToken => (
                StatusCode::UNAUTHORIZED,
                "Missing authorization token".to_string(),
            ),
            Self::JsonWebTokenError(_) => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
            ),
            Self::WrongCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid credentials".to_string(),
            ),
            Self::AccountDeactivated => (
                StatusCode::UNAUTHORIZED,
                "Account is deactivated".to_string(),
            ),
            Self::Forbidden(e) => (StatusCode::FORBIDDEN, e),
            Self::Conflict(e) => (StatusCode::CONFLICT, e),
            Self::InvalidReference => (StatusCode::BAD_REQUEST, "Invalid reference".to_string()),
            Self::ValidationError(e) => (StatusCode::BAD_REQUEST, e),
            Self::ValidatorValidationErrors(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::InvalidFormData(e) => (StatusCode::BAD_REQUEST, e),
            Self::UnsupportedFileType(e) => (
                StatusCode::BAD_REQUEST,
                format!("Unsupported file type, {e}"),
            ),
            Self::FileTooLarge => (
                StatusCode::BAD_REQUEST,
                "File exceeds maximum allowed size".to_string(),
            ),
            Self::SqlxError(e) => {
                error!("database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Self::MigrateError(e) => {
                error!("migration error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Self::BcryptError(e) => {
                error!("bcrypt error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Self::ObjectStorageError(e) => {
                error!("object storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Self::UrlParseError(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::SerdeJsonError(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::EnvironmentVariableNotSetError(var) => {
                error!("environment variable {var} not set");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Self::FileReadError(e) => {
                error!("file read error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Self::DatabaseConnectionError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database connection error".to_string(),
            ),
            Self::IoError(e) => {
                error!("io error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Self::InternalError(e) => {
                error!("internal error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({"error": error_message}));

        (status, body).into_response()
    }
}
