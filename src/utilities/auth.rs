use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::features::users::models::{User, UserRole};
use crate::services::database::Database;
use crate::utilities::config::Config;
use crate::utilities::errors::AppError;
use crate::utilities::jwt::Claims;

/// Authenticated user loaded from the database. Rejects tokens whose
/// account no longer exists or has been deactivated.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    Config: FromRef<S>,
    Database: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let claims = Claims::from_request_parts(parts, state).await?;
        let database = Database::from_ref(state);

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(claims.sub)
            .fetch_optional(&database.pool)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        if !user.is_active {
            return Err(AppError::AccountDeactivated);
        }

        Ok(CurrentUser(user))
    }
}

/// Same as [`CurrentUser`] but requires the admin role.
pub struct AdminUser(pub User);

impl<S> FromRequestParts<S> for AdminUser
where
    Config: FromRef<S>,
    Database: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if user.role != UserRole::Admin {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(AdminUser(user))
    }
}

/// Optional authentication. Missing or invalid tokens resolve to `None`
/// instead of rejecting the request.
pub struct OptionalUser(pub Option<User>);

impl<S> FromRequestParts<S> for OptionalUser
where
    Config: FromRef<S>,
    Database: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match CurrentUser::from_request_parts(parts, state).await {
            Ok(CurrentUser(user)) => Ok(OptionalUser(Some(user))),
            Err(_) => Ok(OptionalUser(None)),
        }
    }
}
