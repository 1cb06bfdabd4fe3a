use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::features::users::models::UserRole;
use crate::utilities::config::Config;
use crate::utilities::errors::AppError;

#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: Uuid,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

pub fn create_token(config: &Config, user_id: Uuid, role: UserRole) -> Result<String, AppError> {
    let now = Utc::now();
    let exp = now + Duration::days(config.token_expire_in_days);

    let claims = Claims {
        sub: user_id,
        role,
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret_key.as_bytes());
    let encoded_token = encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)?;
    Ok(encoded_token)
}

pub fn verify_token(config: &Config, token: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_key.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

impl<S> FromRequestParts<S> for Claims
where
    Config: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::MissingAuthorizationToken)?;

        let config = Config::from_ref(state);

        let claims = verify_token(&config, bearer.token())?;

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    fn test_config(expire_in_days: i64) -> Config {
        Config {
            server_address: "0.0.0.0:8000".to_string(),
            frontend_endpoint: "http://localhost:5173".to_string(),
            tracing_level: Level::DEBUG,
            database_url: "postgresql://localhost/test".to_string(),
            jwt_secret_key: "test-secret".to_string(),
            token_expire_in_days: expire_in_days,
            s3_access_key_id: None,
            s3_secret_key: None,
            s3_endpoint: None,
            s3_region: None,
            s3_bucket_name: None,
        }
    }

    #[test]
    fn token_round_trip_preserves_claims() {
        let config = test_config(7);
        let user_id = Uuid::new_v4();

        let token = create_token(&config, user_id, UserRole::Seller).unwrap();
        let claims = verify_token(&config, &token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, UserRole::Seller);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config(-1);
        let user_id = Uuid::new_v4();

        let token = create_token(&config, user_id, UserRole::Buyer).unwrap();
        let result = verify_token(&config, &token);

        assert!(matches!(result, Err(AppError::JsonWebTokenError(_))));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let config = test_config(7);
        let mut other = test_config(7);
        other.jwt_secret_key = "different-secret".to_string();

        let token = create_token(&other, Uuid::new_v4(), UserRole::Admin).unwrap();

        assert!(verify_token(&config, &token).is_err());
    }
}
