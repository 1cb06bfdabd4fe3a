use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bcrypt::{DEFAULT_COST, hash, verify};
use validator::Validate;

use crate::{
    features::users::{
        models::{User, UserRole},
        schemas::{AuthResponse, LoginIn, RegisterIn, UserOut},
    },
    services::database::Database,
    utilities::{auth::CurrentUser, config::Config, errors::AppError, jwt::create_token},
};

pub async fn register_handler(
    State(database): State<Database>,
    State(config): State<Config>,
    Json(register_in): Json<RegisterIn>,
) -> Result<Response, AppError> {
    register_in.validate()?;

    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&register_in.email)
        .fetch_one(&database.pool)
        .await?;
    if existing > 0 {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash(&register_in.password, DEFAULT_COST)?;
    let role: UserRole = register_in.role.map(Into::into).unwrap_or(UserRole::Buyer);

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password_hash, full_name, phone, role)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&register_in.email)
    .bind(&password_hash)
    .bind(&register_in.full_name)
    .bind(&register_in.phone)
    .bind(role.as_str())
    .fetch_one(&database.pool)
    .await?;

    let token = create_token(&config, user.id, user.role)?;

    let response = AuthResponse {
        message: "User registered successfully".to_string(),
        user: user.into(),
        token,
    };
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

pub async fn login_handler(
    State(database): State<Database>,
    State(config): State<Config>,
    Json(login_in): Json<LoginIn>,
) -> Result<Response, AppError> {
    login_in.validate()?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(&login_in.email)
        .fetch_optional(&database.pool)
        .await?
        .ok_or(AppError::WrongCredentials)?;

    if !user.is_active {
        return Err(AppError::Forbidden("Account is deactivated".to_string()));
    }

    if !verify(&login_in.password, &user.password_hash)? {
        return Err(AppError::WrongCredentials);
    }

    let token = create_token(&config, user.id, user.role)?;

    let response = AuthResponse {
        message: "Login successful".to_string(),
        user: user.into(),
        token,
    };
    Ok(Json(response).into_response())
}

pub async fn get_me_handler(CurrentUser(user): CurrentUser) -> Result<Response, AppError> {
    Ok(Json(serde_json::json!({ "user": UserOut::from(user) })).into_response())
}
