//! Signup and login.
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::config::Config;
use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::models::AccountSummary;
use crate::security::{jwt, password};
use crate::services::VideoProviderClient;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8))]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub display_name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AccountSummary,
}

/// Create an account.
///
/// Ordering matters: the duplicate-email check runs before the provider
/// call (a known-duplicate must never provision an ingest resource), and
/// provisioning runs before the insert (a failed provision must never
/// leave a user row).
pub async fn signup(
    pool: web::Data<PgPool>,
    provider: web::Data<VideoProviderClient>,
    config: web::Data<Config>,
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse> {
    payload.validate()?;

    if user_repo::email_exists(&pool, &payload.email).await? {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = password::hash_password(&payload.password)?;

    let resource = provider.create_live_stream().await?;

    let user = user_repo::create_user(
        &pool,
        &payload.email,
        &password_hash,
        &payload.display_name,
        &resource.stream_key,
        &resource.provider_stream_id,
        resource.playback_id.as_deref(),
    )
    .await
    .map_err(|err| {
        // The provider resource now has no owning row; leave a trail for
        // reconciliation.
        tracing::warn!(
            provider_stream_id = %resource.provider_stream_id,
            error = %err,
            "user insert failed after provisioning"
        );
        match err.as_database_error() {
            Some(db) if db.is_unique_violation() => {
                AppError::Conflict("Email already registered".to_string())
            }
            _ => AppError::Database(err),
        }
    })?;

    let token = jwt::issue_token(user.id, &config.auth.jwt_secret)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: AccountSummary::from(&user),
    }))
}

pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    payload.validate()?;

    // Unknown email and wrong password collapse to the same response.
    let user = user_repo::find_by_email(&pool, &payload.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    password::verify_password(&payload.password, &user.password_hash)?;

    let token = jwt::issue_token(user.id, &config.auth.jwt_secret)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: AccountSummary::from(&user),
    }))
}
