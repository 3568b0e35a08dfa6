//! Broadcast session endpoints.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::stream_repo;
use crate::error::{AppError, Result};
use crate::handlers::ensure_owner;
use crate::middleware::UserId;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStreamRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub genre: String,
}

pub async fn create_stream(
    pool: web::Data<PgPool>,
    caller: UserId,
    payload: web::Json<CreateStreamRequest>,
) -> Result<HttpResponse> {
    payload.validate()?;

    let stream = stream_repo::create_stream(&pool, caller.0, &payload.name, &payload.genre).await?;

    Ok(HttpResponse::Ok().json(stream))
}

pub async fn list_active(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let streams = stream_repo::list_active(&pool).await?;

    Ok(HttpResponse::Ok().json(streams))
}

/// Flip a session to not-live. Only its broadcaster may end it.
pub async fn end_stream(
    pool: web::Data<PgPool>,
    caller: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let stream_id = path.into_inner();

    let owner = stream_repo::find_owner(&pool, stream_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Stream not found".to_string()))?;
    ensure_owner(caller, owner)?;

    stream_repo::end_stream(&pool, stream_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
