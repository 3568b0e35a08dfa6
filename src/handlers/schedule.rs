//! Show-schedule endpoints.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::schedule_repo;
use crate::error::{AppError, Result};
use crate::handlers::ensure_owner;
use crate::middleware::UserId;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntryRequest {
    #[validate(length(min = 1, max = 50))]
    pub day: String,

    #[validate(length(min = 1, max = 50))]
    pub time: String,

    #[validate(length(min = 1, max = 200))]
    pub show_name: String,
}

pub async fn list_schedule(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let entries = schedule_repo::list_for_user(&pool, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(entries))
}

pub async fn add_entry(
    pool: web::Data<PgPool>,
    caller: UserId,
    path: web::Path<Uuid>,
    payload: web::Json<ScheduleEntryRequest>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    ensure_owner(caller, user_id)?;
    payload.validate()?;

    let entry = schedule_repo::create_entry(
        &pool,
        user_id,
        &payload.day,
        &payload.time,
        &payload.show_name,
    )
    .await?;

    Ok(HttpResponse::Ok().json(entry))
}

/// Remove a schedule entry. Only its owner may delete it.
pub async fn delete_entry(
    pool: web::Data<PgPool>,
    caller: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let entry_id = path.into_inner();

    let owner = schedule_repo::find_owner(&pool, entry_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Schedule entry not found".to_string()))?;
    ensure_owner(caller, owner)?;

    schedule_repo::delete_entry(&pool, entry_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
