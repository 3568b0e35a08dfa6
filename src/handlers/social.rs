//! Follower-graph endpoints.
use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::social_repo;
use crate::error::Result;
use crate::handlers::fk_violation_to_not_found;
use crate::middleware::UserId;

/// Follow a user. Idempotent: a repeated follow is acknowledged without
/// creating a second edge. The follower is always the caller.
pub async fn follow_user(
    pool: web::Data<PgPool>,
    caller: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let followee_id = path.into_inner();

    social_repo::create_follow(&pool, caller.0, followee_id)
        .await
        .map_err(|e| fk_violation_to_not_found(e, "User"))?;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

pub async fn list_followers(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let followers = social_repo::list_followers(&pool, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(followers))
}
