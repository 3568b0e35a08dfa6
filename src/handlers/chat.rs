//! Chat-log endpoints. The log is append-only and polled, not pushed.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::chat_repo;
use crate::error::Result;
use crate::handlers::fk_violation_to_not_found;
use crate::middleware::UserId;

#[derive(Debug, Deserialize, Validate)]
pub struct ChatMessageRequest {
    #[validate(length(min = 1))]
    pub message: String,
}

/// Up to 100 messages, ascending from the first ever posted to the
/// session. An unknown session yields an empty list, not a 404.
pub async fn list_messages(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let messages = chat_repo::list_messages(&pool, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(messages))
}

pub async fn post_message(
    pool: web::Data<PgPool>,
    caller: UserId,
    path: web::Path<Uuid>,
    payload: web::Json<ChatMessageRequest>,
) -> Result<HttpResponse> {
    payload.validate()?;

    let message = chat_repo::create_message(&pool, path.into_inner(), caller.0, &payload.message)
        .await
        .map_err(|e| fk_violation_to_not_found(e, "Stream"))?;

    Ok(HttpResponse::Ok().json(message))
}
