//! Profile endpoints: fetch, update, picture upload, ingest-key access.
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures::StreamExt as _;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::handlers::ensure_owner;
use crate::middleware::UserId;
use crate::services::profile_image::{self, MAX_UPLOAD_BYTES};
use crate::services::VideoProviderClient;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub display_name: String,

    #[validate(length(max = 1000))]
    pub bio: Option<String>,
}

pub async fn get_user(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let profile = user_repo::fetch_profile(&pool, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(profile))
}

pub async fn update_user(
    pool: web::Data<PgPool>,
    caller: UserId,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    ensure_owner(caller, user_id)?;
    payload.validate()?;

    let profile = user_repo::update_profile(
        &pool,
        user_id,
        &payload.display_name,
        payload.bio.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(profile))
}

/// Multipart profile-picture upload.
///
/// The size cap is enforced while the stream is read, before any image
/// decoding; the stored form is a fixed 200x200 JPEG data URL.
pub async fn upload_profile_pic(
    pool: web::Data<PgPool>,
    caller: UserId,
    path: web::Path<Uuid>,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    ensure_owner(caller, user_id)?;

    let mut file: Option<web::BytesMut> = None;
    while let Some(field) = payload.next().await {
        let mut field =
            field.map_err(|e| AppError::BadRequest(format!("multipart error: {e}")))?;

        let mut data = web::BytesMut::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| AppError::BadRequest(format!("multipart error: {e}")))?;
            if data.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(AppError::BadRequest(format!(
                    "file exceeds the {MAX_UPLOAD_BYTES} byte limit"
                )));
            }
            data.extend_from_slice(&chunk);
        }

        file = Some(data);
        break;
    }

    let data = file
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::BadRequest("no file uploaded".to_string()))?;

    let data_url = profile_image::process_avatar_async(data.freeze()).await?;

    if !user_repo::set_profile_pic(&pool, user_id, &data_url).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

pub async fn get_stream_key(
    pool: web::Data<PgPool>,
    caller: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    ensure_owner(caller, user_id)?;

    let stream_key = user_repo::get_stream_key(&pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(json!({ "stream_key": stream_key })))
}

/// Rotate the ingest key via the provider, then persist the new key.
pub async fn regenerate_key(
    pool: web::Data<PgPool>,
    provider: web::Data<VideoProviderClient>,
    caller: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    ensure_owner(caller, user_id)?;

    let provider_stream_id = user_repo::get_provider_stream_id(&pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let stream_key = provider.reset_stream_key(&provider_stream_id).await?;

    user_repo::set_stream_key(&pool, user_id, &stream_key).await?;

    Ok(HttpResponse::Ok().json(json!({ "stream_key": stream_key })))
}
