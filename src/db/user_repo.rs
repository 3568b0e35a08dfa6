//! User repository - account rows and their provider-side ingest fields.
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{User, UserProfile};

/// Check whether an email is already registered.
///
/// Used by signup before any provider call is made, so a known-duplicate
/// email never provisions an orphaned ingest resource.
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(email.to_lowercase())
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

pub async fn create_user(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    display_name: &str,
    stream_key: &str,
    provider_stream_id: &str,
    playback_id: Option<&str>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, password_hash, display_name, stream_key, provider_stream_id, playback_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, email, password_hash, display_name, bio, profile_pic, stream_key, provider_stream_id, playback_id, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email.to_lowercase())
    .bind(password_hash)
    .bind(display_name)
    .bind(stream_key)
    .bind(provider_stream_id)
    .bind(playback_id)
    .fetch_one(pool)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, display_name, bio, profile_pic, stream_key, provider_stream_id, playback_id, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email.to_lowercase())
    .fetch_optional(pool)
    .await
}

pub async fn fetch_profile(pool: &PgPool, id: Uuid) -> Result<Option<UserProfile>, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT id, email, display_name, bio, profile_pic, stream_key, provider_stream_id, playback_id
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    display_name: &str,
    bio: Option<&str>,
) -> Result<Option<UserProfile>, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        r#"
        UPDATE users
        SET display_name = $1, bio = $2
        WHERE id = $3
        RETURNING id, email, display_name, bio, profile_pic, stream_key, provider_stream_id, playback_id
        "#,
    )
    .bind(display_name)
    .bind(bio)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn set_profile_pic(
    pool: &PgPool,
    id: Uuid,
    data_url: &str,
) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query("UPDATE users SET profile_pic = $1 WHERE id = $2")
        .bind(data_url)
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(affected > 0)
}

pub async fn get_stream_key(pool: &PgPool, id: Uuid) -> Result<Option<String>, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as("SELECT stream_key FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|(key,)| key))
}

pub async fn get_provider_stream_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<String>, sqlx::Error> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT provider_stream_id FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(row.map(|(stream_id,)| stream_id))
}

pub async fn set_stream_key(pool: &PgPool, id: Uuid, key: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET stream_key = $1 WHERE id = $2")
        .bind(key)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
