//! Stream repository - broadcast session rows.
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ActiveStream, Stream};

pub async fn create_stream(
    pool: &PgPool,
    user_id: Uuid,
    name: &str,
    genre: &str,
) -> Result<Stream, sqlx::Error> {
    sqlx::query_as::<_, Stream>(
        r#"
        INSERT INTO streams (id, user_id, name, genre, is_live)
        VALUES ($1, $2, $3, $4, TRUE)
        RETURNING id, user_id, name, genre, is_live, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(name)
    .bind(genre)
    .fetch_one(pool)
    .await
}

/// Live sessions joined with broadcaster profile, newest first.
pub async fn list_active(pool: &PgPool) -> Result<Vec<ActiveStream>, sqlx::Error> {
    sqlx::query_as::<_, ActiveStream>(
        r#"
        SELECT s.id, s.name, s.genre, s.created_at,
               u.id AS user_id, u.display_name, u.profile_pic, u.playback_id
        FROM streams s
        JOIN users u ON s.user_id = u.id
        WHERE s.is_live = TRUE
        ORDER BY s.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn find_owner(pool: &PgPool, id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    let row: Option<(Uuid,)> = sqlx::query_as("SELECT user_id FROM streams WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|(user_id,)| user_id))
}

pub async fn end_stream(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query("UPDATE streams SET is_live = FALSE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(affected > 0)
}
