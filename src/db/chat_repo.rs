//! Chat repository - append-only message log per stream session.
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ChatMessage, ChatMessageWithAuthor};

/// Fetch cap. The log is read ascending from the first message posted;
/// the cap keeps it at the earliest 100, not the latest.
pub const CHAT_FETCH_LIMIT: i64 = 100;

pub async fn list_messages(
    pool: &PgPool,
    stream_id: Uuid,
) -> Result<Vec<ChatMessageWithAuthor>, sqlx::Error> {
    sqlx::query_as::<_, ChatMessageWithAuthor>(
        r#"
        SELECT m.id, m.message, m.created_at,
               u.id AS user_id, u.display_name, u.profile_pic
        FROM chat_messages m
        JOIN users u ON m.user_id = u.id
        WHERE m.stream_id = $1
        ORDER BY m.created_at ASC
        LIMIT $2
        "#,
    )
    .bind(stream_id)
    .bind(CHAT_FETCH_LIMIT)
    .fetch_all(pool)
    .await
}

pub async fn create_message(
    pool: &PgPool,
    stream_id: Uuid,
    user_id: Uuid,
    message: &str,
) -> Result<ChatMessage, sqlx::Error> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        INSERT INTO chat_messages (id, stream_id, user_id, message)
        VALUES ($1, $2, $3, $4)
        RETURNING id, message, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(stream_id)
    .bind(user_id)
    .bind(message)
    .fetch_one(pool)
    .await
}
