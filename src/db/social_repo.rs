//! Follow-graph repository.
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Follower;

/// Idempotent create follow; returns true if a new edge was inserted.
pub async fn create_follow(
    pool: &PgPool,
    follower_id: Uuid,
    followee_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let inserted: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO follows (follower_id, followee_id)
        VALUES ($1, $2)
        ON CONFLICT (follower_id, followee_id) DO NOTHING
        RETURNING follower_id
        "#,
    )
    .bind(follower_id)
    .bind(followee_id)
    .fetch_optional(pool)
    .await?;

    Ok(inserted.is_some())
}

pub async fn list_followers(
    pool: &PgPool,
    followee_id: Uuid,
) -> Result<Vec<Follower>, sqlx::Error> {
    sqlx::query_as::<_, Follower>(
        r#"
        SELECT u.id, u.display_name, u.profile_pic
        FROM follows f
        JOIN users u ON f.follower_id = u.id
        WHERE f.followee_id = $1
        "#,
    )
    .bind(followee_id)
    .fetch_all(pool)
    .await
}
