//! Schedule repository - weekly show slots per user.
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::ScheduleEntry;

pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ScheduleEntry>, sqlx::Error> {
    sqlx::query_as::<_, ScheduleEntry>(
        r#"
        SELECT id, day, time, show_name
        FROM schedules
        WHERE user_id = $1
        ORDER BY day, time
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn create_entry(
    pool: &PgPool,
    user_id: Uuid,
    day: &str,
    time: &str,
    show_name: &str,
) -> Result<ScheduleEntry, sqlx::Error> {
    sqlx::query_as::<_, ScheduleEntry>(
        r#"
        INSERT INTO schedules (id, user_id, day, time, show_name)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, day, time, show_name
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(day)
    .bind(time)
    .bind(show_name)
    .fetch_one(pool)
    .await
}

pub async fn find_owner(pool: &PgPool, id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    let row: Option<(Uuid,)> = sqlx::query_as("SELECT user_id FROM schedules WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|(user_id,)| user_id))
}

pub async fn delete_entry(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query("DELETE FROM schedules WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(affected > 0)
}
