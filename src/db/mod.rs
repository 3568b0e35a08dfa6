//! Database access. One repository module per aggregate; all functions
//! take a pool reference and surface `sqlx::Error` to the caller.
pub mod chat_repo;
pub mod schedule_repo;
pub mod social_repo;
pub mod stream_repo;
pub mod user_repo;
