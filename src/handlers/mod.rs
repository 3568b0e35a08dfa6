//! HTTP handlers. Thin by design: parse, check ownership where required,
//! run the repo/provider calls, shape the response.
pub mod auth;
pub mod chat;
pub mod health;
pub mod schedule;
pub mod social;
pub mod streams;
pub mod users;

use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::UserId;

/// Ownership check applied between the authentication gate and a mutating
/// handler: the authenticated identity must match the resource owner.
pub(crate) fn ensure_owner(caller: UserId, owner: Uuid) -> Result<(), AppError> {
    if caller.0 == owner {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Map a foreign-key violation onto a 404 for the referenced resource.
pub(crate) fn fk_violation_to_not_found(err: sqlx::Error, what: &str) -> AppError {
    match err.as_database_error() {
        Some(db) if db.is_foreign_key_violation() => AppError::NotFound(format!("{what} not found")),
        _ => AppError::Database(err),
    }
}
