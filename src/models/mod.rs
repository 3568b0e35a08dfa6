//! Data models for the decklive service.
//!
//! Row structs map 1:1 onto tables; the remaining structs are the response
//! shapes handlers serialize (joins and partial projections).
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A platform account, including its provider-side ingest resource.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub profile_pic: Option<String>,
    pub stream_key: String,
    pub provider_stream_id: String,
    pub playback_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Profile fields returned by `GET /users/{id}`.
///
/// Includes the ingest key and provider ids without redaction; the public
/// API has always exposed them and clients depend on it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub profile_pic: Option<String>,
    pub stream_key: String,
    pub provider_stream_id: String,
    pub playback_id: Option<String>,
}

/// The subset of account fields echoed back by signup/login.
#[derive(Debug, Clone, Serialize)]
pub struct AccountSummary {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
}

impl From<&User> for AccountSummary {
    fn from(user: &User) -> Self {
        AccountSummary {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
        }
    }
}

/// A single broadcast session.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Stream {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub genre: String,
    pub is_live: bool,
    pub created_at: DateTime<Utc>,
}

/// A live session joined with its broadcaster's public profile.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActiveStream {
    pub id: Uuid,
    pub name: String,
    pub genre: String,
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub display_name: String,
    pub profile_pic: Option<String>,
    pub playback_id: Option<String>,
}

/// A follower row joined with the follower's public profile.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Follower {
    pub id: Uuid,
    pub display_name: String,
    pub profile_pic: Option<String>,
}

/// A chat message joined with its author's public profile.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatMessageWithAuthor {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub display_name: String,
    pub profile_pic: Option<String>,
}

/// A chat message as returned right after posting.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A scheduled show slot.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: Uuid,
    pub day: String,
    pub time: String,
    pub show_name: String,
}
