//! Session token issuance and verification.
//!
//! Tokens are HS256-signed bearer credentials carrying the user id and a
//! fixed seven-day expiry. The signing secret comes from validated startup
//! configuration; there is no process-global key state.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Session lifetime.
pub const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Issue a signed session token for `user_id`.
pub fn issue_token(user_id: Uuid, secret: &str) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token generation failed: {e}")))
}

/// Verify a session token and extract the user id it was issued for.
///
/// Returns `None` for every failure mode (malformed token, bad signature,
/// expired, unparsable subject). Callers must not distinguish between them.
pub fn verify_token(token: &str, secret: &str) -> Option<Uuid> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;

    Uuid::parse_str(&data.claims.sub).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-0123456789abcdef0123456789";

    #[test]
    fn issue_then_verify_returns_user_id() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, SECRET).unwrap();
        assert_eq!(verify_token(&token, SECRET), Some(user_id));
    }

    #[test]
    fn expiry_is_seven_days() {
        let token = issue_token(Uuid::new_v4(), SECRET).unwrap();
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, TOKEN_TTL_DAYS * 86_400);
    }

    #[test]
    fn expired_token_is_invalid() {
        // Encode directly with an exp outside the validation leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: now - 7_200,
            exp: now - 3_600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(verify_token(&token, SECRET), None);
    }

    #[test]
    fn tampered_signature_is_invalid() {
        let token = issue_token(Uuid::new_v4(), SECRET).unwrap();
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        parts[2] = parts[2].chars().rev().collect();
        let tampered = parts.join(".");

        assert_eq!(verify_token(&tampered, SECRET), None);
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = issue_token(Uuid::new_v4(), SECRET).unwrap();
        assert_eq!(verify_token(&token, "another-secret-0123456789abcdef00"), None);
    }

    #[test]
    fn malformed_token_is_invalid() {
        assert_eq!(verify_token("not.a.token", SECRET), None);
        assert_eq!(verify_token("", SECRET), None);
    }
}
