//! Refresh session model.
//!
//! Sessions store only the SHA-256 hex hash of the opaque refresh token; the
//! plaintext is handed to the client once and never persisted.

use sqlx::FromRow;

use atelier_core::types::{DbId, Timestamp};

/// Row from the `user_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Session {
    /// A session is usable while unexpired and unrevoked.
    pub fn is_valid(&self, now: Timestamp) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}
