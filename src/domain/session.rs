//! Session domain types.
//!
//! A session is a server-side record resolved from the token a request
//! presents (cookie or bearer header). The raw token is only ever held
//! by the client; the database stores its digest.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::User;

/// Stored session row, pre-resolution (no user loaded yet).
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Resolved session: the record joined with its user.
///
/// Lifetime of one value is a single request; it is never cached
/// across requests.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(record: SessionRecord, user: User) -> Self {
        Self {
            id: record.id,
            user,
            expires_at: record.expires_at,
        }
    }
}
