use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub user_id: i64,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

/// In-memory session store, keyed by the SHA-256 hash of the token so
/// the raw cookie value never sits in process memory longer than a
/// single request.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id,
            token_hash: hash_token(token),
            expires_at,
            created_at: now,
            last_used_at: now,
        };

        self.sessions
            .write()
            .await
            .insert(session.token_hash.clone(), session.clone());

        Ok(session)
    }

    /// Resolves a token to a live session, touching `last_used_at`.
    /// Expired entries are pruned on the way out.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<Session>> {
        let token_hash = hash_token(token);
        let now = Utc::now();

        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&token_hash) {
            Some(session) if session.expires_at > now => {
                session.last_used_at = now;
                Ok(Some(session.clone()))
            }
            Some(_) => {
                sessions.remove(&token_hash);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    pub async fn delete_by_token(&self, token: &str) -> Result<()> {
        let token_hash = hash_token(token);
        self.sessions.write().await.remove(&token_hash);
        Ok(())
    }

    pub async fn cleanup_expired(&self) -> Result<u64> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.expires_at > now);
        Ok((before - sessions.len()) as u64)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
