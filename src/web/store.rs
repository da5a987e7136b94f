//! Per-user session storage for the web server.

use crate::analyzer::Session;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

struct Entry {
    session: Arc<Mutex<Session>>,
    last_seen: DateTime<Utc>,
}

/// In-memory sessions keyed by cookie ID.
///
/// Each session sits behind its own async mutex, so actions of one user run
/// one at a time while other users are unaffected. Sessions idle for longer
/// than the TTL are dropped.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Entry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_minutes: u32) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Duration::minutes(i64::from(ttl_minutes)),
        }
    }

    /// Look up a live session, or create a new one.
    ///
    /// Returns the session ID, the session, and whether it was just created.
    pub fn get_or_create(&self, id: Option<Uuid>) -> (Uuid, Arc<Mutex<Session>>, bool) {
        self.get_or_create_at(id, Utc::now())
    }

    fn get_or_create_at(
        &self,
        id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> (Uuid, Arc<Mutex<Session>>, bool) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);

        let ttl = self.ttl;
        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_seen <= ttl);
        if sessions.len() < before {
            debug!("Expired {} idle sessions", before - sessions.len());
        }

        if let Some(id) = id {
            if let Some(entry) = sessions.get_mut(&id) {
                entry.last_seen = now;
                return (id, entry.session.clone(), false);
            }
        }

        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(Session::new()));
        sessions.insert(
            id,
            Entry {
                session: session.clone(),
                last_seen: now,
            },
        );
        debug!("Created session {}", id);
        (id, session, true)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
