//! In-memory chat session store
//!
//! Sessions live in process memory for the lifetime of one chat session
//! and reset on process restart. The chat handler checks a session out,
//! runs the turn, and checks it back in.

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use moodtune_recommender::Session;

/// Process-memory session store keyed by session id
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Check out a session: the stored one for a known id, a fresh one
    /// otherwise. Returns the id alongside the session.
    pub fn checkout(&self, id: Option<Uuid>) -> (Uuid, Session) {
        let mut sessions = self.sessions.lock().expect("session store lock poisoned");
        match id {
            Some(id) => {
                let session = sessions.get(&id).cloned().unwrap_or_default();
                (id, session)
            }
            None => (Uuid::new_v4(), Session::new()),
        }
    }

    /// Check a session back in after a turn
    pub fn checkin(&self, id: Uuid, session: Session) {
        let mut sessions = self.sessions.lock().expect("session store lock poisoned");
        sessions.insert(id, session);
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .expect("session store lock poisoned")
            .len()
    }

    /// Whether any session is live
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
