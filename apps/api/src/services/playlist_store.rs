//! In-memory playlist store with TTL expiry
//!
//! Replaces temp-file playlist handoff: bodies are held in process memory
//! under a UUID and expire after the configured lifetime. Expired entries
//! are purged opportunistically on insert and fetch, so no background
//! sweeper is needed.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use uuid::Uuid;

/// A stored playlist body
#[derive(Debug, Clone)]
struct StoredPlaylist {
    body: String,
    created_at: Instant,
}

/// TTL-expiring playlist store
#[derive(Debug)]
pub struct PlaylistStore {
    ttl: Duration,
    entries: Mutex<HashMap<Uuid, StoredPlaylist>>,
}

impl PlaylistStore {
    /// Create a store whose entries live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Store a playlist body, returning its id
    pub fn insert(&self, body: String) -> Uuid {
        let id = Uuid::new_v4();
        let mut entries = self.entries.lock().expect("playlist store lock poisoned");
        Self::purge_expired(&mut entries, self.ttl);
        entries.insert(
            id,
            StoredPlaylist {
                body,
                created_at: Instant::now(),
            },
        );
        id
    }

    /// Fetch a playlist body; `None` once expired or unknown
    pub fn get(&self, id: &Uuid) -> Option<String> {
        let mut entries = self.entries.lock().expect("playlist store lock poisoned");
        Self::purge_expired(&mut entries, self.ttl);
        entries.get(id).map(|e| e.body.clone())
    }

    /// Number of live (unexpired) entries
    pub fn len(&self) -> usize {
        let mut entries = self.entries.lock().expect("playlist store lock poisoned");
        Self::purge_expired(&mut entries, self.ttl);
        entries.len()
    }

    /// Whether the store holds no live entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn purge_expired(entries: &mut HashMap<Uuid, StoredPlaylist>, ttl: Duration) {
        entries.retain(|_, e| e.created_at.elapsed() < ttl);
    }
}
