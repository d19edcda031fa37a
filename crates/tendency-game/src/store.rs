//! Session Store
//!
//! Process-wide holder of live game sessions. Each session sits behind its
//! own mutex, so concurrent operations against the same session serialize
//! while distinct sessions never contend.
//!
//! Growth is bounded: sessions idle past the TTL are swept, and when the
//! capacity cap is hit the least-recently-active session is evicted.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use game_core::GameSession;
use std::sync::{Arc, Mutex, PoisonError};

pub struct SessionStore {
    sessions: DashMap<u64, Arc<Mutex<GameSession>>>,
    ttl: Duration,
    capacity: usize,
}

impl SessionStore {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Insert a freshly started session, evicting the least-recently-active
    /// one first when the store is at capacity.
    pub fn insert(&self, session: GameSession) {
        if self.sessions.len() >= self.capacity {
            if let Some(oldest) = self.least_recently_active() {
                tracing::warn!(session_id = oldest, "session store at capacity, evicting oldest");
                self.sessions.remove(&oldest);
            }
        }
        self.sessions
            .insert(session.id, Arc::new(Mutex::new(session)));
    }

    /// Handle to a live session; callers lock it for the whole operation
    pub fn get(&self, session_id: u64) -> Option<Arc<Mutex<GameSession>>> {
        self.sessions.get(&session_id).map(|e| Arc::clone(e.value()))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop every session idle past the TTL. Finished sessions are
    /// reclaimed by the same rule once their last read ages out.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let expired: Vec<u64> = self
            .sessions
            .iter()
            .filter(|entry| {
                let last = entry
                    .value()
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .last_activity;
                now - last > self.ttl
            })
            .map(|entry| *entry.key())
            .collect();

        for id in &expired {
            self.sessions.remove(id);
        }
        if !expired.is_empty() {
            tracing::debug!(count = expired.len(), "swept expired game sessions");
        }
        expired.len()
    }

    fn least_recently_active(&self) -> Option<u64> {
        self.sessions
            .iter()
            .min_by_key(|entry| {
                entry
                    .value()
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .last_activity
            })
            .map(|entry| *entry.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::blank_session;

    fn session_with(id: u64, last_activity: DateTime<Utc>) -> GameSession {
        let mut session = blank_session(1_000_000);
        session.id = id;
        session.last_activity = last_activity;
        session
    }

    #[test]
    fn get_returns_the_inserted_session() {
        let store = SessionStore::new(Duration::hours(6), 100);
        store.insert(session_with(7, Utc::now()));

        let handle = store.get(7).unwrap();
        assert_eq!(handle.lock().unwrap().id, 7);
        assert!(store.get(8).is_none());
    }

    #[test]
    fn sweep_drops_only_idle_sessions() {
        let now = Utc::now();
        let store = SessionStore::new(Duration::minutes(30), 100);
        store.insert(session_with(1, now - Duration::hours(2)));
        store.insert(session_with(2, now - Duration::minutes(5)));

        let swept = store.sweep(now);
        assert_eq!(swept, 1);
        assert!(store.get(1).is_none());
        assert!(store.get(2).is_some());

        assert_eq!(store.sweep(now + Duration::hours(1)), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn capacity_evicts_least_recently_active() {
        let now = Utc::now();
        let store = SessionStore::new(Duration::hours(6), 2);
        store.insert(session_with(1, now - Duration::minutes(10)));
        store.insert(session_with(2, now - Duration::minutes(1)));
        store.insert(session_with(3, now));

        assert_eq!(store.len(), 2);
        assert!(store.get(1).is_none());
        assert!(store.get(2).is_some());
        assert!(store.get(3).is_some());
    }
}
