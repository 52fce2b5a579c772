//! Single-use OAuth state nonces.
//!
//! A nonce is issued when the login URL is built and consumed exactly once by
//! the callback. Nonces are process-local; a restart between login and
//! callback invalidates the flow, which simply sends the user back through
//! login.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// Nonces older than this are rejected even if never consumed.
const STATE_TTL_MINUTES: i64 = 10;

/// In-memory store of pending OAuth state nonces.
#[derive(Default)]
pub struct StateStore {
    pending: DashMap<String, DateTime<Utc>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh nonce and remember when it was issued.
    pub fn issue(&self) -> String {
        let state = Uuid::new_v4().simple().to_string();
        self.pending.insert(state.clone(), Utc::now());
        state
    }

    /// Consume a nonce. Returns true only for a known, unexpired nonce, and
    /// removes it either way so it can never be replayed.
    pub fn consume(&self, state: &str) -> bool {
        match self.pending.remove(state) {
            Some((_, issued_at)) => {
                Utc::now() - issued_at < Duration::minutes(STATE_TTL_MINUTES)
            }
            None => false,
        }
    }

    /// Drop expired nonces. Called opportunistically from the login handler.
    pub fn sweep(&self) {
        let cutoff = Utc::now() - Duration::minutes(STATE_TTL_MINUTES);
        self.pending.retain(|_, issued_at| *issued_at > cutoff);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_then_consume() {
        let store = StateStore::new();
        let state = store.issue();
        assert!(store.consume(&state));
    }

    #[test]
    fn test_consume_is_single_use() {
        let store = StateStore::new();
        let state = store.issue();
        assert!(store.consume(&state));
        assert!(!store.consume(&state));
    }

    #[test]
    fn test_unknown_state_rejected() {
        let store = StateStore::new();
        assert!(!store.consume("never-issued"));
    }

    #[test]
    fn test_expired_state_rejected() {
        let store = StateStore::new();
        let state = store.issue();
        store
            .pending
            .insert(state.clone(), Utc::now() - Duration::minutes(STATE_TTL_MINUTES + 1));
        assert!(!store.consume(&state));
    }

    #[test]
    fn test_sweep_drops_expired() {
        let store = StateStore::new();
        let old = store.issue();
        store
            .pending
            .insert(old.clone(), Utc::now() - Duration::minutes(STATE_TTL_MINUTES + 1));
        let fresh = store.issue();

        store.sweep();
        assert!(!store.pending.contains_key(&old));
        assert!(store.pending.contains_key(&fresh));
    }
}
