use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Lets at most one suggestion request per username run at a time. Extra
/// triggers for a username that is already being served get no permit and
/// are dropped, not queued. Other usernames are unaffected.
#[derive(Clone, Default)]
pub struct InFlightGate {
    active: Arc<Mutex<HashSet<String>>>,
}

/// Held for the duration of a request; frees its username when dropped.
pub struct InFlightPermit {
    active: Arc<Mutex<HashSet<String>>>,
    username: String,
}

impl InFlightGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self, username: &str) -> Option<InFlightPermit> {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if !active.insert(username.to_string()) {
            return None;
        }

        Some(InFlightPermit {
            active: self.active.clone(),
            username: username.to_string(),
        })
    }

    pub fn is_busy(&self, username: &str) -> bool {
        self.active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(username)
    }
}

impl Drop for InFlightPermit {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.username);
    }
}
