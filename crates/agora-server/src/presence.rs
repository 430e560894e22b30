use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Who is currently connected.  The chat service asks it whether a message
/// can be delivered right away.
pub trait Presence: Send + Sync {
    fn is_online(&self, user_id: &str) -> bool;
    fn set_online(&self, user_id: &str, online: bool);
}

/// Process-local presence table.
#[derive(Debug, Default)]
pub struct InMemoryPresence {
    online: Mutex<HashSet<String>>,
}

impl InMemoryPresence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn online_count(&self) -> usize {
        self.online.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Presence for InMemoryPresence {
    fn is_online(&self, user_id: &str) -> bool {
        self.online
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(user_id)
    }

    fn set_online(&self, user_id: &str, online: bool) {
        let mut set = self.online.lock().unwrap_or_else(PoisonError::into_inner);
        if online {
            set.insert(user_id.to_string());
        } else {
            set.remove(user_id);
        }
    }
}
