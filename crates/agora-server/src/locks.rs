//! Per-collection write serialization.
//!
//! The store rewrites a whole collection on every mutation and takes no
//! locks, so two services mutating the same collection at once would lose
//! one of the writes.  Every read-modify-write in this crate runs inside
//! [`CollectionLocks::with`] for the collection it mutates.  A service never
//! holds two collection locks at once.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone, Default)]
pub struct CollectionLocks {
    locks: Arc<Mutex<HashMap<&'static str, Arc<Mutex<()>>>>>,
}

impl CollectionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, collection: &'static str) -> Arc<Mutex<()>> {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(collection).or_default())
    }

    /// Run `f` while holding the lock for `collection`.
    pub fn with<T>(&self, collection: &'static str, f: impl FnOnce() -> T) -> T {
        let lock = self.lock_for(collection);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }
}
