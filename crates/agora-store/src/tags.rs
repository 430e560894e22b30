//! Read-only repository for [`Tag`] reference data.
//!
//! [`TagRepository`] implements [`ReadCollection`] only, so mutating tags
//! through it does not compile.  Its engine is also opened read-only: any
//! mutation routed to the engine fails with
//! [`StoreError::UnsupportedOperation`](crate::StoreError::UnsupportedOperation)
//! before touching the byte store.  Tags are provisioned by seeding
//! (see [`Database::seed_json`](crate::Database::seed_json)).

use crate::collection::{DocumentStore, ReadCollection};
use crate::models::Tag;

#[derive(Clone)]
pub struct TagRepository {
    store: DocumentStore<Tag>,
}

impl TagRepository {
    pub fn new(store: DocumentStore<Tag>) -> Self {
        Self { store }
    }
}

impl ReadCollection<Tag> for TagRepository {
    fn documents(&self) -> &DocumentStore<Tag> {
        &self.store
    }
}
