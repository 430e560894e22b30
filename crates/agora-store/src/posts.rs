//! Repository for [`Post`] records: plain CRUD.

use crate::collection::{DocumentStore, ReadCollection, WriteCollection};
use crate::models::Post;

#[derive(Clone)]
pub struct PostRepository {
    store: DocumentStore<Post>,
}

impl PostRepository {
    pub fn new(store: DocumentStore<Post>) -> Self {
        Self { store }
    }
}

impl ReadCollection<Post> for PostRepository {
    fn documents(&self) -> &DocumentStore<Post> {
        &self.store
    }
}

impl WriteCollection<Post> for PostRepository {}
