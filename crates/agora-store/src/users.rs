//! Repository for [`User`] records.
//!
//! The store enforces no uniqueness: callers check `find_by_email` before
//! registering an account.

use crate::collection::{DocumentStore, ReadCollection, WriteCollection};
use crate::error::Result;
use crate::models::{User, UserField};

#[derive(Clone)]
pub struct UserRepository {
    store: DocumentStore<User>,
}

impl UserRepository {
    pub fn new(store: DocumentStore<User>) -> Self {
        Self { store }
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.find_by_attribute(UserField::Email, email)
    }

    /// Look a user up by display name.
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.find_by_attribute(UserField::Name, username)
    }
}

impl ReadCollection<User> for UserRepository {
    fn documents(&self) -> &DocumentStore<User> {
        &self.store
    }
}

impl WriteCollection<User> for UserRepository {}
