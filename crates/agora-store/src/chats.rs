//! Repository for [`Chat`] records.

use tracing::debug;

use crate::collection::{DocumentStore, ReadCollection, WriteCollection};
use crate::error::Result;
use crate::models::{Chat, ChatField};
use crate::query::Predicate;

#[derive(Clone)]
pub struct ChatRepository {
    store: DocumentStore<Chat>,
}

impl ChatRepository {
    pub fn new(store: DocumentStore<Chat>) -> Self {
        Self { store }
    }

    /// The chat between two users, in either argument order.
    ///
    /// A pair that cannot form a chat id (empty, equal, or containing the
    /// separator) has no chat, so it yields `None`.
    pub fn find_chat_by_users(&self, user_a: &str, user_b: &str) -> Result<Option<Chat>> {
        match Chat::id_for(user_a, user_b) {
            Ok(id) => self.find_by_id(&id),
            Err(e) => {
                debug!(user_a, user_b, error = %e, "no chat possible for pair");
                Ok(None)
            }
        }
    }

    /// Every chat in which `user_id` is either participant.
    pub fn find_all_by_user(&self, user_id: &str) -> Result<Vec<Chat>> {
        let predicate =
            Predicate::eq(ChatField::UserA, user_id).or(Predicate::eq(ChatField::UserB, user_id));
        self.find_where(&predicate)
    }
}

impl ReadCollection<Chat> for ChatRepository {
    fn documents(&self) -> &DocumentStore<Chat> {
        &self.store
    }
}

impl WriteCollection<Chat> for ChatRepository {}
