use crate::collection::{DocumentStore, ReadCollection, WriteCollection};
use crate::error::Result;
use crate::models::{Message, MessageField};
use crate::query::Predicate;

#[derive(Clone)]
pub struct MessageRepository {
    store: DocumentStore<Message>,
}

impl MessageRepository {
    pub fn new(store: DocumentStore<Message>) -> Self {
        Self { store }
    }

    /// All messages of a conversation, oldest first.  Messages with equal
    /// timestamps keep their stored order.
    pub fn find_by_conversation_id(&self, conversation_id: &str) -> Result<Vec<Message>> {
        let mut messages =
            self.find_where(&Predicate::eq(MessageField::ConversationId, conversation_id))?;
        messages.sort_by_key(|m| m.timestamp);
        Ok(messages)
    }

    /// Messages in `chat_id` sent by someone other than `user_id` that were
    /// not delivered.
    pub fn count_unread_by_chat(&self, chat_id: &str, user_id: &str) -> Result<usize> {
        let predicate = Predicate::eq(MessageField::ConversationId, chat_id)
            .and(Predicate::eq(MessageField::Delivered, false));
        Ok(self
            .find_where(&predicate)?
            .into_iter()
            .filter(|m| m.sender_id != user_id)
            .count())
    }

    /// Flag every undelivered message `reader_id` received in `chat_id` as
    /// delivered, in a single write.  Returns how many were flagged.
    pub fn mark_delivered(&self, chat_id: &str, reader_id: &str) -> Result<usize> {
        self.update_where(|m| {
            if m.conversation_id != chat_id || m.sender_id == reader_id || m.delivered {
                return false;
            }
            m.delivered = true;
            true
        })
    }
}

impl ReadCollection<Message> for MessageRepository {
    fn documents(&self) -> &DocumentStore<Message> {
        &self.store
    }
}

impl WriteCollection<Message> for MessageRepository {}
