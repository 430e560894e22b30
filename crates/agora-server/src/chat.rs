//! Direct chats between two users.

use std::sync::Arc;

use agora_store::{
    Chat, ChatRepository, Database, Entity, Message, MessageRepository, ReadCollection,
    StoreError, User, WriteCollection,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::accounts::AccountService;
use crate::error::{Result, ServiceError};
use crate::locks::CollectionLocks;
use crate::presence::Presence;

/// One line of a user's chat list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatSummary {
    pub chat_id: String,
    pub other_user_id: String,
    /// `None` when the other account no longer exists.
    pub other_user_name: Option<String>,
    pub last_message_at: DateTime<Utc>,
    pub unread: usize,
}

#[derive(Clone)]
pub struct ChatService {
    accounts: AccountService,
    chats: ChatRepository,
    messages: MessageRepository,
    presence: Arc<dyn Presence>,
    locks: CollectionLocks,
}

impl ChatService {
    pub fn new(db: &Database, locks: CollectionLocks, presence: Arc<dyn Presence>) -> Self {
        Self {
            accounts: AccountService::new(db, locks.clone()),
            chats: db.chats(),
            messages: db.messages(),
            presence,
            locks,
        }
    }

    /// A user came online.
    pub fn connect(&self, user_id: &str) -> Result<User> {
        let user = self.accounts.set_status(user_id, true)?;
        self.presence.set_online(user_id, true);
        Ok(user)
    }

    /// A user went offline.
    pub fn disconnect(&self, user_id: &str) -> Result<User> {
        self.presence.set_online(user_id, false);
        self.accounts.set_status(user_id, false)
    }

    /// The chat between `user_a` and `user_b`, created if it does not exist
    /// yet.  Both users must exist.
    pub fn start_chat(&self, user_a: &str, user_b: &str) -> Result<Chat> {
        Chat::id_for(user_a, user_b).map_err(bad_request)?;
        self.accounts.user(user_a)?;
        self.accounts.user(user_b)?;

        self.locks.with(Chat::COLLECTION, || -> Result<Chat> {
            if let Some(chat) = self.chats.find_chat_by_users(user_a, user_b)? {
                debug!(chat = %chat.id, "chat already exists");
                return Ok(chat);
            }
            let chat = self.chats.add(Chat::new(user_a, user_b).map_err(bad_request)?)?;
            info!(chat = %chat.id, "chat started");
            Ok(chat)
        })
    }

    /// Store a message from `sender_id`.  It counts as delivered when the
    /// recipient is online at send time.
    pub fn send_message(&self, sender_id: &str, chat_id: &str, content: &str) -> Result<Message> {
        if content.trim().is_empty() {
            return Err(ServiceError::BadRequest("message content is empty".into()));
        }

        let chat = self.chat(chat_id)?;
        let recipient = chat
            .other_participant(sender_id)
            .ok_or_else(|| ServiceError::NotAParticipant {
                user: sender_id.to_string(),
                chat: chat_id.to_string(),
            })?;
        let delivered = self.presence.is_online(recipient);

        let message = self.locks.with(Message::COLLECTION, || {
            self.messages
                .add(Message::new(&chat.id, sender_id, content, delivered))
        })?;

        self.locks.with(Chat::COLLECTION, || -> Result<()> {
            if let Some(mut current) = self.chats.find_by_id(&chat.id)? {
                if current.last_message_at < message.timestamp {
                    current.last_message_at = message.timestamp;
                    self.chats.update(current)?;
                }
            }
            Ok(())
        })?;

        info!(chat = %chat.id, message = %message.id, delivered, "message sent");
        Ok(message)
    }

    /// Messages of a chat, oldest first.
    pub fn history(&self, chat_id: &str) -> Result<Vec<Message>> {
        self.chat(chat_id)?;
        Ok(self.messages.find_by_conversation_id(chat_id)?)
    }

    /// Flag every message `reader_id` received in `chat_id` as delivered.
    /// Returns how many messages changed.
    pub fn mark_read(&self, reader_id: &str, chat_id: &str) -> Result<usize> {
        let chat = self.chat(chat_id)?;
        if !chat.has_participant(reader_id) {
            return Err(ServiceError::NotAParticipant {
                user: reader_id.to_string(),
                chat: chat_id.to_string(),
            });
        }

        let changed = self.locks.with(Message::COLLECTION, || {
            self.messages.mark_delivered(chat_id, reader_id)
        })?;

        debug!(chat = chat_id, reader = reader_id, changed, "messages marked read");
        Ok(changed)
    }

    /// Every chat of `user_id`, most recently active first.
    pub fn chats_for_user(&self, user_id: &str) -> Result<Vec<ChatSummary>> {
        let mut summaries = Vec::new();
        for chat in self.chats.find_all_by_user(user_id)? {
            let Some(other) = chat.other_participant(user_id) else {
                continue;
            };
            let other_user_name = match self.accounts.user(other) {
                Ok(user) => Some(user.name),
                Err(ServiceError::UserNotFound(_)) => None,
                Err(e) => return Err(e),
            };
            summaries.push(ChatSummary {
                unread: self.messages.count_unread_by_chat(&chat.id, user_id)?,
                other_user_id: other.to_string(),
                other_user_name,
                last_message_at: chat.last_message_at,
                chat_id: chat.id,
            });
        }

        summaries.sort_by(|a, b| b.last_message_at.cmp(&a.last_message_at));
        Ok(summaries)
    }

    fn chat(&self, chat_id: &str) -> Result<Chat> {
        self.chats
            .find_by_id(chat_id)?
            .ok_or_else(|| ServiceError::ChatNotFound(chat_id.to_string()))
    }
}

fn bad_request(e: StoreError) -> ServiceError {
    match e {
        StoreError::InvalidEntity(reason) => ServiceError::BadRequest(reason),
        other => ServiceError::Store(other),
    }
}
