//! Domain entities persisted in the encrypted collections.
//!
//! Every struct derives `Serialize` and `Deserialize`; the derived JSON shape
//! is the on-disk element shape.  Timestamps serialize as RFC 3339 strings and
//! `date_of_birth` as `YYYY-MM-DD`.

use agora_shared::constants::CHAT_ID_SEPARATOR;
use agora_shared::password;
use agora_shared::PasswordError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::collection::Entity;
use crate::error::{Result, StoreError};
use crate::query::{FieldValue, Queryable};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A registered account.  `email` is the login key.
///
/// The stored `password` field only ever holds an Argon2 PHC hash.  A `User`
/// is obtained either from [`User::register`], which always hashes the raw
/// password, or by reading it back from the store, which carries the stored
/// hash through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    /// Display name.
    pub name: String,
    pub email: String,
    #[serde(rename = "password")]
    password_hash: String,
    pub is_active: bool,
    #[serde(default)]
    pub career: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Ids of the tags the user follows.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Profile data for a new account, minus the password.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub career: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl User {
    /// Build an active account, hashing `raw_password`.
    pub fn register(
        profile: NewUser,
        raw_password: &str,
    ) -> std::result::Result<Self, PasswordError> {
        Ok(Self {
            id: profile.id.unwrap_or_else(new_id),
            name: profile.name,
            email: profile.email,
            password_hash: password::hash_password(raw_password)?,
            is_active: true,
            career: profile.career,
            gender: profile.gender,
            date_of_birth: profile.date_of_birth,
            bio: profile.bio,
            avatar_url: profile.avatar_url,
            tags: profile.tags,
        })
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn verify_password(&self, raw_password: &str) -> std::result::Result<bool, PasswordError> {
        password::verify_password(raw_password, &self.password_hash)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Id,
    Name,
    Email,
    IsActive,
    Career,
    Gender,
}

impl Entity for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Queryable for User {
    type Field = UserField;

    fn field(&self, field: UserField) -> FieldValue<'_> {
        match field {
            UserField::Id => FieldValue::Str(&self.id),
            UserField::Name => FieldValue::Str(&self.name),
            UserField::Email => FieldValue::Str(&self.email),
            UserField::IsActive => FieldValue::Bool(self.is_active),
            UserField::Career => self.career.as_deref().into(),
            UserField::Gender => self.gender.as_deref().into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// A direct conversation between two users.
///
/// The id is derived from the participants: both ids sorted and joined with
/// `:`, so there is exactly one chat per unordered pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chat {
    pub id: String,
    pub user_a: String,
    pub user_b: String,
    pub last_message_at: DateTime<Utc>,
}

impl Chat {
    pub fn new(user_a: &str, user_b: &str) -> Result<Self> {
        Ok(Self {
            id: Self::id_for(user_a, user_b)?,
            user_a: user_a.to_string(),
            user_b: user_b.to_string(),
            last_message_at: Utc::now(),
        })
    }

    /// Deterministic id for the pair, independent of argument order.
    ///
    /// Participant ids must be non-empty, distinct, and free of the
    /// separator, otherwise two different pairs could share an id.
    pub fn id_for(user_a: &str, user_b: &str) -> Result<String> {
        for participant in [user_a, user_b] {
            if participant.is_empty() {
                return Err(StoreError::InvalidEntity("chat participant id is empty".into()));
            }
            if participant.contains(CHAT_ID_SEPARATOR) {
                return Err(StoreError::InvalidEntity(format!(
                    "chat participant id {participant:?} contains {CHAT_ID_SEPARATOR:?}"
                )));
            }
        }
        if user_a == user_b {
            return Err(StoreError::InvalidEntity(format!(
                "chat needs two distinct participants, got {user_a:?} twice"
            )));
        }

        let (first, second) = if user_a <= user_b {
            (user_a, user_b)
        } else {
            (user_b, user_a)
        };
        Ok(format!("{first}{CHAT_ID_SEPARATOR}{second}"))
    }

    pub fn has_participant(&self, user_id: &str) -> bool {
        self.user_a == user_id || self.user_b == user_id
    }

    /// The participant that is not `user_id`, if `user_id` is in the chat.
    pub fn other_participant(&self, user_id: &str) -> Option<&str> {
        if self.user_a == user_id {
            Some(&self.user_b)
        } else if self.user_b == user_id {
            Some(&self.user_a)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatField {
    Id,
    UserA,
    UserB,
}

impl Entity for Chat {
    const COLLECTION: &'static str = "chats";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Queryable for Chat {
    type Field = ChatField;

    fn field(&self, field: ChatField) -> FieldValue<'_> {
        match field {
            ChatField::Id => FieldValue::Str(&self.id),
            ChatField::UserA => FieldValue::Str(&self.user_a),
            ChatField::UserB => FieldValue::Str(&self.user_b),
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A single direct message.  `delivered` records whether the recipient was
/// reachable when it was sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    /// Id of the [`Chat`] this message belongs to.
    pub conversation_id: String,
    pub sender_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub delivered: bool,
}

impl Message {
    pub fn new(conversation_id: &str, sender_id: &str, content: &str, delivered: bool) -> Self {
        Self {
            id: new_id(),
            conversation_id: conversation_id.to_string(),
            sender_id: sender_id.to_string(),
            content: content.to_string(),
            timestamp: Utc::now(),
            delivered,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageField {
    Id,
    ConversationId,
    SenderId,
    Delivered,
}

impl Entity for Message {
    const COLLECTION: &'static str = "messages";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Queryable for Message {
    type Field = MessageField;

    fn field(&self, field: MessageField) -> FieldValue<'_> {
        match field {
            MessageField::Id => FieldValue::Str(&self.id),
            MessageField::ConversationId => FieldValue::Str(&self.conversation_id),
            MessageField::SenderId => FieldValue::Str(&self.sender_id),
            MessageField::Delivered => FieldValue::Bool(self.delivered),
        }
    }
}

// ---------------------------------------------------------------------------
// Post
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub tag_id: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl Post {
    pub fn new(user_id: &str, tag_id: &str, description: &str) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.to_string(),
            tag_id: tag_id.to_string(),
            description: description.to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostField {
    Id,
    UserId,
    TagId,
}

impl Entity for Post {
    const COLLECTION: &'static str = "posts";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Queryable for Post {
    type Field = PostField;

    fn field(&self, field: PostField) -> FieldValue<'_> {
        match field {
            PostField::Id => FieldValue::Str(&self.id),
            PostField::UserId => FieldValue::Str(&self.user_id),
            PostField::TagId => FieldValue::Str(&self.tag_id),
        }
    }
}

// ---------------------------------------------------------------------------
// Tag
// ---------------------------------------------------------------------------

/// Reference data, provisioned out of band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Tag {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            id: new_id(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    Id,
    Name,
}

impl Entity for Tag {
    const COLLECTION: &'static str = "tags";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Queryable for Tag {
    type Field = TagField;

    fn field(&self, field: TagField) -> FieldValue<'_> {
        match field {
            TagField::Id => FieldValue::Str(&self.id),
            TagField::Name => FieldValue::Str(&self.name),
        }
    }
}
