//! Provisioning and inspection of whole collections from plaintext JSON.
//!
//! A seed document has the same shape as a decrypted collection:
//! `{ "<collection>": [ ... ] }`.  [`Database::dump_json`] produces exactly
//! that shape, so a dump can be fed back to [`Database::seed_json`].
//! User elements carry the stored `password` field, which must already be an
//! Argon2 PHC hash.

use std::fmt;
use std::str::FromStr;

use agora_shared::password;
use serde_json::Value;
use tracing::info;

use crate::collection::{self, Entity};
use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::{Chat, Message, Post, Tag, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Users,
    Chats,
    Messages,
    Posts,
    Tags,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 5] = [
        CollectionKind::Users,
        CollectionKind::Chats,
        CollectionKind::Messages,
        CollectionKind::Posts,
        CollectionKind::Tags,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CollectionKind::Users => User::COLLECTION,
            CollectionKind::Chats => Chat::COLLECTION,
            CollectionKind::Messages => Message::COLLECTION,
            CollectionKind::Posts => Post::COLLECTION,
            CollectionKind::Tags => Tag::COLLECTION,
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for CollectionKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        CollectionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| StoreError::InvalidCollectionName(s.to_string()))
    }
}

fn no_extra_checks<E>(_: &E) -> Result<()> {
    Ok(())
}

fn stored_password_is_hashed(user: &User) -> Result<()> {
    password::check_hash(user.password_hash()).map_err(|_| {
        StoreError::InvalidEntity(format!("user {}: stored password is not a PHC hash", user.id))
    })
}

impl Database {
    /// Replace the whole `kind` collection with the entities in `json`.
    ///
    /// The document is fully validated first: it must hold the collection's
    /// array and every element must materialize.  Nothing is written when
    /// validation fails.  Returns the number of entities written.
    pub fn seed_json(&self, kind: CollectionKind, json: &str) -> Result<usize> {
        match kind {
            CollectionKind::Users => self.seed::<User>(json, stored_password_is_hashed),
            CollectionKind::Chats => self.seed::<Chat>(json, |chat| {
                Chat::id_for(&chat.user_a, &chat.user_b).and_then(|id| {
                    if id == chat.id {
                        Ok(())
                    } else {
                        Err(StoreError::InvalidEntity(format!(
                            "chat {} should have id {id}",
                            chat.id
                        )))
                    }
                })
            }),
            CollectionKind::Messages => self.seed::<Message>(json, no_extra_checks),
            CollectionKind::Posts => self.seed::<Post>(json, no_extra_checks),
            CollectionKind::Tags => self.seed::<Tag>(json, no_extra_checks),
        }
    }

    /// The decrypted `kind` collection as pretty-printed JSON.
    pub fn dump_json(&self, kind: CollectionKind) -> Result<String> {
        match kind {
            CollectionKind::Users => self.dump::<User>(),
            CollectionKind::Chats => self.dump::<Chat>(),
            CollectionKind::Messages => self.dump::<Message>(),
            CollectionKind::Posts => self.dump::<Post>(),
            CollectionKind::Tags => self.dump::<Tag>(),
        }
    }

    /// Load every collection and report its size, or why it failed to load.
    pub fn check(&self) -> Vec<(CollectionKind, Result<usize>)> {
        CollectionKind::ALL
            .into_iter()
            .map(|kind| {
                let count = match kind {
                    CollectionKind::Users => self.store::<User>().find_all().map(|v| v.len()),
                    CollectionKind::Chats => self.store::<Chat>().find_all().map(|v| v.len()),
                    CollectionKind::Messages => self.store::<Message>().find_all().map(|v| v.len()),
                    CollectionKind::Posts => self.store::<Post>().find_all().map(|v| v.len()),
                    CollectionKind::Tags => self.store::<Tag>().find_all().map(|v| v.len()),
                };
                (kind, count)
            })
            .collect()
    }

    fn seed<E: Entity>(&self, json: &str, check: impl Fn(&E) -> Result<()>) -> Result<usize> {
        let name = E::COLLECTION;
        let invalid = |cause| StoreError::InvalidSeed { collection: name, cause };

        let documents = collection::parse_document(name, json).map_err(invalid)?;
        let entities: Vec<E> = collection::materialize(documents).map_err(invalid)?;
        for entity in &entities {
            check(entity)?;
        }

        self.store::<E>().replace_all(&entities)?;
        info!(collection = name, entities = entities.len(), "collection seeded");
        Ok(entities.len())
    }

    fn dump<E: Entity>(&self) -> Result<String> {
        let collection = E::COLLECTION;
        let entities = self.store::<E>().find_all()?;
        let encode = |e: serde_json::Error| StoreError::Encode {
            collection,
            reason: e.to_string(),
        };

        let documents = entities
            .iter()
            .map(E::to_document)
            .collect::<serde_json::Result<Vec<_>>>()
            .map_err(encode)?;
        let mut root = serde_json::Map::new();
        root.insert(collection.to_string(), Value::Array(documents));
        serde_json::to_string_pretty(&Value::Object(root)).map_err(encode)
    }
}
