//! Database handle.
//!
//! A [`Database`] owns the byte store and the codec and hands out one
//! repository per collection.  Repositories are cheap to create; each one
//! shares the same backend.

use std::path::Path;
use std::sync::Arc;

use agora_shared::Codec;

use crate::byte_store::{ByteStore, FileByteStore};
use crate::chats::ChatRepository;
use crate::collection::{DocumentStore, Entity};
use crate::error::Result;
use crate::messages::MessageRepository;
use crate::posts::PostRepository;
use crate::tags::TagRepository;
use crate::users::UserRepository;

#[derive(Clone)]
pub struct Database {
    bytes: Arc<dyn ByteStore>,
    codec: Arc<Codec>,
}

impl Database {
    /// Open (or create) a database whose collections live as encrypted files
    /// under `path`.
    pub fn open_at(path: impl AsRef<Path>, codec: Codec) -> Result<Self> {
        let path = path.as_ref();
        let bytes = FileByteStore::new(path)?;
        tracing::info!(path = %path.display(), "opening database");
        Ok(Self::with_backend(Arc::new(bytes), codec))
    }

    /// Use an arbitrary byte store, e.g. [`MemoryByteStore`](crate::MemoryByteStore)
    /// in tests.
    pub fn with_backend(bytes: Arc<dyn ByteStore>, codec: Codec) -> Self {
        Self {
            bytes,
            codec: Arc::new(codec),
        }
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.store())
    }

    pub fn chats(&self) -> ChatRepository {
        ChatRepository::new(self.store())
    }

    pub fn messages(&self) -> MessageRepository {
        MessageRepository::new(self.store())
    }

    pub fn posts(&self) -> PostRepository {
        PostRepository::new(self.store())
    }

    pub fn tags(&self) -> TagRepository {
        TagRepository::new(DocumentStore::open_read_only(
            Arc::clone(&self.bytes),
            Arc::clone(&self.codec),
        ))
    }

    /// A writable engine for `E`.  Seeding uses this to provision read-only
    /// collections.
    pub(crate) fn store<E: Entity>(&self) -> DocumentStore<E> {
        DocumentStore::open(Arc::clone(&self.bytes), Arc::clone(&self.codec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{ReadCollection, WriteCollection};
    use crate::models::{Chat, NewUser, User};
    use agora_shared::crypto::generate_symmetric_key;

    #[test]
    fn open_at_creates_directory_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("db");
        let key = generate_symmetric_key();

        let db = Database::open_at(&path, Codec::new(key)).unwrap();
        let user = User::register(
            NewUser {
                name: "Ana".into(),
                email: "ana@example.com".into(),
                ..Default::default()
            },
            "pw",
        )
        .unwrap();
        db.users().add(user.clone()).unwrap();
        assert!(path.join("users.json.enc").exists());

        let reopened = Database::open_at(&path, Codec::new(key)).unwrap();
        assert_eq!(reopened.users().find_by_id(&user.id).unwrap(), Some(user));
    }

    #[test]
    fn repositories_share_one_backend() {
        let bytes = Arc::new(crate::MemoryByteStore::new());
        let db = Database::with_backend(bytes.clone(), Codec::new(generate_symmetric_key()));

        db.chats().add(Chat::new("a", "b").unwrap()).unwrap();
        assert_eq!(db.chats().find_all().unwrap().len(), 1);
        assert!(bytes.raw("chats").unwrap().is_some());
        assert!(bytes.raw("users").unwrap().is_none());
    }
}
