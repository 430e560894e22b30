//! # agora-store
//!
//! Encrypted document-collection storage for the Agora backend.
//!
//! Each collection (users, chats, messages, posts, tags) is one blob holding
//! the XChaCha20-Poly1305 ciphertext of a JSON document
//! `{ "<collection>": [ ... ] }`.  The generic [`DocumentStore`] engine loads,
//! queries and rewrites a collection on every call; the repositories in this
//! crate add the per-collection lookups on top, and [`Database`] wires them to
//! a shared [`ByteStore`] and codec.

pub mod byte_store;
pub mod chats;
pub mod collection;
pub mod database;
pub mod messages;
pub mod models;
pub mod posts;
pub mod query;
pub mod seed;
pub mod tags;
pub mod users;

mod error;

pub use byte_store::{ByteStore, FileByteStore, MemoryByteStore};
pub use chats::ChatRepository;
pub use collection::{Access, DocumentStore, Entity, ReadCollection, WriteCollection};
pub use database::Database;
pub use error::{Corruption, Result, StoreError};
pub use messages::MessageRepository;
pub use models::*;
pub use posts::PostRepository;
pub use query::{FieldValue, Predicate, Queryable, Scalar};
pub use seed::CollectionKind;
pub use tags::TagRepository;
pub use users::UserRepository;
