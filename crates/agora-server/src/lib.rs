//! # agora-server
//!
//! Application layer of the Agora backend, on top of `agora-store`:
//! - **Configuration** from environment variables (database key, data path)
//! - **Accounts**: signup with Argon2-hashed passwords, login, status
//! - **Chats**: direct chats, presence-aware delivery, unread counts
//! - **Posts**: post creation and the enriched feed
//! - **Tags**: read-only reference data
//!
//! Services serialize their writes per collection through
//! [`CollectionLocks`], since the store itself takes no locks.

pub mod accounts;
pub mod chat;
pub mod config;
pub mod error;
pub mod locks;
pub mod posts;
pub mod presence;
pub mod tags;

pub use accounts::AccountService;
pub use chat::{ChatService, ChatSummary};
pub use config::AppConfig;
pub use error::{ConfigError, ServiceError};
pub use locks::CollectionLocks;
pub use posts::{FeedItem, PostService};
pub use presence::{InMemoryPresence, Presence};
pub use tags::TagService;
