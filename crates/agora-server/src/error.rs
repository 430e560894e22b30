use agora_shared::{KeyError, PasswordError};
use agora_store::StoreError;
use thiserror::Error;

/// Errors returned by the application services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("A user with email {0:?} already exists")]
    UserAlreadyExists(String),

    /// Login failed.  Deliberately does not say whether the email or the
    /// password was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Chat not found: {0}")]
    ChatNotFound(String),

    #[error("Tag not found: {0}")]
    TagNotFound(String),

    #[error("User {user} is not a participant of chat {chat}")]
    NotAParticipant { user: String, chat: String },

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised while loading [`AppConfig`](crate::config::AppConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No database key configured: set {key_var} or {passphrase_var}")]
    MissingKey {
        key_var: &'static str,
        passphrase_var: &'static str,
    },

    #[error("Invalid {var}: {source}")]
    InvalidKey {
        var: &'static str,
        #[source]
        source: KeyError,
    },
}

pub type Result<T> = std::result::Result<T, ServiceError>;
