use agora_shared::CryptoError;
use thiserror::Error;

/// Errors produced by the store layer.
///
/// "Not found" is never an error: lookups return `Ok(None)`, `Ok(false)` or
/// an empty `Vec`.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The collection exists but could not be read back into entities.
    #[error("Collection `{collection}` is corrupt: {cause}")]
    CorruptCollection {
        collection: &'static str,
        #[source]
        cause: Corruption,
    },

    /// A plaintext seed document was rejected before anything was written.
    #[error("Seed for collection `{collection}` is invalid: {cause}")]
    InvalidSeed {
        collection: &'static str,
        #[source]
        cause: Corruption,
    },

    /// A mutation was attempted on a read-only collection.
    #[error("`{operation}` is not supported on read-only collection `{collection}`")]
    UnsupportedOperation {
        collection: &'static str,
        operation: &'static str,
    },

    /// The byte store failed to write the collection.  The mutation is not
    /// durable.
    #[error("Failed to persist collection `{collection}`: {source}")]
    PersistenceFailure {
        collection: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The byte store failed to read an existing collection.
    #[error("Failed to read collection `{collection}`: {source}")]
    Read {
        collection: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Serializing or encrypting the collection before a write failed.
    #[error("Failed to encode collection `{collection}`: {reason}")]
    Encode {
        collection: &'static str,
        reason: String,
    },

    /// Collection names map to file names and must stay within the base
    /// directory.
    #[error("Invalid collection name: {0:?}")]
    InvalidCollectionName(String),

    /// An entity could not be constructed from the given input.
    #[error("Invalid entity: {0}")]
    InvalidEntity(String),

    /// Generic I/O error (e.g. creating the storage directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a collection failed to load.
#[derive(Error, Debug)]
pub enum Corruption {
    #[error("{0}")]
    Decryption(#[from] CryptoError),

    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document is not an object holding a `{0}` array")]
    MissingArray(&'static str),

    #[error("element {index} does not match the entity shape: {source}")]
    Entity {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn corrupt(collection: &'static str, cause: impl Into<Corruption>) -> Self {
        StoreError::CorruptCollection {
            collection,
            cause: cause.into(),
        }
    }

    /// True when the stored blob failed authentication.
    pub fn is_decryption_failure(&self) -> bool {
        matches!(
            self,
            StoreError::CorruptCollection {
                cause: Corruption::Decryption(_),
                ..
            }
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
