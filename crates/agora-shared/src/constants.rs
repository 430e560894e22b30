/// XChaCha20-Poly1305 nonce size in bytes
pub const NONCE_SIZE: usize = 24;

/// Poly1305 authentication tag size in bytes
pub const TAG_SIZE: usize = 16;

/// Symmetric key size in bytes (for XChaCha20-Poly1305)
pub const SYMMETRIC_KEY_SIZE: usize = 32;

/// Key derivation context (BLAKE3) for turning a passphrase into the
/// collection encryption key
pub const KDF_CONTEXT_DB_KEY: &str = "agora-db-key-v1";

/// File extension of an encrypted collection document
pub const COLLECTION_FILE_EXTENSION: &str = "json.enc";

/// Separator between the two participant ids of a chat id
pub const CHAT_ID_SEPARATOR: char = ':';

/// Environment variable holding the hex or base64 collection key
pub const ENV_DB_KEY: &str = "AGORA_DB_KEY";

/// Environment variable holding a passphrase to derive the collection key from
pub const ENV_DB_PASSPHRASE: &str = "AGORA_DB_PASSPHRASE";

/// Environment variable holding the base storage directory
pub const ENV_DATA_PATH: &str = "AGORA_DATA_PATH";

/// Default base storage directory
pub const DEFAULT_DATA_PATH: &str = "./db";
