//! Application configuration loaded from environment variables.
//!
//! The database key is mandatory; everything else has a default so the admin
//! tool can run against `./db` with only a key exported.

use std::path::PathBuf;

use agora_shared::constants::{DEFAULT_DATA_PATH, ENV_DATA_PATH, ENV_DB_KEY, ENV_DB_PASSPHRASE};
use agora_shared::Codec;

use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding one encrypted file per collection.
    /// Env: `AGORA_DATA_PATH`
    /// Default: `./db`
    pub data_path: PathBuf,

    /// Codec built from `AGORA_DB_KEY` (hex or base64, 32 bytes) or, when
    /// that is unset, derived from `AGORA_DB_PASSPHRASE`.
    pub codec: Codec,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let codec = match (lookup(ENV_DB_KEY), lookup(ENV_DB_PASSPHRASE)) {
            (Some(encoded), passphrase) => {
                if passphrase.is_some() {
                    tracing::warn!(
                        "both {ENV_DB_KEY} and {ENV_DB_PASSPHRASE} are set, using {ENV_DB_KEY}"
                    );
                }
                Codec::from_encoded_key(&encoded).map_err(|source| ConfigError::InvalidKey {
                    var: ENV_DB_KEY,
                    source,
                })?
            }
            (None, Some(passphrase)) if !passphrase.is_empty() => {
                Codec::from_passphrase(&passphrase)
            }
            (None, _) => {
                return Err(ConfigError::MissingKey {
                    key_var: ENV_DB_KEY,
                    passphrase_var: ENV_DB_PASSPHRASE,
                })
            }
        };

        let data_path = lookup(ENV_DATA_PATH)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        Ok(Self { data_path, codec })
    }
}
