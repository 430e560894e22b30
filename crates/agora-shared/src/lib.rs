//! # agora-shared
//!
//! Primitives shared by the Agora crates: the authenticated-encryption codec
//! used for collection documents, key parsing and derivation, password
//! hashing, and the common error types.

pub mod constants;
pub mod crypto;
pub mod error;
pub mod password;

pub use crypto::{Codec, SymmetricKey};
pub use error::{CryptoError, KeyError, PasswordError};
