//! secenc-crypto: key store and ciphers
//!
//! The only component of the engine that touches durable storage. Key
//! material lives behind the [`KeyProvider`] capability: the filesystem
//! store generates keys lazily on first use and loads them unchanged
//! for the life of the deployment, while ciphers borrow material
//! read-only per call.
//!
//! - `keystore`: `KeyProvider` trait, `FsKeyStore`, `MemoryKeyStore`
//! - `aead`: AES-256-GCM with per-call random nonces
//! - `oaep`: RSA-2048 OAEP-SHA256

pub mod aead;
pub mod error;
pub mod keystore;
pub mod oaep;

pub use error::{CryptoError, Result};
pub use keystore::{FsKeyStore, KeyProvider, MemoryKeyStore, RsaKeyNames};
