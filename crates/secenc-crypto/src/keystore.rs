//! Key lifecycle management
//!
//! Key material is supplied to the ciphers through the [`KeyProvider`]
//! capability, keeping filesystem access out of cipher logic. The
//! production implementation is [`FsKeyStore`], which generates keys
//! lazily on first request and loads them unchanged thereafter;
//! [`MemoryKeyStore`] is the in-memory stand-in for tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rand::rngs::OsRng;
use rand::RngCore;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::error::{CryptoError, Result};

/// Symmetric key size in bytes (256 bits).
pub const SYMMETRIC_KEY_SIZE: usize = 32;

/// RSA modulus size in bits.
pub const RSA_KEY_BITS: usize = 2048;

/// File names of the two halves of an RSA key pair.
#[derive(Debug, Clone)]
pub struct RsaKeyNames {
    /// Private half (PKCS#8 PEM).
    pub private: String,
    /// Public half (SPKI PEM).
    pub public: String,
}

/// Capability that supplies key material to the ciphers.
///
/// Implementations decide where keys live and when they are created;
/// ciphers borrow the returned material per call and never cache it.
pub trait KeyProvider {
    /// Return the 256-bit symmetric key with the given logical name,
    /// creating it if it does not exist yet.
    fn symmetric_key(&self, name: &str) -> Result<Vec<u8>>;

    /// Return the RSA public key for the named pair, generating or
    /// deriving it if absent. An existing public half alone is
    /// sufficient for encryption-only callers.
    fn rsa_public_key(&self, names: &RsaKeyNames) -> Result<RsaPublicKey>;

    /// Return the RSA private key for the named pair, generating the
    /// full pair if absent.
    fn rsa_private_key(&self, names: &RsaKeyNames) -> Result<RsaPrivateKey>;
}

/// Filesystem-backed key store.
///
/// Generation on first use is not safe under concurrent first callers
/// for the same name: two simultaneous requests may race to create two
/// different keys. Callers needing strict single-writer semantics must
/// serialize key creation externally. Once a key file exists it is
/// treated as immutable and concurrent readers need no coordination.
#[derive(Debug, Clone)]
pub struct FsKeyStore {
    root: PathBuf,
}

impl FsKeyStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Backing file for a logical key name.
    pub fn key_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn unavailable(path: &Path, err: impl std::fmt::Display) -> CryptoError {
        CryptoError::KeyUnavailable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    fn write_key(path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Self::unavailable(path, e))?;
        }
        fs::write(path, bytes).map_err(|e| Self::unavailable(path, e))
    }

    fn generate_rsa_pair(&self, names: &RsaKeyNames) -> Result<(RsaPrivateKey, RsaPublicKey)> {
        let private_path = self.key_path(&names.private);
        let private = RsaPrivateKey::new(&mut OsRng, RSA_KEY_BITS)
            .map_err(|e| Self::unavailable(&private_path, format!("generation failed: {e}")))?;
        let public = RsaPublicKey::from(&private);

        let private_pem = private
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        let public_pem = public
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;

        Self::write_key(&private_path, private_pem.as_bytes())?;
        Self::write_key(&self.key_path(&names.public), public_pem.as_bytes())?;
        tracing::info!(path = %private_path.display(), "generated new RSA-2048 key pair");
        Ok((private, public))
    }

    fn load_private(&self, path: &Path) -> Result<RsaPrivateKey> {
        let pem = fs::read_to_string(path).map_err(|e| Self::unavailable(path, e))?;
        RsaPrivateKey::from_pkcs8_pem(&pem)
            .map_err(|e| CryptoError::InvalidKey(format!("{}: {e}", path.display())))
    }
}

impl KeyProvider for FsKeyStore {
    fn symmetric_key(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.key_path(name);
        if !path.exists() {
            let mut key = vec![0u8; SYMMETRIC_KEY_SIZE];
            OsRng.fill_bytes(&mut key);
            Self::write_key(&path, &key)?;
            tracing::info!(path = %path.display(), "generated new symmetric key");
            return Ok(key);
        }

        let key = fs::read(&path).map_err(|e| Self::unavailable(&path, e))?;
        if key.len() != SYMMETRIC_KEY_SIZE {
            return Err(CryptoError::InvalidKey(format!(
                "{}: expected {SYMMETRIC_KEY_SIZE} bytes, found {}",
                path.display(),
                key.len()
            )));
        }
        Ok(key)
    }

    fn rsa_public_key(&self, names: &RsaKeyNames) -> Result<RsaPublicKey> {
        let public_path = self.key_path(&names.public);
        if public_path.exists() {
            let pem =
                fs::read_to_string(&public_path).map_err(|e| Self::unavailable(&public_path, e))?;
            return RsaPublicKey::from_public_key_pem(&pem)
                .map_err(|e| CryptoError::InvalidKey(format!("{}: {e}", public_path.display())));
        }

        let private_path = self.key_path(&names.private);
        if private_path.exists() {
            // Derive and persist the missing public half from the
            // existing private key so the pair stays matched.
            let private = self.load_private(&private_path)?;
            let public = RsaPublicKey::from(&private);
            let pem = public
                .to_public_key_pem(LineEnding::LF)
                .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
            Self::write_key(&public_path, pem.as_bytes())?;
            return Ok(public);
        }

        let (_, public) = self.generate_rsa_pair(names)?;
        Ok(public)
    }

    fn rsa_private_key(&self, names: &RsaKeyNames) -> Result<RsaPrivateKey> {
        let private_path = self.key_path(&names.private);
        if private_path.exists() {
            return self.load_private(&private_path);
        }
        let (private, _) = self.generate_rsa_pair(names)?;
        Ok(private)
    }
}

/// In-memory key provider for tests.
///
/// Keys are generated on first request and held for the lifetime of the
/// store, mirroring the generate-or-load contract without touching the
/// filesystem.
#[derive(Default)]
pub struct MemoryKeyStore {
    symmetric: Mutex<HashMap<String, Vec<u8>>>,
    rsa: Mutex<HashMap<String, RsaPrivateKey>>,
}

impl MemoryKeyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn rsa_pair(&self, names: &RsaKeyNames) -> Result<RsaPrivateKey> {
        let mut rsa = self
            .rsa
            .lock()
            .map_err(|_| CryptoError::InvalidKey("key store mutex poisoned".into()))?;
        if let Some(private) = rsa.get(&names.private) {
            return Ok(private.clone());
        }
        let private = RsaPrivateKey::new(&mut OsRng, RSA_KEY_BITS).map_err(|e| {
            CryptoError::KeyUnavailable {
                path: PathBuf::from(&names.private),
                reason: format!("generation failed: {e}"),
            }
        })?;
        rsa.insert(names.private.clone(), private.clone());
        Ok(private)
    }
}

impl KeyProvider for MemoryKeyStore {
    fn symmetric_key(&self, name: &str) -> Result<Vec<u8>> {
        let mut symmetric = self
            .symmetric
            .lock()
            .map_err(|_| CryptoError::InvalidKey("key store mutex poisoned".into()))?;
        if let Some(key) = symmetric.get(name) {
            return Ok(key.clone());
        }
        let mut key = vec![0u8; SYMMETRIC_KEY_SIZE];
        OsRng.fill_bytes(&mut key);
        symmetric.insert(name.to_string(), key.clone());
        Ok(key)
    }

    fn rsa_public_key(&self, names: &RsaKeyNames) -> Result<RsaPublicKey> {
        Ok(RsaPublicKey::from(&self.rsa_pair(names)?))
    }

    fn rsa_private_key(&self, names: &RsaKeyNames) -> Result<RsaPrivateKey> {
        self.rsa_pair(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names() -> RsaKeyNames {
        RsaKeyNames {
            private: "rsa_private_key.pem".to_string(),
            public: "rsa_public_key.pem".to_string(),
        }
    }

    #[test]
    fn symmetric_key_is_created_then_reloaded() {
        let dir = TempDir::new().unwrap();
        let store = FsKeyStore::new(dir.path());

        let path = store.key_path("aes_key.pem");
        assert!(!path.exists());

        let first = store.symmetric_key("aes_key.pem").unwrap();
        assert!(path.exists());
        assert_eq!(first.len(), SYMMETRIC_KEY_SIZE);
        assert_eq!(fs::read(&path).unwrap(), first);

        let second = store.symmetric_key("aes_key.pem").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn preseeded_symmetric_key_is_returned_verbatim() {
        let dir = TempDir::new().unwrap();
        let store = FsKeyStore::new(dir.path());

        let key = vec![7u8; SYMMETRIC_KEY_SIZE];
        fs::write(store.key_path("seeded.bin"), &key).unwrap();
        assert_eq!(store.symmetric_key("seeded.bin").unwrap(), key);
    }

    #[test]
    fn short_symmetric_key_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = FsKeyStore::new(dir.path());

        fs::write(store.key_path("short.bin"), [1u8; 5]).unwrap();
        assert!(matches!(
            store.symmetric_key("short.bin"),
            Err(CryptoError::InvalidKey(_))
        ));
    }

    #[test]
    fn rsa_pair_is_generated_once_and_persisted() {
        let dir = TempDir::new().unwrap();
        let store = FsKeyStore::new(dir.path());
        let names = names();

        let private = store.rsa_private_key(&names).unwrap();
        assert!(store.key_path(&names.private).exists());
        assert!(store.key_path(&names.public).exists());

        let public = store.rsa_public_key(&names).unwrap();
        assert_eq!(public, RsaPublicKey::from(&private));
    }

    #[test]
    fn public_half_is_derived_from_existing_private() {
        let dir = TempDir::new().unwrap();
        let store = FsKeyStore::new(dir.path());
        let names = names();

        let private = store.rsa_private_key(&names).unwrap();
        fs::remove_file(store.key_path(&names.public)).unwrap();

        let public = store.rsa_public_key(&names).unwrap();
        assert_eq!(public, RsaPublicKey::from(&private));
        assert!(store.key_path(&names.public).exists());
    }

    #[test]
    fn memory_store_returns_stable_keys() {
        let store = MemoryKeyStore::new();
        let a = store.symmetric_key("k").unwrap();
        let b = store.symmetric_key("k").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, store.symmetric_key("other").unwrap());
    }
}
