//! Engine configuration
//!
//! Built-in defaults overlaid by an optional TOML file. The config
//! covers where key material lives, the file names of the three key
//! files, and the LZ77 search parameters.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use secenc_crypto::RsaKeyNames;

/// Default key directory relative to the working directory.
const DEFAULT_KEY_DIR: &str = "keys";

/// Configuration load error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema.
    #[error("malformed config {path}: {source}")]
    Parse {
        /// Path that failed.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// LZ77 search parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Lz77Config {
    /// How far back the compressor searches (also the match cap).
    /// Values above [`secenc_codecs::lz77::MAX_WINDOW_SIZE`] are
    /// clamped by the codec.
    pub window_size: usize,
    /// Shortest run worth a match record.
    pub min_match_length: usize,
}

impl Default for Lz77Config {
    fn default() -> Self {
        Self {
            window_size: secenc_codecs::lz77::DEFAULT_WINDOW_SIZE,
            min_match_length: secenc_codecs::lz77::DEFAULT_MIN_MATCH_LENGTH,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding all key files.
    pub key_dir: PathBuf,
    /// Symmetric key file name.
    pub aes_key_file: String,
    /// RSA private key file name (PKCS#8 PEM).
    pub rsa_private_key_file: String,
    /// RSA public key file name (SPKI PEM).
    pub rsa_public_key_file: String,
    /// LZ77 parameters.
    pub lz77: Lz77Config,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            key_dir: PathBuf::from(DEFAULT_KEY_DIR),
            aes_key_file: "aes_key.pem".to_string(),
            rsa_private_key_file: "rsa_private_key.pem".to_string(),
            rsa_public_key_file: "rsa_public_key.pem".to_string(),
            lz77: Lz77Config::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file, falling back to defaults
    /// when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The RSA key pair file names from this config.
    pub fn rsa_key_names(&self) -> RsaKeyNames {
        RsaKeyNames {
            private: self.rsa_private_key_file.clone(),
            public: self.rsa_public_key_file.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_defaults_cover_keys_and_lz77() {
        let config = EngineConfig::default();
        assert_eq!(config.key_dir, PathBuf::from("keys"));
        assert_eq!(config.aes_key_file, "aes_key.pem");
        assert_eq!(config.lz77.window_size, 100);
        assert_eq!(config.lz77.min_match_length, 3);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = EngineConfig::load(Path::new("/nonexistent/secenc.toml")).unwrap();
        assert_eq!(config.aes_key_file, "aes_key.pem");
    }

    #[test]
    fn partial_file_overlays_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("secenc.toml");
        std::fs::write(&path, "key_dir = \"/var/lib/secenc\"\n\n[lz77]\nwindow_size = 200\n")
            .unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.key_dir, PathBuf::from("/var/lib/secenc"));
        assert_eq!(config.lz77.window_size, 200);
        // Untouched fields keep their defaults.
        assert_eq!(config.lz77.min_match_length, 3);
        assert_eq!(config.rsa_public_key_file, "rsa_public_key.pem");
    }

    #[test]
    fn malformed_file_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("secenc.toml");
        std::fs::write(&path, "key_dir = [not toml").unwrap();
        assert!(matches!(
            EngineConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
