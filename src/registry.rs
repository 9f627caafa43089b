//! Operation registry
//!
//! The one seam the external request layer touches: a two-level lookup
//! from `(direction, algorithm)` names to the codec or cipher that
//! implements the operation. Both levels are enums, so dispatch is an
//! exhaustive match checked at compile time rather than a string-keyed
//! function table. Unknown names fail with `UNSUPPORTED_OPERATION`.

use secenc_codecs::{huffman, lz77, lzw, plain};
use secenc_crypto::{aead, oaep, FsKeyStore, KeyProvider};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};

/// Which way a transformation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Plain text in, artifact out.
    Encode,
    /// Artifact in, plain text out.
    Decode,
}

impl Direction {
    /// Returns the wire name of the direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Encode => "encode",
            Direction::Decode => "decode",
        }
    }

    /// Parse a wire name; `None` for anything unknown.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "encode" => Some(Direction::Encode),
            "decode" => Some(Direction::Decode),
            _ => None,
        }
    }
}

/// A registered transformation algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Base64,
    Hex,
    Utf8,
    Latin1,
    Ascii,
    UrlEscape,
    Lz77,
    Lzw,
    Huffman,
    AesGcm,
    RsaOaep,
}

impl Algorithm {
    /// Every registered algorithm, in registry order.
    pub const ALL: [Algorithm; 11] = [
        Algorithm::Base64,
        Algorithm::Hex,
        Algorithm::Utf8,
        Algorithm::Latin1,
        Algorithm::Ascii,
        Algorithm::UrlEscape,
        Algorithm::Lz77,
        Algorithm::Lzw,
        Algorithm::Huffman,
        Algorithm::AesGcm,
        Algorithm::RsaOaep,
    ];

    /// Returns the wire name of the algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Base64 => "base64",
            Algorithm::Hex => "hex",
            Algorithm::Utf8 => "utf8",
            Algorithm::Latin1 => "latin1",
            Algorithm::Ascii => "ascii",
            Algorithm::UrlEscape => "url-escape",
            Algorithm::Lz77 => "lz77",
            Algorithm::Lzw => "lzw",
            Algorithm::Huffman => "huffman",
            Algorithm::AesGcm => "aes-gcm",
            Algorithm::RsaOaep => "rsa-oaep",
        }
    }

    /// Parse a wire name; `None` for anything unknown.
    pub fn parse(name: &str) -> Option<Self> {
        Algorithm::ALL.into_iter().find(|a| a.as_str() == name)
    }

    /// Whether the algorithm needs key material.
    pub fn needs_key(&self) -> bool {
        matches!(self, Algorithm::AesGcm | Algorithm::RsaOaep)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The engine's operation registry.
///
/// Owns the configuration and the key provider; the pure codecs need
/// neither, the ciphers resolve their key files through both.
pub struct OperationRegistry {
    config: EngineConfig,
    keys: Box<dyn KeyProvider + Send + Sync>,
}

impl OperationRegistry {
    /// Build a registry with a filesystem key store rooted at the
    /// configured key directory.
    pub fn new(config: EngineConfig) -> Self {
        let keys = Box::new(FsKeyStore::new(&config.key_dir));
        Self { config, keys }
    }

    /// Build a registry with an injected key provider (tests use an
    /// in-memory store here).
    pub fn with_provider(
        config: EngineConfig,
        keys: Box<dyn KeyProvider + Send + Sync>,
    ) -> Self {
        Self { config, keys }
    }

    /// Resolve wire names into registry entries.
    pub fn resolve(&self, direction: &str, algorithm: &str) -> Result<(Direction, Algorithm)> {
        match (Direction::parse(direction), Algorithm::parse(algorithm)) {
            (Some(d), Some(a)) => Ok((d, a)),
            _ => Err(EngineError::UnsupportedOperation {
                direction: direction.to_string(),
                algorithm: algorithm.to_string(),
            }),
        }
    }

    /// Resolve and apply in one step. This is the entry point for the
    /// external request handler.
    pub fn dispatch(&self, direction: &str, algorithm: &str, text: &str) -> Result<String> {
        let (direction, algorithm) = self.resolve(direction, algorithm)?;
        self.apply(direction, algorithm, text)
    }

    /// Apply one transformation to one input.
    pub fn apply(&self, direction: Direction, algorithm: Algorithm, text: &str) -> Result<String> {
        tracing::debug!(
            direction = direction.as_str(),
            algorithm = algorithm.as_str(),
            input_len = text.len(),
            "dispatching operation"
        );

        match (direction, algorithm) {
            (Direction::Encode, Algorithm::Base64) => Ok(plain::encode_base64(text)),
            (Direction::Decode, Algorithm::Base64) => Ok(plain::decode_base64(text)?),

            (Direction::Encode, Algorithm::Hex) => Ok(plain::encode_hex(text)),
            (Direction::Decode, Algorithm::Hex) => Ok(plain::decode_hex(text)?),

            (Direction::Encode, Algorithm::Utf8) => Ok(plain::encode_utf8(text)),
            (Direction::Decode, Algorithm::Utf8) => Ok(plain::decode_utf8(text)?),

            (Direction::Encode, Algorithm::Latin1) => Ok(plain::encode_latin1(text)?),
            (Direction::Decode, Algorithm::Latin1) => Ok(plain::decode_latin1(text)?),

            (Direction::Encode, Algorithm::Ascii) => Ok(plain::encode_ascii(text)),
            (Direction::Decode, Algorithm::Ascii) => Ok(plain::decode_ascii(text)?),

            (Direction::Encode, Algorithm::UrlEscape) => Ok(plain::encode_url(text)),
            (Direction::Decode, Algorithm::UrlEscape) => Ok(plain::decode_url(text)?),

            (Direction::Encode, Algorithm::Lz77) => Ok(lz77::compress_with(
                text,
                self.config.lz77.window_size,
                self.config.lz77.min_match_length,
            )),
            (Direction::Decode, Algorithm::Lz77) => Ok(lz77::decompress(text)?),

            (Direction::Encode, Algorithm::Lzw) => Ok(lzw::compress(text)),
            (Direction::Decode, Algorithm::Lzw) => Ok(lzw::decompress(text)?),

            (Direction::Encode, Algorithm::Huffman) => Ok(huffman::compress(text)?),
            (Direction::Decode, Algorithm::Huffman) => Ok(huffman::decompress(text)?),

            (Direction::Encode, Algorithm::AesGcm) => {
                let key = self.keys.symmetric_key(&self.config.aes_key_file)?;
                Ok(aead::encrypt(&key, text)?)
            }
            (Direction::Decode, Algorithm::AesGcm) => {
                let key = self.keys.symmetric_key(&self.config.aes_key_file)?;
                Ok(aead::decrypt(&key, text)?)
            }

            (Direction::Encode, Algorithm::RsaOaep) => {
                let public = self.keys.rsa_public_key(&self.config.rsa_key_names())?;
                Ok(oaep::encrypt(&public, text)?)
            }
            (Direction::Decode, Algorithm::RsaOaep) => {
                let private = self.keys.rsa_private_key(&self.config.rsa_key_names())?;
                Ok(oaep::decrypt(&private, text)?)
            }
        }
    }
}
