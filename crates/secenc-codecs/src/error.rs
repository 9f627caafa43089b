//! Codec error types
//!
//! Two failure classes cover every pure codec: a malformed artifact for
//! one of the plain encodings, and a truncated or corrupted artifact for
//! one of the compressors.

use thiserror::Error;

/// Error produced by a pure codec.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Malformed artifact for a plain encoding (odd-length hex, invalid
    /// percent-escape, out-of-range code point, ...).
    #[error("invalid {encoding} artifact: {reason}")]
    Decoding {
        /// Name of the encoding that rejected the artifact.
        encoding: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Truncated or corrupted compressed artifact (back-reference before
    /// the start of output, unknown dictionary code, bad wrapper, ...).
    #[error("corrupt {codec} artifact: {reason}")]
    CompressedFormat {
        /// Name of the compressor that rejected the artifact.
        codec: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

impl CodecError {
    /// Shorthand constructor for a plain-encoding failure.
    pub fn decoding(encoding: &'static str, reason: impl Into<String>) -> Self {
        CodecError::Decoding {
            encoding,
            reason: reason.into(),
        }
    }

    /// Shorthand constructor for a compressed-format failure.
    pub fn format(codec: &'static str, reason: impl Into<String>) -> Self {
        CodecError::CompressedFormat {
            codec,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the codec crate.
pub type Result<T> = std::result::Result<T, CodecError>;
