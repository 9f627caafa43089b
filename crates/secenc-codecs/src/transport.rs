//! Transport encoding
//!
//! Wraps binary token streams in standard-alphabet base64 so every
//! compressor artifact is a plain, transmissible string. Unwrap failures
//! are reported against the codec whose artifact was being opened.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{CodecError, Result};

/// Wrap raw bytes as a text-safe artifact.
pub fn wrap(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Unwrap an artifact back to raw bytes.
///
/// `codec` names the compressor on whose behalf the wrapper is opened;
/// it appears in the error when the base64 layer is damaged.
pub fn unwrap(artifact: &str, codec: &'static str) -> Result<Vec<u8>> {
    STANDARD
        .decode(artifact)
        .map_err(|e| CodecError::format(codec, format!("invalid base64 wrapper: {e}")))
}
