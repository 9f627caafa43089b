//! Engine error taxonomy
//!
//! Every codec or cipher failure crossing the engine boundary carries
//! one of five kinds. The external request handler receives a
//! [`Failure`] value (kind code plus human-readable message); nothing
//! is swallowed or retried inside the engine.

use serde::Serialize;
use thiserror::Error;

use secenc_codecs::CodecError;
use secenc_crypto::CryptoError;

/// Failure kinds exposed at the engine boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed artifact for a plain encoding.
    Decoding,
    /// Truncated or corrupted compressed artifact.
    CompressedFormat,
    /// AEAD tag mismatch or OAEP padding check failure.
    AuthenticationFailure,
    /// Unknown algorithm/direction pair.
    UnsupportedOperation,
    /// Key file missing and creation failed.
    KeyUnavailable,
}

impl ErrorKind {
    /// Returns the string code of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Decoding => "DECODING_ERROR",
            ErrorKind::CompressedFormat => "COMPRESSED_FORMAT_ERROR",
            ErrorKind::AuthenticationFailure => "AUTHENTICATION_FAILURE",
            ErrorKind::UnsupportedOperation => "UNSUPPORTED_OPERATION",
            ErrorKind::KeyUnavailable => "KEY_UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Engine-level error.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A pure codec rejected its input or artifact.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The key store or a cipher failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// The requested direction/algorithm pair is not in the registry.
    #[error("unsupported operation: {direction} {algorithm}")]
    UnsupportedOperation {
        /// Requested direction name.
        direction: String,
        /// Requested algorithm name.
        algorithm: String,
    },
}

impl EngineError {
    /// Returns the boundary kind for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Codec(CodecError::Decoding { .. }) => ErrorKind::Decoding,
            EngineError::Codec(CodecError::CompressedFormat { .. }) => ErrorKind::CompressedFormat,
            EngineError::Crypto(CryptoError::AuthenticationFailure(_)) => {
                ErrorKind::AuthenticationFailure
            }
            // An envelope the cipher itself rejects is reported in the
            // authentication bucket: the operation failed inside the
            // cipher, not in key handling.
            EngineError::Crypto(CryptoError::Cipher(_)) => ErrorKind::AuthenticationFailure,
            EngineError::Crypto(CryptoError::KeyUnavailable { .. }) => ErrorKind::KeyUnavailable,
            EngineError::Crypto(CryptoError::InvalidKey(_)) => ErrorKind::KeyUnavailable,
            EngineError::UnsupportedOperation { .. } => ErrorKind::UnsupportedOperation,
        }
    }

    /// Convert to the structured failure value handed across the
    /// engine boundary.
    pub fn to_failure(&self) -> Failure {
        Failure {
            kind: self.kind().as_str(),
            message: self.to_string(),
        }
    }
}

/// Structured failure payload for the external request handler.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    /// Stable kind code (see [`ErrorKind::as_str`]).
    pub kind: &'static str,
    /// Human-readable description.
    pub message: String,
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes_are_stable() {
        assert_eq!(ErrorKind::Decoding.as_str(), "DECODING_ERROR");
        assert_eq!(ErrorKind::KeyUnavailable.as_str(), "KEY_UNAVAILABLE");
    }

    #[test]
    fn codec_errors_map_to_their_kinds() {
        let err = EngineError::from(CodecError::decoding("hex", "odd length"));
        assert_eq!(err.kind(), ErrorKind::Decoding);

        let err = EngineError::from(CodecError::format("lzw", "bad code"));
        assert_eq!(err.kind(), ErrorKind::CompressedFormat);
    }

    #[test]
    fn failure_payload_serializes_kind_and_message() {
        let err = EngineError::UnsupportedOperation {
            direction: "encode".into(),
            algorithm: "rot13".into(),
        };
        let failure = err.to_failure();
        assert_eq!(failure.kind, "UNSUPPORTED_OPERATION");
        assert!(failure.message.contains("rot13"));

        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["kind"], "UNSUPPORTED_OPERATION");
    }
}
