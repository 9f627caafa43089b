//! secenc: reversible text transformation engine
//!
//! A collection of self-contained codecs (plain encodings, hand-built
//! compressors LZ77/LZW/Huffman, and key-based ciphers AES-256-GCM and
//! RSA-2048-OAEP), each converting text to an opaque transmissible
//! artifact and back, selected by name through the operation registry.
//!
//! The registry is the only seam an external request layer touches:
//! resolve `(direction, algorithm)` names, invoke the operation, and
//! receive either the resulting string or a structured [`Failure`]
//! carrying one of five error kinds. All codecs are pure functions;
//! the key store is the sole component performing I/O.

pub mod config;
pub mod error;
pub mod registry;

pub use config::{ConfigError, EngineConfig, Lz77Config};
pub use error::{EngineError, ErrorKind, Failure, Result};
pub use registry::{Algorithm, Direction, OperationRegistry};

pub use secenc_codecs as codecs;
pub use secenc_crypto as crypto;
