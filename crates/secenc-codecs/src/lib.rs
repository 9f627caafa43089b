//! secenc-codecs: pure reversible text codecs
//!
//! Every codec here is a pure function pair over strings: a forward
//! direction producing an opaque text artifact, and an inverse direction
//! recovering the original text from that artifact exactly. No codec
//! performs I/O or keeps state across calls, so all of them are safe to
//! invoke concurrently on independent inputs.
//!
//! Modules:
//! - `plain`: stateless encodings (base64, hex, utf8, latin1, ascii, url)
//! - `lz77`: sliding-window match compressor
//! - `lzw`: adaptive-dictionary compressor
//! - `huffman`: frequency-driven prefix-code compressor
//! - `varint`: the number format inside LZ77 match records
//! - `transport`: base64 wrapping of binary token streams

pub mod error;
pub mod huffman;
pub mod lz77;
pub mod lzw;
pub mod plain;
pub mod transport;
pub mod varint;

pub use error::{CodecError, Result};
