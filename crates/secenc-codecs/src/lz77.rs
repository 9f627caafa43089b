//! LZ77 sliding-window compressor
//!
//! Byte-oriented match compressor with reduced overhead for small
//! matches. The token stream is a sequence of literal bytes and match
//! records; a match record is the marker byte 255 followed by a varint
//! offset and a varint length. A literal byte equal to the marker is
//! escaped by doubling it. The stream is base64-wrapped into a text
//! artifact via [`crate::transport`].
//!
//! Text goes through its UTF-8 byte representation, so offsets and
//! lengths are byte distances regardless of character width.

use crate::error::{CodecError, Result};
use crate::{transport, varint};

/// Marker byte that opens a match record (and escapes itself).
const MATCH_MARKER: u8 = 0xFF;

/// How far back the compressor searches, and the longest match it emits.
pub const DEFAULT_WINDOW_SIZE: usize = 100;

/// Shortest run worth a match record instead of literals.
pub const DEFAULT_MIN_MATCH_LENGTH: usize = 3;

/// Largest usable window size.
///
/// Offsets and lengths never exceed the window, and values up to 16255
/// never varint-encode with a first byte of 0xFF. Beyond that (16256
/// and up) a match record could open with a second marker byte, which
/// the decoder must read as an escaped literal. Windows above this cap
/// are clamped down so every emitted record stays unambiguous.
pub const MAX_WINDOW_SIZE: usize = 16255;

/// Compress text with the default window and minimum match length.
pub fn compress(text: &str) -> String {
    compress_with(text, DEFAULT_WINDOW_SIZE, DEFAULT_MIN_MATCH_LENGTH)
}

/// Compress text with explicit parameters.
pub fn compress_with(text: &str, window_size: usize, min_match_length: usize) -> String {
    compress_bytes(text.as_bytes(), window_size, min_match_length)
}

/// Compress a raw byte sequence with explicit parameters.
///
/// Empty input maps to an empty artifact. Window sizes above
/// [`MAX_WINDOW_SIZE`] are clamped to it.
pub fn compress_bytes(data: &[u8], window_size: usize, min_match_length: usize) -> String {
    if data.is_empty() {
        return String::new();
    }
    let window_size = window_size.min(MAX_WINDOW_SIZE);

    let mut out = Vec::new();
    let mut i = 0;
    while i < data.len() {
        let (best_offset, best_len) = longest_match(data, i, window_size, min_match_length);

        if best_len >= min_match_length {
            out.push(MATCH_MARKER);
            varint::encode(best_offset as u64, &mut out);
            varint::encode(best_len as u64, &mut out);
            i += best_len;
        } else {
            if data[i] == MATCH_MARKER {
                out.push(MATCH_MARKER);
            }
            out.push(data[i]);
            i += 1;
        }
    }

    transport::wrap(&out)
}

/// Find the longest backward match for position `i`.
///
/// Candidates are scanned from the oldest window position toward `i`;
/// only a strictly longer match replaces the current best, so equal
/// lengths keep the earliest candidate. Match length is capped at the
/// window size. Returns `(offset, length)`, zeroes when no candidate
/// reaches the minimum length.
fn longest_match(
    data: &[u8],
    i: usize,
    window_size: usize,
    min_match_length: usize,
) -> (usize, usize) {
    let mut best = (0, 0);
    if i + min_match_length > data.len() {
        return best;
    }

    for j in i.saturating_sub(window_size)..i {
        let mut k = 0;
        while i + k < data.len() && k < window_size && data[j + k] == data[i + k] {
            k += 1;
        }
        if k > best.1 && k >= min_match_length {
            best = (i - j, k);
        }
    }
    best
}

/// Decompress an LZ77 artifact back to text.
pub fn decompress(artifact: &str) -> Result<String> {
    let bytes = decompress_bytes(artifact)?;
    String::from_utf8(bytes)
        .map_err(|e| CodecError::format("lz77", format!("output is not valid UTF-8: {e}")))
}

/// Decompress an LZ77 artifact back to raw bytes.
pub fn decompress_bytes(artifact: &str) -> Result<Vec<u8>> {
    if artifact.is_empty() {
        return Ok(Vec::new());
    }

    let data = transport::unwrap(artifact, "lz77")?;
    let mut out: Vec<u8> = Vec::new();
    let mut i = 0;
    while i < data.len() {
        if data[i] != MATCH_MARKER {
            out.push(data[i]);
            i += 1;
            continue;
        }

        i += 1;
        if data.get(i) == Some(&MATCH_MARKER) {
            // Escaped literal marker byte.
            out.push(MATCH_MARKER);
            i += 1;
            continue;
        }

        let offset = read_number(&data, &mut i, "offset")? as usize;
        let length = read_number(&data, &mut i, "length")? as usize;

        if offset == 0 || offset > out.len() {
            return Err(CodecError::format(
                "lz77",
                format!(
                    "back-reference offset {offset} reaches before the start of output (produced {} bytes)",
                    out.len()
                ),
            ));
        }

        // Byte-wise copy so overlapping self-referential runs work: the
        // source range may extend into bytes produced by this very copy.
        let start = out.len() - offset;
        for k in 0..length {
            let byte = out[start + k];
            out.push(byte);
        }
    }

    Ok(out)
}

fn read_number(data: &[u8], pos: &mut usize, field: &str) -> Result<u64> {
    varint::decode(data, pos)
        .ok_or_else(|| CodecError::format("lz77", format!("truncated match {field}")))
}
