//! LZW adaptive-dictionary compressor
//!
//! Classic LZW growth over the UTF-8 bytes of the input: the dictionary
//! is seeded with the 256 single-byte strings and gains exactly one
//! entry per emitted code. Codes are packed as fixed-width big-endian
//! integers; the width is derived once from the *final* dictionary size
//! (`max(8, bit_length(size))` bits, rounded up to whole bytes), not
//! progressively per symbol. The decompressor replays the identical
//! growth rule, so the final size (and with it the code width) is
//! recoverable from the artifact alone.
//!
//! The fixed-final-width policy is load-bearing wire format: both sides
//! must replay the same growth rule, and changing either silently breaks
//! every existing artifact.

use std::collections::HashMap;

use crate::error::{CodecError, Result};
use crate::transport;

/// Number of seeded single-byte dictionary entries.
const SEED_SIZE: u32 = 256;

/// Code width in bits for a dictionary of `size` entries.
fn code_width(size: u32) -> u32 {
    let bit_length = u32::BITS - size.leading_zeros();
    bit_length.max(8)
}

/// Bytes occupied by one fixed-width code.
fn code_bytes(size: u32) -> usize {
    ((code_width(size) + 7) / 8) as usize
}

/// Compress text into an LZW artifact.
///
/// Empty input maps to an empty artifact.
pub fn compress(text: &str) -> String {
    compress_bytes(text.as_bytes())
}

/// Compress a raw byte sequence into an LZW artifact.
pub fn compress_bytes(data: &[u8]) -> String {
    if data.is_empty() {
        return String::new();
    }

    let mut dictionary: HashMap<Vec<u8>, u32> =
        (0..SEED_SIZE).map(|b| (vec![b as u8], b)).collect();
    let mut size = SEED_SIZE;
    let mut codes: Vec<u32> = Vec::new();
    let mut w: Vec<u8> = Vec::new();

    for &c in data {
        let mut wc = w.clone();
        wc.push(c);
        if dictionary.contains_key(&wc) {
            w = wc;
        } else {
            codes.push(dictionary[&w]);
            dictionary.insert(wc, size);
            size += 1;
            w = vec![c];
        }
    }
    // Final pending prefix; non-empty whenever the input was.
    if !w.is_empty() {
        codes.push(dictionary[&w]);
    }

    let width_bytes = code_bytes(size);
    let mut out = Vec::with_capacity(codes.len() * width_bytes);
    for code in codes {
        let be = code.to_be_bytes();
        out.extend_from_slice(&be[be.len() - width_bytes..]);
    }

    transport::wrap(&out)
}

/// Decompress an LZW artifact back to text.
pub fn decompress(artifact: &str) -> Result<String> {
    let bytes = decompress_bytes(artifact)?;
    String::from_utf8(bytes)
        .map_err(|e| CodecError::format("lzw", format!("output is not valid UTF-8: {e}")))
}

/// Decompress an LZW artifact back to raw bytes.
pub fn decompress_bytes(artifact: &str) -> Result<Vec<u8>> {
    if artifact.is_empty() {
        return Ok(Vec::new());
    }

    let data = transport::unwrap(artifact, "lzw")?;
    let width_bytes = derive_code_bytes(data.len())?;
    let codes: Vec<u32> = data
        .chunks(width_bytes)
        .map(|chunk| chunk.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b)))
        .collect();

    let mut dictionary: HashMap<u32, Vec<u8>> =
        (0..SEED_SIZE).map(|b| (b, vec![b as u8])).collect();
    let mut size = SEED_SIZE;

    let mut w = dictionary
        .get(&codes[0])
        .cloned()
        .ok_or_else(|| unknown_code(codes[0], size))?;
    let mut out = w.clone();

    for &code in &codes[1..] {
        let entry = match dictionary.get(&code) {
            Some(entry) => entry.clone(),
            // One-step-ahead case: the encoder emitted the entry it was
            // in the middle of creating. Its expansion is w + w[0].
            None if code == size => {
                let mut entry = w.clone();
                entry.push(w[0]);
                entry
            }
            None => return Err(unknown_code(code, size)),
        };

        out.extend_from_slice(&entry);
        let mut grown = w.clone();
        grown.push(entry[0]);
        dictionary.insert(size, grown);
        size += 1;
        w = entry;
    }

    Ok(out)
}

/// Recover the per-code byte width from the packed stream length.
///
/// Each emitted code grew the dictionary by one entry except the final
/// flush, so `final_size = 255 + code_count`. The width is the unique
/// `b` where the stream splits into `b`-byte codes whose final-size
/// width rounds back up to `b` bytes.
fn derive_code_bytes(stream_len: usize) -> Result<usize> {
    for b in 2..=4 {
        if stream_len % b != 0 {
            continue;
        }
        let count = (stream_len / b) as u32;
        let final_size = SEED_SIZE - 1 + count;
        if code_bytes(final_size) == b {
            return Ok(b);
        }
    }
    Err(CodecError::format(
        "lzw",
        format!("stream length {stream_len} does not split into fixed-width codes"),
    ))
}

fn unknown_code(code: u32, size: u32) -> CodecError {
    CodecError::format(
        "lzw",
        format!("code {code} is absent from a dictionary of {size} entries and cannot be synthesized"),
    )
}
