//! Plain reversible encodings
//!
//! Stateless whole-string codecs: base64, hex, a byte-level view of the
//! UTF-8 representation, the Latin-1 single-byte character set, a
//! numeric code-point list, and percent-escaping. Each `encode_*`
//! produces a text artifact that the matching `decode_*` inverts;
//! malformed artifacts fail with [`CodecError::Decoding`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{CodecError, Result};

/// Characters left bare by percent-escaping: the unreserved characters
/// plus `/`, so path-shaped input stays readable.
const URL_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Encode text as base64 over its UTF-8 bytes.
pub fn encode_base64(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode a base64 artifact back to text.
pub fn decode_base64(artifact: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(artifact)
        .map_err(|e| CodecError::decoding("base64", e.to_string()))?;
    utf8("base64", bytes)
}

/// Encode text as lowercase hex over its UTF-8 bytes.
pub fn encode_hex(text: &str) -> String {
    hex::encode(text.as_bytes())
}

/// Decode a hex artifact back to text.
///
/// Odd-length input and non-hex digits are decoding errors.
pub fn decode_hex(artifact: &str) -> Result<String> {
    let bytes = hex::decode(artifact).map_err(|e| CodecError::decoding("hex", e.to_string()))?;
    utf8("hex", bytes)
}

/// Render the raw UTF-8 byte sequence of the text as hex pairs.
///
/// This is the byte-level identity encoding: the artifact spells out
/// exactly the bytes the text occupies on the wire.
pub fn encode_utf8(text: &str) -> String {
    hex::encode(text.as_bytes())
}

/// Rebuild text from its hex-rendered UTF-8 byte sequence.
pub fn decode_utf8(artifact: &str) -> Result<String> {
    let bytes = hex::decode(artifact).map_err(|e| CodecError::decoding("utf8", e.to_string()))?;
    utf8("utf8", bytes)
}

/// Encode text in the Latin-1 single-byte character set, one byte per
/// scalar, rendered as hex pairs.
///
/// Scalars above U+00FF have no Latin-1 representation and are rejected.
pub fn encode_latin1(text: &str) -> Result<String> {
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        let code = u32::from(c);
        if code > 0xFF {
            return Err(CodecError::decoding(
                "latin1",
                format!("character {c:?} (U+{code:04X}) is not representable in latin1"),
            ));
        }
        bytes.push(code as u8);
    }
    Ok(hex::encode(bytes))
}

/// Decode a hex-rendered Latin-1 artifact back to text.
pub fn decode_latin1(artifact: &str) -> Result<String> {
    let bytes =
        hex::decode(artifact).map_err(|e| CodecError::decoding("latin1", e.to_string()))?;
    // Every byte value is a valid Latin-1 scalar.
    Ok(bytes.into_iter().map(char::from).collect())
}

/// Encode text as space-separated decimal code points.
pub fn encode_ascii(text: &str) -> String {
    let codes: Vec<String> = text.chars().map(|c| u32::from(c).to_string()).collect();
    codes.join(" ")
}

/// Decode a space-separated decimal code-point list back to text.
pub fn decode_ascii(artifact: &str) -> Result<String> {
    let mut out = String::new();
    for token in artifact.split_whitespace() {
        let code: u32 = token.parse().map_err(|_| {
            CodecError::decoding("ascii", format!("{token:?} is not a decimal code point"))
        })?;
        let c = char::from_u32(code).ok_or_else(|| {
            CodecError::decoding("ascii", format!("{code} is not a valid code point"))
        })?;
        out.push(c);
    }
    Ok(out)
}

/// Percent-escape text for safe URL transmission.
pub fn encode_url(text: &str) -> String {
    utf8_percent_encode(text, URL_ESCAPE).to_string()
}

/// Decode a percent-escaped artifact back to text.
pub fn decode_url(artifact: &str) -> Result<String> {
    percent_decode_str(artifact)
        .decode_utf8()
        .map(|cow| cow.into_owned())
        .map_err(|e| CodecError::decoding("url-escape", format!("escapes decode to invalid UTF-8: {e}")))
}

/// Validate decoded bytes as UTF-8, reporting against `encoding`.
fn utf8(encoding: &'static str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|e| CodecError::decoding(encoding, format!("decoded bytes are not valid UTF-8: {e}")))
}
