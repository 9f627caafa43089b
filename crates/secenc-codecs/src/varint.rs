//! Variable-length unsigned integer encoding
//!
//! Big-endian base-128: the value is split into 7-bit groups, emitted
//! most-significant-group first, with the high bit set on every group
//! except the last. Zero encodes as a single zero byte. This is the
//! number format embedded in LZ77 match records.

/// Maximum encoded length of a `u64` (ten 7-bit groups).
const MAX_GROUPS: usize = 10;

/// Append the varint encoding of `n` to `out`.
pub fn encode(n: u64, out: &mut Vec<u8>) {
    let mut groups = [0u8; MAX_GROUPS];
    let mut i = MAX_GROUPS - 1;
    let mut n = n;

    groups[i] = (n & 0x7F) as u8;
    n >>= 7;
    while n > 0 {
        i -= 1;
        groups[i] = ((n & 0x7F) as u8) | 0x80;
        n >>= 7;
    }

    out.extend_from_slice(&groups[i..]);
}

/// Decode a varint starting at `*pos`, advancing `*pos` past it.
///
/// Returns `None` if the stream ends mid-number or the value would
/// overflow a `u64`.
pub fn decode(data: &[u8], pos: &mut usize) -> Option<u64> {
    let mut acc: u64 = 0;
    for _ in 0..MAX_GROUPS {
        let &byte = data.get(*pos)?;
        *pos += 1;
        acc = (acc << 7) | u64::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            return Some(acc);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(n: u64) -> u64 {
        let mut buf = Vec::new();
        encode(n, &mut buf);
        let mut pos = 0;
        let decoded = decode(&buf, &mut pos).expect("decode");
        assert_eq!(pos, buf.len(), "decode must consume the whole encoding");
        decoded
    }

    #[test]
    fn zero_is_a_single_zero_byte() {
        let mut buf = Vec::new();
        encode(0, &mut buf);
        assert_eq!(buf, [0u8]);
    }

    #[test]
    fn small_values_fit_one_byte() {
        for n in 0..=127u64 {
            let mut buf = Vec::new();
            encode(n, &mut buf);
            assert_eq!(buf, [n as u8]);
        }
    }

    #[test]
    fn continuation_bytes_carry_the_high_bit() {
        let mut buf = Vec::new();
        encode(300, &mut buf);
        // 300 = 0b10_0101100 -> groups [0b10, 0b0101100]
        assert_eq!(buf, [0x82, 0x2C]);
    }

    #[test]
    fn roundtrip_across_group_boundaries() {
        for n in [1, 127, 128, 129, 16383, 16384, 1 << 21, u64::MAX] {
            assert_eq!(roundtrip(n), n);
        }
    }

    #[test]
    fn truncated_stream_is_rejected() {
        let mut pos = 0;
        assert_eq!(decode(&[0x80, 0x80], &mut pos), None);
        let mut pos = 0;
        assert_eq!(decode(&[], &mut pos), None);
    }

    #[test]
    fn consecutive_numbers_share_a_buffer() {
        let mut buf = Vec::new();
        encode(5, &mut buf);
        encode(70000, &mut buf);
        encode(0, &mut buf);

        let mut pos = 0;
        assert_eq!(decode(&buf, &mut pos), Some(5));
        assert_eq!(decode(&buf, &mut pos), Some(70000));
        assert_eq!(decode(&buf, &mut pos), Some(0));
        assert_eq!(pos, buf.len());
    }
}
