//! AES-256-GCM authenticated encryption
//!
//! Confidentiality plus built-in integrity in one pass. Every
//! encryption draws a fresh random 96-bit nonce; the envelope is
//! `hex(nonce || ciphertext || tag)`. Decryption verifies the tag
//! before returning anything, so a wrong key or a flipped bit yields
//! [`CryptoError::AuthenticationFailure`], never altered plaintext.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{CryptoError, Result};
use crate::keystore::SYMMETRIC_KEY_SIZE;

/// Nonce size in bytes (96 bits).
pub const NONCE_SIZE: usize = 12;

/// GCM authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

fn cipher(key: &[u8]) -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key).map_err(|_| {
        CryptoError::InvalidKey(format!(
            "expected a {SYMMETRIC_KEY_SIZE}-byte key, got {} bytes",
            key.len()
        ))
    })
}

/// Encrypt text under a 256-bit key, returning a hex envelope.
pub fn encrypt(key: &[u8], plaintext: &str) -> Result<String> {
    let cipher = cipher(key)?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|_| CryptoError::Cipher("AES-GCM encryption failed".into()))?;

    let mut envelope = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    envelope.extend_from_slice(&nonce_bytes);
    envelope.extend_from_slice(&ciphertext);
    Ok(hex::encode(envelope))
}

/// Decrypt a hex envelope under a 256-bit key.
///
/// Fails with [`CryptoError::AuthenticationFailure`] when the tag check
/// fails, the key is wrong, or the envelope is too damaged to try.
pub fn decrypt(key: &[u8], envelope_hex: &str) -> Result<String> {
    let envelope = hex::decode(envelope_hex)
        .map_err(|e| CryptoError::AuthenticationFailure(format!("envelope is not valid hex: {e}")))?;
    if envelope.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CryptoError::AuthenticationFailure(format!(
            "envelope too short: {} bytes",
            envelope.len()
        )));
    }

    let (nonce_bytes, ciphertext) = envelope.split_at(NONCE_SIZE);
    let plaintext = cipher(key)?
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| {
            CryptoError::AuthenticationFailure("ciphertext failed the integrity check".into())
        })?;

    String::from_utf8(plaintext)
        .map_err(|_| CryptoError::AuthenticationFailure("plaintext is not valid UTF-8".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> Vec<u8> {
        let mut key = vec![0u8; SYMMETRIC_KEY_SIZE];
        OsRng.fill_bytes(&mut key);
        key
    }

    #[test]
    fn roundtrip() {
        let key = key();
        let envelope = encrypt(&key, "Hello, World!").unwrap();
        assert_eq!(decrypt(&key, &envelope).unwrap(), "Hello, World!");
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let key = key();
        let envelope = encrypt(&key, "").unwrap();
        assert_eq!(decrypt(&key, &envelope).unwrap(), "");
    }

    #[test]
    fn unicode_plaintext_roundtrips() {
        let key = key();
        let envelope = encrypt(&key, "héllo ✓ ÿ").unwrap();
        assert_eq!(decrypt(&key, &envelope).unwrap(), "héllo ✓ ÿ");
    }

    #[test]
    fn nonce_makes_repeat_encryptions_differ() {
        let key = key();
        assert_ne!(
            encrypt(&key, "same text").unwrap(),
            encrypt(&key, "same text").unwrap()
        );
    }

    #[test]
    fn wrong_key_is_an_authentication_failure() {
        let envelope = encrypt(&key(), "secret").unwrap();
        assert!(matches!(
            decrypt(&key(), &envelope),
            Err(CryptoError::AuthenticationFailure(_))
        ));
    }

    #[test]
    fn flipped_bit_is_an_authentication_failure() {
        let key = key();
        let envelope = encrypt(&key, "secret").unwrap();

        let mut bytes = hex::decode(&envelope).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let tampered = hex::encode(bytes);

        assert!(matches!(
            decrypt(&key, &tampered),
            Err(CryptoError::AuthenticationFailure(_))
        ));
    }

    #[test]
    fn short_envelope_is_an_authentication_failure() {
        assert!(matches!(
            decrypt(&key(), "00ff"),
            Err(CryptoError::AuthenticationFailure(_))
        ));
    }

    #[test]
    fn non_hex_envelope_is_an_authentication_failure() {
        assert!(matches!(
            decrypt(&key(), "not hex at all"),
            Err(CryptoError::AuthenticationFailure(_))
        ));
    }

    #[test]
    fn wrong_key_length_is_invalid_key() {
        assert!(matches!(
            encrypt(&[1u8; 16], "x"),
            Err(CryptoError::InvalidKey(_))
        ));
    }

    #[test]
    fn envelope_layout_is_nonce_then_ciphertext() {
        let key = key();
        let envelope = encrypt(&key, "abc").unwrap();
        let bytes = hex::decode(&envelope).unwrap();
        assert_eq!(bytes.len(), NONCE_SIZE + 3 + TAG_SIZE);
    }
}
