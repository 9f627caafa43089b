//! RSA-OAEP public-key encryption
//!
//! OAEP padding with SHA-256 for both the padding hash and the MGF1
//! mask-generation function, under RSA-2048 keys from the key store.
//! The envelope is `hex(ciphertext)`. OAEP padding is randomized, so
//! encrypting the same plaintext twice yields different envelopes.

use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::error::{CryptoError, Result};

fn padding() -> Oaep {
    Oaep::new::<Sha256>()
}

/// Encrypt text under an RSA public key, returning a hex envelope.
///
/// OAEP bounds the plaintext at `modulus - 2*hash - 2` bytes (190 for
/// RSA-2048 with SHA-256); longer inputs are rejected by the cipher.
pub fn encrypt(public_key: &RsaPublicKey, plaintext: &str) -> Result<String> {
    let ciphertext = public_key
        .encrypt(&mut rand::rngs::OsRng, padding(), plaintext.as_bytes())
        .map_err(|e| CryptoError::Cipher(format!("RSA-OAEP encryption failed: {e}")))?;
    Ok(hex::encode(ciphertext))
}

/// Decrypt a hex envelope under the matching RSA private key.
///
/// A failed padding check (wrong key, tampered ciphertext) is an
/// [`CryptoError::AuthenticationFailure`].
pub fn decrypt(private_key: &RsaPrivateKey, envelope_hex: &str) -> Result<String> {
    let ciphertext = hex::decode(envelope_hex)
        .map_err(|e| CryptoError::AuthenticationFailure(format!("envelope is not valid hex: {e}")))?;

    let plaintext = private_key
        .decrypt(padding(), &ciphertext)
        .map_err(|_| CryptoError::AuthenticationFailure("OAEP padding check failed".into()))?;

    String::from_utf8(plaintext)
        .map_err(|_| CryptoError::AuthenticationFailure("plaintext is not valid UTF-8".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keystore::RSA_KEY_BITS;
    use std::sync::OnceLock;

    // RSA generation is expensive; share one pair across the module.
    fn test_key() -> &'static RsaPrivateKey {
        static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
        KEY.get_or_init(|| {
            RsaPrivateKey::new(&mut rand::rngs::OsRng, RSA_KEY_BITS).expect("generate test key")
        })
    }

    #[test]
    fn roundtrip() {
        let private = test_key();
        let public = RsaPublicKey::from(private);
        let envelope = encrypt(&public, "Hello, World!").unwrap();
        assert_eq!(decrypt(private, &envelope).unwrap(), "Hello, World!");
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let private = test_key();
        let public = RsaPublicKey::from(private);
        let envelope = encrypt(&public, "").unwrap();
        assert_eq!(decrypt(private, &envelope).unwrap(), "");
    }

    #[test]
    fn padding_makes_repeat_encryptions_differ() {
        let public = RsaPublicKey::from(test_key());
        assert_ne!(
            encrypt(&public, "same text").unwrap(),
            encrypt(&public, "same text").unwrap()
        );
    }

    #[test]
    fn tampered_ciphertext_is_an_authentication_failure() {
        let private = test_key();
        let public = RsaPublicKey::from(private);
        let envelope = encrypt(&public, "secret").unwrap();

        let mut bytes = hex::decode(&envelope).unwrap();
        bytes[0] ^= 0x01;
        let tampered = hex::encode(bytes);

        assert!(matches!(
            decrypt(private, &tampered),
            Err(CryptoError::AuthenticationFailure(_))
        ));
    }

    #[test]
    fn oversize_plaintext_is_rejected() {
        let public = RsaPublicKey::from(test_key());
        let long = "x".repeat(400);
        assert!(matches!(
            encrypt(&public, &long),
            Err(CryptoError::Cipher(_))
        ));
    }

    #[test]
    fn non_hex_envelope_is_an_authentication_failure() {
        assert!(matches!(
            decrypt(test_key(), "zz"),
            Err(CryptoError::AuthenticationFailure(_))
        ));
    }
}
