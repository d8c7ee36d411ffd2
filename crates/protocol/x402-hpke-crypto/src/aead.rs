//! ChaCha20-Poly1305 (IETF) seal/open for the envelope body.

use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};

use x402_hpke_types::{X402Error, X402Result};

use crate::derive::{KEY_LEN, NONCE_LEN};

/// Encrypt `plaintext` binding `aad`; the 16-byte tag is appended.
pub fn aead_seal(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    aad: &[u8],
    plaintext: &[u8],
) -> X402Result<Vec<u8>> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key));
    cipher
        .encrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|_| X402Error::AadMismatch)
}

/// Decrypt and authenticate a ciphertext produced by [`aead_seal`].
///
/// # Errors
/// `AAD_MISMATCH` on any authentication failure; tag failures and AAD
/// tampering are deliberately indistinguishable.
pub fn aead_open(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    aad: &[u8],
    ciphertext: &[u8],
) -> X402Result<Vec<u8>> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key));
    cipher
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|_| X402Error::AadMismatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [1u8; 32];
    const NONCE: [u8; 12] = [2u8; 12];

    #[test]
    fn test_seal_open_roundtrip() {
        let sealed = aead_seal(&KEY, &NONCE, b"aad", b"hello").unwrap();
        assert_eq!(sealed.len(), 5 + 16);
        let opened = aead_open(&KEY, &NONCE, b"aad", &sealed).unwrap();
        assert_eq!(opened, b"hello");
    }

    #[test]
    fn test_aad_is_authenticated() {
        let sealed = aead_seal(&KEY, &NONCE, b"aad", b"hello").unwrap();
        let err = aead_open(&KEY, &NONCE, b"tampered", &sealed).unwrap_err();
        assert_eq!(err.code(), "AAD_MISMATCH");
    }

    #[test]
    fn test_tag_tamper_fails() {
        let mut sealed = aead_seal(&KEY, &NONCE, b"aad", b"hello").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x80;
        assert!(aead_open(&KEY, &NONCE, b"aad", &sealed).is_err());
    }
}
