//! HKDF-SHA256 key/nonce derivation for the envelope AEAD.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroizing;

/// AEAD key length.
pub const KEY_LEN: usize = 32;

/// ChaCha20-Poly1305 (IETF) nonce length.
pub const NONCE_LEN: usize = 12;

/// Derive the AEAD key and nonce from an X25519 shared secret.
///
/// Salt is 32 zero bytes; `info` binds the suite, namespace, ephemeral
/// public key, and recipient public key so derived keys never repeat
/// across envelopes or recipients.
pub fn derive_key_nonce(
    shared: &[u8; 32],
    info: &[u8],
) -> (Zeroizing<[u8; KEY_LEN]>, [u8; NONCE_LEN]) {
    let salt = [0u8; 32];
    let hkdf = Hkdf::<Sha256>::new(Some(&salt), shared);
    let mut okm = Zeroizing::new([0u8; KEY_LEN + NONCE_LEN]);
    // 44 bytes is far below the HKDF-SHA256 output ceiling; expand cannot fail.
    hkdf.expand(info, okm.as_mut())
        .expect("okm length within hkdf bounds");

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    key.copy_from_slice(&okm[..KEY_LEN]);
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&okm[KEY_LEN..]);
    (key, nonce)
}
