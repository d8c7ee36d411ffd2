//! Cryptographic primitives for the x402-hpke envelope core.
//!
//! This crate provides the cryptographic building blocks the envelope
//! engine composes:
//!
//! - **Keys**: X25519 keypairs in JWK form, scalar multiplication
//! - **Encoding**: unpadded base64url for wire fields
//! - **Derivation**: HKDF-SHA256 key/nonce expansion
//! - **Streaming**: chunked XChaCha20-Poly1305 with per-key usage limits
//!
//! # Example
//!
//! ```
//! use x402_hpke_crypto::{generate_keypair, x25519_shared, is_all_zero};
//!
//! let (public, private) = generate_keypair();
//! let point = public.to_point_bytes().unwrap();
//! let scalar = private.to_scalar_bytes().unwrap();
//! let shared = x25519_shared(&scalar, &point);
//! assert!(!is_all_zero(&*shared));
//! ```

mod aead;
mod derive;
mod encoding;
mod keys;
mod streaming;

pub use aead::{aead_open, aead_seal};
pub use derive::{derive_key_nonce, KEY_LEN, NONCE_LEN};
pub use encoding::{b64u_decode, b64u_decode32, b64u_encode};
pub use keys::{
    ephemeral_from_seed, generate_ephemeral, generate_keypair, x25519_public, x25519_shared,
    PrivateJwk, PublicJwk,
};
pub use streaming::{
    open_chunk, seal_chunk, StreamLimiter, DEFAULT_MAX_BYTES, DEFAULT_MAX_CHUNKS, STREAM_KEY_LEN,
    STREAM_NONCE_PREFIX_LEN,
};

use subtle::ConstantTimeEq;

/// Constant-time byte equality. Length mismatch returns false without
/// inspecting contents.
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}

/// Returns true if every byte is zero, in constant time.
pub fn is_all_zero(bytes: &[u8]) -> bool {
    let zeros = vec![0u8; bytes.len()];
    bool::from(bytes.ct_eq(&zeros))
}
