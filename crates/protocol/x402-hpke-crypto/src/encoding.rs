//! base64url helpers for envelope fields.
//!
//! The wire alphabet is URL-safe without padding. Decoding tolerates
//! padding so envelopes produced by stricter encoders still parse.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use x402_hpke_types::{X402Error, X402Result};

/// Encode bytes as unpadded base64url.
pub fn b64u_encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode base64url, with or without trailing padding.
///
/// # Errors
/// `INVALID_ENVELOPE` on any malformed input.
pub fn b64u_decode(value: &str) -> X402Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(value.trim_end_matches('='))
        .map_err(|_| X402Error::invalid("bad base64url"))
}

/// Decode base64url into a fixed 32-byte array.
pub fn b64u_decode32(value: &str) -> X402Result<[u8; 32]> {
    let bytes = b64u_decode(value)?;
    bytes
        .try_into()
        .map_err(|_| X402Error::invalid("expected 32 bytes"))
}
