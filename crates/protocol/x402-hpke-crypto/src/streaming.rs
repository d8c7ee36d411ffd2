//! Chunked streaming AEAD for out-of-band key channels.
//!
//! Each chunk is sealed with XChaCha20-Poly1305 under a 24-byte nonce built
//! as `prefix16 ∥ LE64(seq)`. The caller owns sequencing; the
//! [`StreamLimiter`] enforces per-key ceilings on chunk count and total
//! plaintext bytes, keeping usage well below the cipher's nonce-reuse
//! safety bound.

use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};

use x402_hpke_types::{X402Error, X402Result};

/// Required streaming key length.
pub const STREAM_KEY_LEN: usize = 32;

/// Required nonce prefix length.
pub const STREAM_NONCE_PREFIX_LEN: usize = 16;

/// Default per-key chunk ceiling.
pub const DEFAULT_MAX_CHUNKS: u64 = 1_000_000;

/// Default per-key plaintext byte ceiling.
pub const DEFAULT_MAX_BYTES: u64 = 1_000_000_000;

fn stream_nonce(prefix: &[u8], seq: u64) -> XNonce {
    let mut nonce = [0u8; 24];
    nonce[..STREAM_NONCE_PREFIX_LEN].copy_from_slice(prefix);
    nonce[STREAM_NONCE_PREFIX_LEN..].copy_from_slice(&seq.to_le_bytes());
    XNonce::from(nonce)
}

fn check_lengths(key: &[u8], nonce_prefix: &[u8]) -> X402Result<()> {
    if key.len() != STREAM_KEY_LEN {
        return Err(X402Error::StreamKeyLen { actual: key.len() });
    }
    if nonce_prefix.len() != STREAM_NONCE_PREFIX_LEN {
        return Err(X402Error::StreamNoncePrefixLen {
            actual: nonce_prefix.len(),
        });
    }
    Ok(())
}

/// Seal one chunk at position `seq`.
///
/// Returns ciphertext with the 16-byte tag appended.
pub fn seal_chunk(
    key: &[u8],
    nonce_prefix: &[u8],
    seq: u64,
    chunk: &[u8],
    aad: Option<&[u8]>,
) -> X402Result<Vec<u8>> {
    check_lengths(key, nonce_prefix)?;
    let cipher = XChaCha20Poly1305::new(Key::from_slice(key));
    cipher
        .encrypt(
            &stream_nonce(nonce_prefix, seq),
            Payload {
                msg: chunk,
                aad: aad.unwrap_or(&[]),
            },
        )
        .map_err(|_| X402Error::AadMismatch)
}

/// Open one chunk sealed at position `seq`.
///
/// # Errors
/// `AAD_MISMATCH` when authentication fails (wrong key, sequence, aad, or
/// tampered ciphertext).
pub fn open_chunk(
    key: &[u8],
    nonce_prefix: &[u8],
    seq: u64,
    ciphertext: &[u8],
    aad: Option<&[u8]>,
) -> X402Result<Vec<u8>> {
    check_lengths(key, nonce_prefix)?;
    let cipher = XChaCha20Poly1305::new(Key::from_slice(key));
    cipher
        .decrypt(
            &stream_nonce(nonce_prefix, seq),
            Payload {
                msg: ciphertext,
                aad: aad.unwrap_or(&[]),
            },
        )
        .map_err(|_| X402Error::AadMismatch)
}

/// Per-key usage limiter for chunk sealing.
///
/// Single-owner: writers sharing one key must serialize on one limiter.
#[derive(Debug, Clone)]
pub struct StreamLimiter {
    max_chunks: u64,
    max_bytes: u64,
    chunks_used: u64,
    bytes_used: u64,
}

impl StreamLimiter {
    /// Create a limiter with explicit ceilings.
    pub fn new(max_chunks: u64, max_bytes: u64) -> Self {
        Self {
            max_chunks,
            max_bytes,
            chunks_used: 0,
            bytes_used: 0,
        }
    }

    /// Chunks sealed so far.
    pub fn chunks_used(&self) -> u64 {
        self.chunks_used
    }

    /// Plaintext bytes sealed so far.
    pub fn bytes_used(&self) -> u64 {
        self.bytes_used
    }

    /// Seal a chunk, first charging it against the ceilings.
    ///
    /// # Errors
    /// `AEAD_LIMIT` once the chunk count is exhausted or the chunk would
    /// push cumulative plaintext past the byte ceiling.
    pub fn seal_chunk(
        &mut self,
        key: &[u8],
        nonce_prefix: &[u8],
        seq: u64,
        chunk: &[u8],
        aad: Option<&[u8]>,
    ) -> X402Result<Vec<u8>> {
        if self.chunks_used >= self.max_chunks {
            return Err(X402Error::AeadLimit);
        }
        let next_bytes = self
            .bytes_used
            .checked_add(chunk.len() as u64)
            .ok_or(X402Error::AeadLimit)?;
        if next_bytes > self.max_bytes {
            return Err(X402Error::AeadLimit);
        }
        let sealed = seal_chunk(key, nonce_prefix, seq, chunk, aad)?;
        self.chunks_used += 1;
        self.bytes_used = next_bytes;
        Ok(sealed)
    }
}

impl Default for StreamLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHUNKS, DEFAULT_MAX_BYTES)
    }
}
