//! The envelope wire object and suite identifiers.

use serde::{Deserialize, Serialize};

use crate::error::{X402Error, X402Result};

/// Envelope type tag.
pub const ENVELOPE_TYP: &str = "hpke-envelope";

/// Envelope format version.
pub const ENVELOPE_VERSION: &str = "1";

/// KEM identifier: ephemeral X25519 key agreement.
pub const KEM_X25519: &str = "X25519";

/// KDF identifier: HKDF with SHA-256.
pub const KDF_HKDF_SHA256: &str = "HKDF-SHA256";

/// AEAD identifier: ChaCha20-Poly1305 (IETF).
pub const AEAD_CHACHA20_POLY1305: &str = "CHACHA20-POLY1305";

/// The namespace label reserved for the protocol itself.
pub const RESERVED_NAMESPACE: &str = "x402";

/// Reject empty namespaces and the reserved `x402` label.
pub fn validate_namespace(namespace: &str) -> X402Result<()> {
    if namespace.is_empty() || namespace.eq_ignore_ascii_case(RESERVED_NAMESPACE) {
        return Err(X402Error::NsForbidden);
    }
    Ok(())
}

/// The sealed envelope as it appears on the wire.
///
/// All binary fields (`enc`, `aad`, `ct`) are base64url without padding.
/// Field order in the emitted JSON is not contractual; consumers parse the
/// object as a map. The AAD bytes, once decoded, are contractual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Always `hpke-envelope`
    pub typ: String,

    /// Format version, always `1`
    pub ver: String,

    /// Application namespace
    pub ns: String,

    /// Opaque recipient key identifier
    pub kid: String,

    /// KEM identifier
    pub kem: String,

    /// KDF identifier
    pub kdf: String,

    /// AEAD identifier
    pub aead: String,

    /// Ephemeral X25519 public key (32 bytes, base64url)
    pub enc: String,

    /// Canonical AAD bytes (base64url)
    pub aad: String,

    /// AEAD ciphertext: plaintext followed by the 16-byte tag (base64url)
    pub ct: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_validation() {
        assert!(validate_namespace("myapp").is_ok());
        assert_eq!(
            validate_namespace("").unwrap_err().code(),
            "NS_FORBIDDEN"
        );
        assert_eq!(
            validate_namespace("x402").unwrap_err().code(),
            "NS_FORBIDDEN"
        );
        assert_eq!(
            validate_namespace("X402").unwrap_err().code(),
            "NS_FORBIDDEN"
        );
    }

    #[test]
    fn test_envelope_serde_roundtrip() {
        let envelope = Envelope {
            typ: ENVELOPE_TYP.into(),
            ver: ENVELOPE_VERSION.into(),
            ns: "myapp".into(),
            kid: "kid1".into(),
            kem: KEM_X25519.into(),
            kdf: KDF_HKDF_SHA256.into(),
            aead: AEAD_CHACHA20_POLY1305.into(),
            enc: "AAAA".into(),
            aad: "BBBB".into(),
            ct: "CCCC".into(),
        };
        let json = serde_json::to_string(&envelope).unwrap();
        let parsed: Envelope = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, envelope);
    }
}
