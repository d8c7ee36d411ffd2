//! The envelope engine: seal and open.
//!
//! An [`Hpke`] value is an immutable binding of a namespace to the fixed
//! cipher suite (X25519 → HKDF-SHA256 → ChaCha20-Poly1305). Seal and open
//! are pure functions of their inputs plus the OS random source; two
//! engines with the same namespace are interchangeable.

use serde_json::Value;
use tracing::debug;
use zeroize::Zeroizing;

use x402_hpke_crypto::{
    aead_open, aead_seal, b64u_decode, b64u_decode32, b64u_encode, derive_key_nonce,
    ephemeral_from_seed, generate_ephemeral, is_all_zero, x25519_public, x25519_shared,
    PrivateJwk, PublicJwk,
};
use x402_hpke_types::{
    validate_namespace, Envelope, HeaderEntry, JsonObject, SecureTransport, X402Error,
    X402Result, AEAD_CHACHA20_POLY1305, ENVELOPE_TYP, ENVELOPE_VERSION, KDF_HKDF_SHA256,
    KEM_X25519, RESERVED_NAMESPACE,
};

use crate::aad::{build_aad, parse_aad};
use crate::canonical::to_canonical_string;
use crate::sidecar::{
    project, verify_public_headers, verify_public_body, PublicSelection, Sidecar,
};

const INFO_LABEL: &str = "x402-hpke:v1";

/// Engine configuration. Suite fields default to the only supported
/// values; alternate strings are reserved and rejected.
#[derive(Debug, Clone)]
pub struct HpkeConfig {
    /// Application namespace (never `x402`)
    pub namespace: String,

    /// KEM identifier
    pub kem: String,

    /// KDF identifier
    pub kdf: String,

    /// AEAD identifier
    pub aead: String,

    /// Default disclosure selection applied when `seal` gets none
    pub public_entities: Option<PublicSelection>,
}

impl HpkeConfig {
    /// Configuration with the default suite for a namespace.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            kem: KEM_X25519.into(),
            kdf: KDF_HKDF_SHA256.into(),
            aead: AEAD_CHACHA20_POLY1305.into(),
            public_entities: None,
        }
    }
}

/// A namespace-bound envelope engine.
#[derive(Debug, Clone)]
pub struct Hpke {
    namespace: String,
    default_public: Option<PublicSelection>,
}

/// Create an engine with the default suite.
pub fn create_hpke(namespace: &str) -> X402Result<Hpke> {
    Hpke::new(HpkeConfig::new(namespace))
}

/// Optional inputs to [`Hpke::open`].
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    /// Require the envelope to carry exactly this kid
    pub expected_kid: Option<String>,

    /// Public header sidecar entries to verify against the AAD
    pub public_headers: Option<JsonObject>,

    /// Public body sidecar entries to verify against the AAD
    pub public_body: Option<JsonObject>,
}

/// Everything recovered from a successfully opened envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opened {
    /// Decrypted plaintext (canonical JSON of the body)
    pub plaintext: Vec<u8>,

    /// Body parsed out of the authenticated AAD
    pub body: JsonObject,

    /// Headers parsed out of the authenticated AAD
    pub headers: Vec<HeaderEntry>,
}

impl Hpke {
    /// Validate a configuration and bind the engine.
    ///
    /// # Errors
    /// - `NS_FORBIDDEN` for an empty or reserved namespace
    /// - `AEAD_UNSUPPORTED` for any suite string other than the documented
    ///   X25519 / HKDF-SHA256 / CHACHA20-POLY1305 values
    pub fn new(config: HpkeConfig) -> X402Result<Self> {
        validate_namespace(&config.namespace)?;
        if config.kem != KEM_X25519 {
            return Err(X402Error::AeadUnsupported { value: config.kem });
        }
        if config.kdf != KDF_HKDF_SHA256 {
            return Err(X402Error::AeadUnsupported { value: config.kdf });
        }
        if config.aead != AEAD_CHACHA20_POLY1305 {
            return Err(X402Error::AeadUnsupported { value: config.aead });
        }
        Ok(Self {
            namespace: config.namespace,
            default_public: config.public_entities,
        })
    }

    /// The namespace this engine is bound to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Seal a transport for `recipient`, labeled with `kid`.
    ///
    /// Returns the envelope and, when a disclosure selection matched
    /// anything, the sidecar to ship alongside it.
    pub fn seal(
        &self,
        kid: &str,
        recipient: &PublicJwk,
        transport: &SecureTransport,
        make_entities_public: Option<PublicSelection>,
    ) -> X402Result<(Envelope, Option<Sidecar>)> {
        let (eph_secret, eph_public) = generate_ephemeral();
        self.seal_inner(kid, recipient, transport, make_entities_public, eph_secret, eph_public)
    }

    /// Seal with an ephemeral key derived from `seed`.
    ///
    /// Same inputs, same envelope. Intended for known-answer tests and
    /// cross-implementation vectors; never reuse a seed in production.
    pub fn seal_with_ephemeral_seed(
        &self,
        kid: &str,
        recipient: &PublicJwk,
        transport: &SecureTransport,
        make_entities_public: Option<PublicSelection>,
        seed: [u8; 32],
    ) -> X402Result<(Envelope, Option<Sidecar>)> {
        let (eph_secret, eph_public) = ephemeral_from_seed(&seed);
        self.seal_inner(kid, recipient, transport, make_entities_public, eph_secret, eph_public)
    }

    fn seal_inner(
        &self,
        kid: &str,
        recipient: &PublicJwk,
        transport: &SecureTransport,
        make_entities_public: Option<PublicSelection>,
        eph_secret: Zeroizing<[u8; 32]>,
        eph_public: [u8; 32],
    ) -> X402Result<(Envelope, Option<Sidecar>)> {
        let headers = transport.headers();
        let aad = build_aad(&self.namespace, &headers, transport.body())?;
        let plaintext = to_canonical_string(&Value::Object(aad.body.clone()))?.into_bytes();

        let recipient_point = recipient.to_point_bytes()?;
        if is_all_zero(&recipient_point) {
            return Err(X402Error::EcdhLowOrder);
        }
        let shared = x25519_shared(&eph_secret, &recipient_point);
        if is_all_zero(&*shared) {
            return Err(X402Error::EcdhLowOrder);
        }

        let enc = b64u_encode(&eph_public);
        let info = self.hkdf_info(&enc, &b64u_encode(&recipient_point));
        let (key, nonce) = derive_key_nonce(&shared, &info);
        let ciphertext = aead_seal(&key, &nonce, &aad.bytes, &plaintext)?;

        let envelope = Envelope {
            typ: ENVELOPE_TYP.into(),
            ver: ENVELOPE_VERSION.into(),
            ns: self.namespace.clone(),
            kid: kid.to_string(),
            kem: KEM_X25519.into(),
            kdf: KDF_HKDF_SHA256.into(),
            aead: AEAD_CHACHA20_POLY1305.into(),
            enc,
            aad: b64u_encode(&aad.bytes),
            ct: b64u_encode(&ciphertext),
        };
        debug!(ns = %self.namespace, kid, "sealed envelope");

        let selection = make_entities_public.or_else(|| self.default_public.clone());
        let sidecar = match selection {
            Some(selection) => {
                project(&selection, &aad.headers, &aad.body, transport.http_status())?
            }
            None => None,
        };
        Ok((envelope, sidecar))
    }

    /// Open an envelope with the recipient's private key.
    ///
    /// Any supplied public sidecar entries are verified against the
    /// authenticated AAD before the result is returned.
    pub fn open(
        &self,
        envelope: &Envelope,
        recipient: &PrivateJwk,
        options: OpenOptions,
    ) -> X402Result<Opened> {
        if envelope.ver != ENVELOPE_VERSION {
            return Err(X402Error::invalid("unsupported envelope version"));
        }
        if envelope.ns.is_empty() || envelope.ns.eq_ignore_ascii_case(RESERVED_NAMESPACE) {
            return Err(X402Error::invalid("forbidden envelope namespace"));
        }
        if envelope.ns != self.namespace {
            return Err(X402Error::invalid("envelope namespace mismatch"));
        }
        if envelope.aead != AEAD_CHACHA20_POLY1305 {
            return Err(X402Error::AeadMismatch);
        }
        if let Some(expected) = &options.expected_kid {
            if *expected != envelope.kid {
                return Err(X402Error::KidMismatch {
                    expected: expected.clone(),
                    actual: envelope.kid.clone(),
                });
            }
        }

        let aad_bytes = b64u_decode(&envelope.aad)?;
        let enc = b64u_decode32(&envelope.enc)?;
        if is_all_zero(&enc) {
            return Err(X402Error::EcdhLowOrder);
        }
        let ciphertext = b64u_decode(&envelope.ct)?;

        let scalar = recipient.to_scalar_bytes()?;
        let shared = x25519_shared(&scalar, &enc);
        if is_all_zero(&*shared) {
            return Err(X402Error::EcdhLowOrder);
        }
        let recipient_point = x25519_public(&scalar);

        let info = self.hkdf_info(&b64u_encode(&enc), &b64u_encode(&recipient_point));
        let (key, nonce) = derive_key_nonce(&shared, &info);
        let plaintext = aead_open(&key, &nonce, &aad_bytes, &ciphertext)?;

        let (aad_ns, headers, body) = parse_aad(&aad_bytes)?;
        if aad_ns != envelope.ns {
            return Err(X402Error::invalid("aad namespace mismatch"));
        }

        if let Some(public_headers) = &options.public_headers {
            verify_public_headers(public_headers, &headers)?;
        }
        if let Some(public_body) = &options.public_body {
            verify_public_body(public_body, &body)?;
        }

        debug!(ns = %self.namespace, kid = %envelope.kid, "opened envelope");
        Ok(Opened {
            plaintext,
            body,
            headers,
        })
    }

    fn hkdf_info(&self, enc: &str, pkr: &str) -> Vec<u8> {
        format!(
            "{INFO_LABEL}|KDF={KDF_HKDF_SHA256}|AEAD={AEAD_CHACHA20_POLY1305}|ns={}|enc={enc}|pkR={pkr}",
            self.namespace
        )
        .into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_rejects_reserved_namespace() {
        assert_eq!(create_hpke("x402").unwrap_err().code(), "NS_FORBIDDEN");
        assert_eq!(create_hpke("").unwrap_err().code(), "NS_FORBIDDEN");
    }

    #[test]
    fn test_factory_rejects_alternate_suites() {
        let mut config = HpkeConfig::new("myapp");
        config.aead = "AES-256-GCM".into();
        assert_eq!(
            Hpke::new(config).unwrap_err().code(),
            "AEAD_UNSUPPORTED"
        );

        let mut config = HpkeConfig::new("myapp");
        config.kem = "P-256".into();
        assert_eq!(
            Hpke::new(config).unwrap_err().code(),
            "AEAD_UNSUPPORTED"
        );

        let mut config = HpkeConfig::new("myapp");
        config.kdf = "HKDF-SHA512".into();
        assert_eq!(
            Hpke::new(config).unwrap_err().code(),
            "AEAD_UNSUPPORTED"
        );
    }

    #[test]
    fn test_info_binds_suite_namespace_and_keys() {
        let hpke = create_hpke("myapp").unwrap();
        let info = hpke.hkdf_info("ENC", "PKR");
        assert_eq!(
            info.as_slice(),
            b"x402-hpke:v1|KDF=HKDF-SHA256|AEAD=CHACHA20-POLY1305|ns=myapp|enc=ENC|pkR=PKR"
        );
    }
}
