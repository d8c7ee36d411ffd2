//! Error types for the x402-hpke envelope core.
//!
//! A single flat taxonomy shared by every crate in the workspace. Each
//! variant maps 1:1 to a stable machine-readable code string; the code is
//! what crosses process boundaries, the variant is what Rust code matches
//! on.

use thiserror::Error;

/// Result type for x402-hpke operations.
pub type X402Result<T> = Result<T, X402Error>;

/// Errors that can occur while building transports, sealing, opening, or
/// streaming.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum X402Error {
    /// Namespace is empty or uses the reserved `x402` label.
    #[error("namespace forbidden: empty or reserved")]
    NsForbidden,

    /// Envelope failed structural validation (version, namespace, base64,
    /// or AAD layout).
    #[error("invalid envelope: {reason}")]
    InvalidEnvelope {
        /// What failed to validate
        reason: String,
    },

    /// The envelope's AEAD identifier differs from the engine's.
    #[error("aead mismatch")]
    AeadMismatch,

    /// A suite component (AEAD, KEM, or KDF string) is not implemented.
    #[error("unsupported suite value: {value}")]
    AeadUnsupported {
        /// The offending suite string
        value: String,
    },

    /// An expected key id was supplied and does not match the envelope.
    #[error("kid mismatch: expected {expected}, got {actual}")]
    KidMismatch {
        /// The kid the caller expected
        expected: String,
        /// The kid carried by the envelope
        actual: String,
    },

    /// Ephemeral public key, recipient public key, or shared secret is the
    /// all-zero point.
    #[error("low-order or all-zero X25519 point")]
    EcdhLowOrder,

    /// A sidecar entry referenced a name absent from the authenticated
    /// headers/body.
    #[error("public entry not bound in aad: {name}")]
    PublicKeyNotInAad {
        /// The unmatched sidecar key
        name: String,
    },

    /// Sidecar bytes differ from the authenticated value, or AEAD
    /// authentication failed.
    #[error("aad mismatch")]
    AadMismatch,

    /// Extension header is not in the approved registry.
    #[error("unapproved extension header: {header}")]
    ExtensionUnapproved {
        /// The rejected header name
        header: String,
    },

    /// The same header name (case-insensitive) appeared more than once.
    #[error("duplicate header: {header}")]
    ExtensionDuplicate {
        /// The duplicated header name
        header: String,
    },

    /// Payment transport content is missing the `payload` key.
    #[error("payment content missing payload")]
    PaymentPayload,

    /// Payment transport must not carry an HTTP status.
    #[error("payment transport cannot carry an http status")]
    PaymentHttpCode,

    /// Payment-response content must be a non-empty mapping.
    #[error("payment response content must be non-empty")]
    PaymentResponseContent,

    /// Payment-response status must be absent or 200.
    #[error("payment response status must be 200")]
    PaymentResponseHttpCode,

    /// Payment-required content must be a non-empty mapping.
    #[error("payment required content must be non-empty")]
    PaymentRequiredContent,

    /// Generic request must not carry an HTTP status.
    #[error("request transport cannot carry an http status")]
    OtherRequestHttpCode,

    /// Generic response must not use status 402.
    #[error("generic response cannot use status 402")]
    OtherResponse402,

    /// Streaming key must be exactly 32 bytes.
    #[error("stream key must be 32 bytes, got {actual}")]
    StreamKeyLen {
        /// Length supplied
        actual: usize,
    },

    /// Streaming nonce prefix must be exactly 16 bytes.
    #[error("stream nonce prefix must be 16 bytes, got {actual}")]
    StreamNoncePrefixLen {
        /// Length supplied
        actual: usize,
    },

    /// Chunk sequence numbers must be non-negative. Sequences are `u64`
    /// here, so this cannot arise locally; the code exists for wire parity
    /// with peer implementations.
    #[error("negative chunk sequence")]
    SeqNegative,

    /// Per-key chunk or byte ceiling reached.
    #[error("streaming aead limit reached")]
    AeadLimit,

    /// X-Payment header payload failed structural validation.
    #[error("malformed x-payment payload")]
    XPaymentSchema,

    /// X-Payment header payload carries an unsupported protocol version.
    #[error("unsupported x-payment version")]
    XPaymentVersion,

    /// No key with the requested kid was resolvable.
    #[error("no key for kid: {kid}")]
    KidNotFound {
        /// The unresolved key id
        kid: String,
    },
}

impl X402Error {
    /// The stable machine-readable code for this error.
    ///
    /// Codes are part of the wire contract and never change between
    /// releases.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NsForbidden => "NS_FORBIDDEN",
            Self::InvalidEnvelope { .. } => "INVALID_ENVELOPE",
            Self::AeadMismatch => "AEAD_MISMATCH",
            Self::AeadUnsupported { .. } => "AEAD_UNSUPPORTED",
            Self::KidMismatch { .. } => "KID_MISMATCH",
            Self::EcdhLowOrder => "ECDH_LOW_ORDER",
            Self::PublicKeyNotInAad { .. } => "PUBLIC_KEY_NOT_IN_AAD",
            Self::AadMismatch => "AAD_MISMATCH",
            Self::ExtensionUnapproved { .. } => "X402_EXTENSION_UNAPPROVED",
            Self::ExtensionDuplicate { .. } => "X402_EXTENSION_DUPLICATE",
            Self::PaymentPayload => "PAYMENT_PAYLOAD",
            Self::PaymentHttpCode => "PAYMENT_HTTP_CODE",
            Self::PaymentResponseContent => "PAYMENT_RESPONSE_CONTENT",
            Self::PaymentResponseHttpCode => "PAYMENT_RESPONSE_HTTP_CODE",
            Self::PaymentRequiredContent => "PAYMENT_REQUIRED_CONTENT",
            Self::OtherRequestHttpCode => "OTHER_REQUEST_HTTP_CODE",
            Self::OtherResponse402 => "OTHER_RESPONSE_402",
            Self::StreamKeyLen { .. } => "STREAM_KEY_LEN",
            Self::StreamNoncePrefixLen { .. } => "STREAM_NONCE_PREFIX_LEN",
            Self::SeqNegative => "SEQ_NEGATIVE",
            Self::AeadLimit => "AEAD_LIMIT",
            Self::XPaymentSchema => "X_PAYMENT_SCHEMA",
            Self::XPaymentVersion => "X_PAYMENT_VERSION",
            Self::KidNotFound { .. } => "KID_NOT_FOUND",
        }
    }

    /// The HTTP status an adapter layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::KidMismatch { .. } | Self::KidNotFound { .. } => 404,
            Self::AeadLimit => 429,
            Self::AeadUnsupported { .. } => 501,
            _ => 400,
        }
    }

    /// Shorthand for [`X402Error::InvalidEnvelope`] with a reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidEnvelope {
            reason: reason.into(),
        }
    }
}
