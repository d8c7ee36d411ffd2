//! Data structures for the x402-hpke envelope core.
//!
//! This crate holds the pieces every other layer shares:
//!
//! - **Error taxonomy**: one flat [`X402Error`] enum, each variant carrying
//!   a stable machine-readable code
//! - **Transport model**: the validated [`SecureTransport`] value object and
//!   its five kinds
//! - **Extension registry**: the fixed allow-list of extension headers
//! - **Envelope**: the sealed wire object and suite identifiers
//! - **X-Payment model**: the typed header payload shell
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use x402_hpke_types::{SecureTransport, TransportKind};
//!
//! let content = json!({"payload": {"invoiceId": "inv_1"}});
//! let transport = SecureTransport::new(
//!     TransportKind::Payment,
//!     content.as_object().unwrap().clone(),
//!     None,
//!     vec![],
//! )
//! .unwrap();
//! assert_eq!(transport.core_header().unwrap().header, "X-Payment");
//! ```

mod envelope;
mod error;
mod extensions;
mod headers;
mod payment;
mod transport;

pub use envelope::{
    validate_namespace, Envelope, AEAD_CHACHA20_POLY1305, ENVELOPE_TYP, ENVELOPE_VERSION,
    KDF_HKDF_SHA256, KEM_X25519, RESERVED_NAMESPACE,
};
pub use error::{X402Error, X402Result};
pub use extensions::{
    canonicalize_extension_header, is_approved_extension_header, APPROVED_EXTENSION_HEADERS,
};
pub use headers::{
    canonical_core_header_name, is_core_header, HeaderEntry, X_PAYMENT, X_PAYMENT_RESPONSE,
};
pub use payment::{XPaymentHeader, XPaymentPayload, X402_VERSION};
pub use transport::{JsonObject, SecureTransport, TransportKind};
