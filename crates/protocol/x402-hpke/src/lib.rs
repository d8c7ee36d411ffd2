//! HPKE envelope engine for the x402 payment protocol.
//!
//! Binds an encrypted transport payload (a payment header, a 402 notice,
//! or a generic request/response body) to authenticated metadata, so that
//! only the recipient can decrypt, any cleartext sidecar is tamper-evident,
//! and a namespace prefix prevents cross-application envelope confusion.
//!
//! # Flow
//!
//! ```text
//! ┌────────────┐  SecureTransport   ┌─────────────┐   {envelope, sidecar?}
//! │  Caller     │ ─────────────────→│  Hpke::seal  │ ──────────────────────→ wire
//! │             │                   │  (X25519 →   │
//! │             │                   │   HKDF-SHA256│     sidecar is advisory:
//! │             │                   │   → ChaCha20-│     every byte re-checked
//! │             │                   │   Poly1305)  │     against the AAD on open
//! └────────────┘                   └─────────────┘
//!                                        │
//! ┌────────────┐  {plaintext, body,      ▼
//! │  Recipient  │ ←─────────────────  Hpke::open(envelope, private key,
//! │             │   headers}              expected kid?, public sidecar?)
//! └────────────┘
//! ```
//!
//! # Components
//!
//! - **[`Hpke`]** / **[`create_hpke`]**: the namespace-bound engine
//! - **[`SecureTransport`]**: validated transport (re-exported from
//!   `x402-hpke-types`)
//! - **[`PublicSelection`]**: selective-disclosure sidecar control
//! - **[`build_aad`]** / **[`parse_aad`]**: the canonical AAD byte layout
//! - **[`KeyResolver`]**: the seam behind which key storage and JWKS
//!   fetching live
//! - **helpers**: one-call constructors for the common exchange shapes
//!
//! # Usage
//!
//! ```
//! use serde_json::json;
//! use x402_hpke::{create_hpke, generate_keypair, OpenOptions, PublicSelection};
//! use x402_hpke::{SecureTransport, TransportKind};
//!
//! let hpke = create_hpke("myapp").unwrap();
//! let (public, private) = generate_keypair();
//!
//! let content = json!({"payload": {"invoiceId": "inv_1"}});
//! let transport = SecureTransport::new(
//!     TransportKind::Payment,
//!     content.as_object().unwrap().clone(),
//!     None,
//!     vec![],
//! )
//! .unwrap();
//!
//! let (envelope, sidecar) = hpke
//!     .seal(
//!         "kid1",
//!         &public,
//!         &transport,
//!         Some(PublicSelection::names(["X-Payment"])),
//!     )
//!     .unwrap();
//!
//! let opened = hpke
//!     .open(
//!         &envelope,
//!         &private,
//!         OpenOptions {
//!             public_headers: sidecar,
//!             ..Default::default()
//!         },
//!     )
//!     .unwrap();
//! assert_eq!(opened.plaintext, b"{}");
//! ```

pub mod aad;
pub mod canonical;
mod envelope;
mod helpers;
mod resolver;
mod sidecar;

pub use aad::{build_aad, parse_aad, AadParts};
pub use canonical::{canonicalize, to_canonical_string};
pub use envelope::{create_hpke, Hpke, HpkeConfig, OpenOptions, Opened};
pub use helpers::{
    create_payment, create_payment_required, create_payment_response, create_request,
    create_response,
};
pub use resolver::{KeyResolver, StaticKeyResolver};
pub use sidecar::{PublicSelection, Sidecar};

// The pieces callers need alongside the engine, re-exported from the
// protocol crates.
pub use x402_hpke_crypto::{generate_keypair, PrivateJwk, PublicJwk, StreamLimiter};
pub use x402_hpke_types::{
    Envelope, HeaderEntry, JsonObject, SecureTransport, TransportKind, X402Error, X402Result,
};
