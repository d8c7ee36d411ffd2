//! The secure transport value object.
//!
//! A `SecureTransport` is the validated input to `seal`: which payment
//! header (if any) rides in the AAD, what the encrypted body is, and which
//! HTTP status the enclosing exchange carries. The constructor is the state
//! machine: once a value exists, every combination it holds is legal, and
//! downstream code matches on the kind without re-checking.

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{X402Error, X402Result};
use crate::extensions::canonicalize_extension_header;
use crate::headers::{HeaderEntry, X_PAYMENT, X_PAYMENT_RESPONSE};

/// JSON object type used for transport content and bodies.
pub type JsonObject = Map<String, Value>;

/// The five transport kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    /// Client-side `X-Payment` request
    Payment,
    /// Server-side `X-Payment-Response` settlement confirmation
    PaymentResponse,
    /// 402 Payment Required notice
    PaymentRequired,
    /// Generic request body
    OtherRequest,
    /// Generic response body
    OtherResponse,
}

/// A validated transport: header/body/status resolved per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecureTransport {
    kind: TransportKind,
    core_header: Option<HeaderEntry>,
    body: JsonObject,
    http_status: Option<u16>,
    extensions: Vec<HeaderEntry>,
}

impl SecureTransport {
    /// Validate and construct a transport.
    ///
    /// Rules per kind:
    /// - `OtherRequest`: no status allowed; content becomes the body.
    /// - `OtherResponse`: status must not be 402; content becomes the body.
    /// - `PaymentRequired`: non-empty content; status coerced to 402.
    /// - `PaymentResponse`: non-empty content; status absent or 200;
    ///   content becomes the `X-Payment-Response` header, body is empty.
    /// - `Payment`: content must contain `payload`; no status allowed;
    ///   content becomes the `X-Payment` header, body is empty.
    ///
    /// Extension headers are canonicalized against the approved registry.
    pub fn new(
        kind: TransportKind,
        content: JsonObject,
        http_status: Option<u16>,
        extensions: Vec<HeaderEntry>,
    ) -> X402Result<Self> {
        let extensions = extensions
            .into_iter()
            .map(|e| {
                let canonical = canonicalize_extension_header(&e.header)?;
                Ok(HeaderEntry::new(canonical, e.value))
            })
            .collect::<X402Result<Vec<_>>>()?;

        let (core_header, body, http_status) = match kind {
            TransportKind::OtherRequest => {
                if http_status.is_some() {
                    return Err(X402Error::OtherRequestHttpCode);
                }
                (None, content, None)
            }
            TransportKind::OtherResponse => {
                if http_status == Some(402) {
                    return Err(X402Error::OtherResponse402);
                }
                (None, content, http_status)
            }
            TransportKind::PaymentRequired => {
                if content.is_empty() {
                    return Err(X402Error::PaymentRequiredContent);
                }
                if let Some(status) = http_status {
                    if status != 402 {
                        warn!(status, "coercing payment-required status to 402");
                    }
                }
                (None, content, Some(402))
            }
            TransportKind::PaymentResponse => {
                if content.is_empty() {
                    return Err(X402Error::PaymentResponseContent);
                }
                if !matches!(http_status, None | Some(200)) {
                    return Err(X402Error::PaymentResponseHttpCode);
                }
                let header = HeaderEntry::new(X_PAYMENT_RESPONSE, Value::Object(content));
                (Some(header), Map::new(), Some(200))
            }
            TransportKind::Payment => {
                if http_status.is_some() {
                    return Err(X402Error::PaymentHttpCode);
                }
                if !content.contains_key("payload") {
                    return Err(X402Error::PaymentPayload);
                }
                let header = HeaderEntry::new(X_PAYMENT, Value::Object(content));
                (Some(header), Map::new(), None)
            }
        };

        Ok(Self {
            kind,
            core_header,
            body,
            http_status,
            extensions,
        })
    }

    /// The transport kind.
    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    /// The core payment header, if this kind carries one.
    pub fn core_header(&self) -> Option<&HeaderEntry> {
        self.core_header.as_ref()
    }

    /// The body mapping (empty for header-carrying kinds).
    pub fn body(&self) -> &JsonObject {
        &self.body
    }

    /// The resolved HTTP status.
    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    /// Approved extension headers, in registry spelling.
    pub fn extensions(&self) -> &[HeaderEntry] {
        &self.extensions
    }

    /// The full header list bound into the AAD: core header first, then
    /// extensions.
    pub fn headers(&self) -> Vec<HeaderEntry> {
        self.core_header
            .iter()
            .chain(self.extensions.iter())
            .cloned()
            .collect()
    }
}
