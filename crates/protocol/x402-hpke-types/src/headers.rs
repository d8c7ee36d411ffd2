//! Canonical header names and the header/value pair carried in the AAD.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical spelling of the payment request header.
pub const X_PAYMENT: &str = "X-Payment";

/// Canonical spelling of the payment settlement header.
pub const X_PAYMENT_RESPONSE: &str = "X-Payment-Response";

/// Resolve a core header name to its canonical mixed-case spelling.
///
/// Matching is case-insensitive: on the wire these headers commonly appear
/// as `X-PAYMENT` / `X-PAYMENT-RESPONSE`.
pub fn canonical_core_header_name(name: &str) -> Option<&'static str> {
    if name.eq_ignore_ascii_case(X_PAYMENT) {
        Some(X_PAYMENT)
    } else if name.eq_ignore_ascii_case(X_PAYMENT_RESPONSE) {
        Some(X_PAYMENT_RESPONSE)
    } else {
        None
    }
}

/// Returns true if `name` is one of the two core payment headers.
pub fn is_core_header(name: &str) -> bool {
    canonical_core_header_name(name).is_some()
}

/// A named header and its structured value, as bound into the AAD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    /// Header name (canonical case once normalized)
    pub header: String,

    /// Structured header value
    pub value: Value,
}

impl HeaderEntry {
    /// Create a header entry.
    pub fn new(header: impl Into<String>, value: Value) -> Self {
        Self {
            header: header.into(),
            value,
        }
    }
}
