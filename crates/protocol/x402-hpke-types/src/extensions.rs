//! Approved extension header registry.
//!
//! Only headers from this fixed list may ride alongside the core payment
//! headers in a transport. Matching is case-insensitive; the registry
//! spelling is what gets stored and authenticated.

use crate::error::{X402Error, X402Result};

/// The fixed allow-list of extension header names.
pub const APPROVED_EXTENSION_HEADERS: [&str; 4] = [
    "X-402-Routing",
    "X-402-Limits",
    "X-402-Acceptable",
    "X-402-Metadata",
];

/// Returns true if `header` names an approved extension (case-insensitive).
pub fn is_approved_extension_header(header: &str) -> bool {
    APPROVED_EXTENSION_HEADERS
        .iter()
        .any(|h| h.eq_ignore_ascii_case(header))
}

/// Resolve an extension header to its registry spelling.
///
/// # Errors
/// `X402_EXTENSION_UNAPPROVED` if the header is not in the registry.
pub fn canonicalize_extension_header(header: &str) -> X402Result<&'static str> {
    APPROVED_EXTENSION_HEADERS
        .iter()
        .find(|h| h.eq_ignore_ascii_case(header))
        .copied()
        .ok_or_else(|| X402Error::ExtensionUnapproved {
            header: header.to_string(),
        })
}
