//! Canonical AAD construction and parsing.
//!
//! The AAD binds namespace, exposed headers, and body into one byte string
//! that the AEAD authenticates in full:
//!
//! ```text
//! <ns> | "v1" | <headers_json> | <body_json>
//! ```
//!
//! `headers_json` is the canonical JSON of the normalized header array
//! (sorted by lowercased name); `body_json` is the canonical JSON of the
//! normalized body object.

use std::collections::HashSet;

use serde_json::Value;

use x402_hpke_types::{
    canonical_core_header_name, canonicalize_extension_header, validate_namespace, HeaderEntry,
    JsonObject, X402Error, X402Result,
};

use crate::canonical::{canonicalize, to_canonical_string};

/// Version segment inside the AAD.
const AAD_VERSION: &str = "v1";

/// The canonical AAD bytes plus the normalized views they were built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AadParts {
    /// The authenticated byte string
    pub bytes: Vec<u8>,

    /// Headers with canonical names and normalized values, sorted by
    /// lowercased name
    pub headers: Vec<HeaderEntry>,

    /// Deep-normalized body
    pub body: JsonObject,
}

fn canonical_header_name(name: &str) -> X402Result<&'static str> {
    match canonical_core_header_name(name) {
        Some(canonical) => Ok(canonical),
        None => canonicalize_extension_header(name),
    }
}

/// Build the canonical AAD for a namespace, header list, and body.
///
/// # Errors
/// - `NS_FORBIDDEN` for an empty or reserved namespace
/// - `X402_EXTENSION_UNAPPROVED` for a header outside the registry
/// - `X402_EXTENSION_DUPLICATE` for a repeated header name
pub fn build_aad(
    namespace: &str,
    headers: &[HeaderEntry],
    body: &JsonObject,
) -> X402Result<AadParts> {
    validate_namespace(namespace)?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut normalized: Vec<HeaderEntry> = Vec::with_capacity(headers.len());
    for entry in headers {
        let name = canonical_header_name(&entry.header)?;
        if !seen.insert(name.to_ascii_lowercase()) {
            return Err(X402Error::ExtensionDuplicate {
                header: name.to_string(),
            });
        }
        normalized.push(HeaderEntry::new(name, canonicalize(&entry.value)?));
    }
    normalized.sort_by(|a, b| {
        a.header
            .to_ascii_lowercase()
            .cmp(&b.header.to_ascii_lowercase())
    });

    let headers_value = Value::Array(
        normalized
            .iter()
            .map(|e| serde_json::to_value(e).map_err(|_| X402Error::invalid("bad header value")))
            .collect::<X402Result<Vec<_>>>()?,
    );
    let headers_json = to_canonical_string(&headers_value)?;

    let body_value = canonicalize(&Value::Object(body.clone()))?;
    let body_json = to_canonical_string(&body_value)?;
    let body = match body_value {
        Value::Object(map) => map,
        _ => unreachable!("canonicalize preserves value kind"),
    };

    let bytes = format!("{namespace}|{AAD_VERSION}|{headers_json}|{body_json}").into_bytes();
    Ok(AadParts {
        bytes,
        headers: normalized,
        body,
    })
}

/// Parse AAD bytes back into namespace, headers, and body.
///
/// Only the `ns|v1|headers_json|body_json` layout is accepted; anything
/// else (including the historical two-segment object layout) is rejected.
pub fn parse_aad(bytes: &[u8]) -> X402Result<(String, Vec<HeaderEntry>, JsonObject)> {
    let text =
        std::str::from_utf8(bytes).map_err(|_| X402Error::invalid("aad is not utf-8"))?;

    let (namespace, rest) = text
        .split_once('|')
        .ok_or_else(|| X402Error::invalid("aad missing namespace segment"))?;
    let (version, rest) = rest
        .split_once('|')
        .ok_or_else(|| X402Error::invalid("aad missing version segment"))?;
    if version != AAD_VERSION {
        return Err(X402Error::invalid("unsupported aad version"));
    }

    // headers_json may itself contain '|' inside string values, so split by
    // parsing one complete JSON value and resuming after it.
    let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Value>();
    let headers_value = stream
        .next()
        .and_then(Result::ok)
        .ok_or_else(|| X402Error::invalid("aad headers segment unparseable"))?;
    let consumed = stream.byte_offset();

    let items = headers_value
        .as_array()
        .ok_or_else(|| X402Error::invalid("aad headers segment is not an array"))?;
    let headers = items
        .iter()
        .map(|item| {
            serde_json::from_value::<HeaderEntry>(item.clone())
                .map_err(|_| X402Error::invalid("aad header entry malformed"))
        })
        .collect::<X402Result<Vec<_>>>()?;

    let body_text = rest
        .get(consumed..)
        .and_then(|tail| tail.strip_prefix('|'))
        .ok_or_else(|| X402Error::invalid("aad missing body segment"))?;
    let body_value: Value = serde_json::from_str(body_text)
        .map_err(|_| X402Error::invalid("aad body segment unparseable"))?;
    let body = match body_value {
        Value::Object(map) => map,
        _ => return Err(X402Error::invalid("aad body segment is not an object")),
    };

    Ok((namespace.to_string(), headers, body))
}
