//! Selective disclosure: sidecar projection at seal, verification at open.
//!
//! The sidecar is advisory; the envelope alone is self-authenticating.
//! Every sidecar byte is a projection of the AAD, so intermediaries can
//! route or log on the chosen fields while the recipient re-derives the
//! same bytes and compares in constant time.

use serde_json::Value;

use x402_hpke_crypto::ct_eq;
use x402_hpke_types::{
    is_approved_extension_header, is_core_header, HeaderEntry, JsonObject, X402Error, X402Result,
};

use crate::canonical::to_canonical_string;

/// The cleartext mapping returned alongside an envelope.
pub type Sidecar = JsonObject;

/// Which transport entities to expose in the sidecar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicSelection {
    /// Expose every header and body key
    All,
    /// Expose the named headers (case-insensitive) and body keys (exact)
    Names(Vec<String>),
}

impl PublicSelection {
    /// Build a selection from a list of names.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Names(names.into_iter().map(Into::into).collect())
    }

    /// Parse the string form: `all` or `*` selects everything; any other
    /// string selects that single name.
    pub fn parse(input: &str) -> Self {
        if input.eq_ignore_ascii_case("all") || input == "*" {
            Self::All
        } else {
            Self::Names(vec![input.to_string()])
        }
    }

    fn selects_header(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Names(names) => names.iter().any(|n| n.eq_ignore_ascii_case(name)),
        }
    }

    fn selects_body_key(&self, key: &str) -> bool {
        match self {
            Self::All => true,
            Self::Names(names) => names.iter().any(|n| n == key),
        }
    }
}

/// Project the selected entities out of the normalized headers/body.
///
/// A 402 transport never exposes `X-Payment` or `X-Payment-Response`
/// regardless of the selection. Returns `None` when nothing is selected.
pub(crate) fn project(
    selection: &PublicSelection,
    headers: &[HeaderEntry],
    body: &JsonObject,
    http_status: Option<u16>,
) -> X402Result<Option<Sidecar>> {
    let mut out = Sidecar::new();

    for entry in headers {
        if http_status == Some(402) && is_core_header(&entry.header) {
            continue;
        }
        if selection.selects_header(&entry.header) {
            out.insert(
                entry.header.clone(),
                Value::String(to_canonical_string(&entry.value)?),
            );
        }
    }

    for (key, value) in body {
        if selection.selects_body_key(key) {
            out.insert(key.clone(), value.clone());
        }
    }

    Ok(if out.is_empty() { None } else { Some(out) })
}

/// Check supplied public header values against the authenticated headers.
///
/// Names that match no authenticated header are ignored unless they are
/// core payment headers or approved extensions, which must be bound.
pub(crate) fn verify_public_headers(
    supplied: &JsonObject,
    headers: &[HeaderEntry],
) -> X402Result<()> {
    for (name, value) in supplied {
        let found = headers
            .iter()
            .find(|h| h.header.eq_ignore_ascii_case(name));
        match found {
            Some(entry) => {
                let expected = to_canonical_string(&entry.value)?;
                let got = match value {
                    Value::String(s) => s.clone(),
                    other => to_canonical_string(other)?,
                };
                if !ct_eq(got.as_bytes(), expected.as_bytes()) {
                    return Err(X402Error::AadMismatch);
                }
            }
            None => {
                if is_core_header(name) || is_approved_extension_header(name) {
                    return Err(X402Error::PublicKeyNotInAad { name: name.clone() });
                }
            }
        }
    }
    Ok(())
}

/// Check supplied public body entries against the authenticated body.
pub(crate) fn verify_public_body(supplied: &JsonObject, body: &JsonObject) -> X402Result<()> {
    for (key, value) in supplied {
        let actual = body
            .get(key)
            .ok_or_else(|| X402Error::PublicKeyNotInAad { name: key.clone() })?;
        let expected = to_canonical_string(actual)?;
        let got = to_canonical_string(value)?;
        if !ct_eq(got.as_bytes(), expected.as_bytes()) {
            return Err(X402Error::AadMismatch);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> JsonObject {
        value.as_object().unwrap().clone()
    }

    fn sample_headers() -> Vec<HeaderEntry> {
        vec![
            HeaderEntry::new("X-402-Routing", json!({"hop": 1})),
            HeaderEntry::new("X-Payment", json!({"payload": {"invoiceId": "inv_1"}})),
        ]
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(PublicSelection::parse("all"), PublicSelection::All);
        assert_eq!(PublicSelection::parse("*"), PublicSelection::All);
        assert_eq!(
            PublicSelection::parse("X-Payment"),
            PublicSelection::Names(vec!["X-Payment".into()])
        );
    }

    #[test]
    fn test_project_all() {
        let body = obj(json!({"k": 1}));
        let sidecar = project(&PublicSelection::All, &sample_headers(), &body, None)
            .unwrap()
            .unwrap();
        assert_eq!(sidecar.len(), 3);
        assert_eq!(
            sidecar.get("X-Payment"),
            Some(&json!("{\"payload\":{\"invoiceId\":\"inv_1\"}}"))
        );
        assert_eq!(sidecar.get("k"), Some(&json!(1)));
    }

    #[test]
    fn test_project_header_selection_is_case_insensitive() {
        let sidecar = project(
            &PublicSelection::names(["x-payment"]),
            &sample_headers(),
            &JsonObject::new(),
            None,
        )
        .unwrap()
        .unwrap();
        assert_eq!(sidecar.len(), 1);
        assert!(sidecar.contains_key("X-Payment"));
    }

    #[test]
    fn test_project_body_selection_is_exact() {
        let body = obj(json!({"Need": true}));
        let sidecar = project(&PublicSelection::names(["need"]), &[], &body, None).unwrap();
        assert!(sidecar.is_none());
    }

    #[test]
    fn test_402_suppresses_payment_headers() {
        let body = obj(json!({"need": true}));
        let sidecar = project(&PublicSelection::All, &sample_headers(), &body, Some(402))
            .unwrap()
            .unwrap();
        assert!(!sidecar.contains_key("X-Payment"));
        assert!(!sidecar.contains_key("X-Payment-Response"));
        assert!(sidecar.contains_key("X-402-Routing"));
        assert_eq!(sidecar.get("need"), Some(&json!(true)));
    }

    #[test]
    fn test_empty_selection_yields_none() {
        let sidecar = project(
            &PublicSelection::names(["absent"]),
            &sample_headers(),
            &JsonObject::new(),
            None,
        )
        .unwrap();
        assert!(sidecar.is_none());
    }

    #[test]
    fn test_verify_headers_accepts_projection() {
        let headers = sample_headers();
        let sidecar = project(&PublicSelection::All, &headers, &JsonObject::new(), None)
            .unwrap()
            .unwrap();
        verify_public_headers(&sidecar, &headers).unwrap();
    }

    #[test]
    fn test_verify_headers_rejects_mutation() {
        let headers = sample_headers();
        let mut sidecar = project(&PublicSelection::All, &headers, &JsonObject::new(), None)
            .unwrap()
            .unwrap();
        sidecar.insert(
            "X-Payment".into(),
            json!("{\"payload\":{\"invoiceId\":\"inv_2\"}}"),
        );
        let err = verify_public_headers(&sidecar, &headers).unwrap_err();
        assert_eq!(err.code(), "AAD_MISMATCH");
    }

    #[test]
    fn test_verify_headers_requires_known_names_in_aad() {
        let supplied = obj(json!({"X-402-Limits": "{}"}));
        let err = verify_public_headers(&supplied, &sample_headers()).unwrap_err();
        assert_eq!(err.code(), "PUBLIC_KEY_NOT_IN_AAD");
    }

    #[test]
    fn test_verify_headers_ignores_unrecognized_names() {
        let supplied = obj(json!({"X-Request-Id": "abc"}));
        verify_public_headers(&supplied, &sample_headers()).unwrap();
    }

    #[test]
    fn test_verify_body() {
        let body = obj(json!({"b": 2}));
        verify_public_body(&obj(json!({"b": 2})), &body).unwrap();
        let err = verify_public_body(&obj(json!({"b": 3})), &body).unwrap_err();
        assert_eq!(err.code(), "AAD_MISMATCH");
        let err = verify_public_body(&obj(json!({"c": 1})), &body).unwrap_err();
        assert_eq!(err.code(), "PUBLIC_KEY_NOT_IN_AAD");
    }
}
