//! Typed model of the `X-Payment` header payload.
//!
//! The envelope core treats the payment signature as opaque bytes; this
//! module only checks the structural shell (version, scheme, network,
//! payload object) so adapters can route before handing the payload to a
//! chain-specific verifier.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{X402Error, X402Result};

/// Supported x402 protocol version.
pub const X402_VERSION: u32 = 1;

/// The scheme-specific payment payload: an opaque signature plus the
/// authorization object it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XPaymentPayload {
    /// Signature over the authorization (opaque to this core)
    pub signature: String,

    /// Scheme-specific authorization object
    pub authorization: Value,
}

/// The decoded `X-Payment` header value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XPaymentHeader {
    /// x402 protocol version
    pub x402_version: u32,

    /// Payment scheme (e.g. `exact`)
    pub scheme: String,

    /// Network identifier
    pub network: String,

    /// Scheme-specific payload
    pub payload: XPaymentPayload,
}

impl XPaymentHeader {
    /// Parse a header value, accepting raw JSON or base64-encoded JSON.
    ///
    /// # Errors
    /// - `X_PAYMENT_SCHEMA` if neither form parses into the expected shape
    /// - `X_PAYMENT_VERSION` if `x402Version` is not 1
    pub fn from_header_value(value: &str) -> X402Result<Self> {
        let parsed = serde_json::from_str::<Value>(value).or_else(|_| {
            let decoded = STANDARD
                .decode(value.trim())
                .map_err(|_| X402Error::XPaymentSchema)?;
            serde_json::from_slice::<Value>(&decoded).map_err(|_| X402Error::XPaymentSchema)
        })?;
        Self::from_value(parsed)
    }

    /// Validate an already-parsed JSON value.
    pub fn from_value(value: Value) -> X402Result<Self> {
        let version = value
            .get("x402Version")
            .and_then(Value::as_u64)
            .ok_or(X402Error::XPaymentSchema)?;
        if version != u64::from(X402_VERSION) {
            return Err(X402Error::XPaymentVersion);
        }
        serde_json::from_value(value).map_err(|_| X402Error::XPaymentSchema)
    }

    /// Encode this payload as a base64 header value.
    pub fn to_header_value(&self) -> X402Result<String> {
        let json = serde_json::to_vec(self).map_err(|_| X402Error::XPaymentSchema)?;
        Ok(STANDARD.encode(json))
    }
}
