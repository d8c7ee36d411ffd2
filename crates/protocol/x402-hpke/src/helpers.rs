//! Convenience constructors for the common x402 exchange shapes.
//!
//! Each helper builds the right transport and seals it with the disclosure
//! the flow implies. The generic request/response helpers never return a
//! sidecar: their bodies stay private even when sealed with an `all`
//! selection.

use x402_hpke_crypto::PublicJwk;
use x402_hpke_types::{
    Envelope, HeaderEntry, JsonObject, SecureTransport, TransportKind, X402Result, X_PAYMENT,
    X_PAYMENT_RESPONSE,
};

use crate::envelope::Hpke;
use crate::sidecar::{PublicSelection, Sidecar};

fn payment_selection(is_public: bool, header: &str) -> Option<PublicSelection> {
    is_public.then(|| PublicSelection::names([header]))
}

/// Seal a client-side `X-Payment` request.
///
/// `payment_data` becomes the `payload` field of the payment header. When
/// `is_public`, the sidecar exposes exactly the `X-Payment` header.
pub fn create_payment(
    hpke: &Hpke,
    payment_data: JsonObject,
    recipient_public_jwk: &PublicJwk,
    kid: &str,
    extensions: Vec<HeaderEntry>,
    is_public: bool,
) -> X402Result<(Envelope, Option<Sidecar>)> {
    let mut content = JsonObject::new();
    content.insert("payload".into(), payment_data.into());
    let transport = SecureTransport::new(TransportKind::Payment, content, None, extensions)?;
    hpke.seal(
        kid,
        recipient_public_jwk,
        &transport,
        payment_selection(is_public, X_PAYMENT),
    )
}

/// Seal a 402 Payment Required notice.
///
/// With `is_public`, the requirement fields are exposed in the sidecar;
/// payment headers are never exposed on a 402 regardless.
pub fn create_payment_required(
    hpke: &Hpke,
    payment_required_data: JsonObject,
    recipient_public_jwk: &PublicJwk,
    kid: &str,
    is_public: bool,
) -> X402Result<(Envelope, Option<Sidecar>)> {
    let transport = SecureTransport::new(
        TransportKind::PaymentRequired,
        payment_required_data,
        None,
        vec![],
    )?;
    let selection = is_public.then_some(PublicSelection::All);
    hpke.seal(kid, recipient_public_jwk, &transport, selection)
}

/// Seal a server-side `X-Payment-Response` settlement confirmation.
pub fn create_payment_response(
    hpke: &Hpke,
    settlement_data: JsonObject,
    recipient_public_jwk: &PublicJwk,
    kid: &str,
    extensions: Vec<HeaderEntry>,
    is_public: bool,
) -> X402Result<(Envelope, Option<Sidecar>)> {
    let transport = SecureTransport::new(
        TransportKind::PaymentResponse,
        settlement_data,
        Some(200),
        extensions,
    )?;
    hpke.seal(
        kid,
        recipient_public_jwk,
        &transport,
        payment_selection(is_public, X_PAYMENT_RESPONSE),
    )
}

/// Seal a general-purpose request body. No sidecar is returned.
pub fn create_request(
    hpke: &Hpke,
    request_data: JsonObject,
    recipient_public_jwk: &PublicJwk,
    kid: &str,
    extensions: Vec<HeaderEntry>,
) -> X402Result<Envelope> {
    let transport =
        SecureTransport::new(TransportKind::OtherRequest, request_data, None, extensions)?;
    let (envelope, _) = hpke.seal(kid, recipient_public_jwk, &transport, None)?;
    Ok(envelope)
}

/// Seal a general-purpose response body. No sidecar is returned.
pub fn create_response(
    hpke: &Hpke,
    response_data: JsonObject,
    recipient_public_jwk: &PublicJwk,
    http_response_code: u16,
    kid: &str,
    extensions: Vec<HeaderEntry>,
) -> X402Result<Envelope> {
    let transport = SecureTransport::new(
        TransportKind::OtherResponse,
        response_data,
        Some(http_response_code),
        extensions,
    )?;
    let (envelope, _) = hpke.seal(kid, recipient_public_jwk, &transport, None)?;
    Ok(envelope)
}
