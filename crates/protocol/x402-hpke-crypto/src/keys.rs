//! X25519 keys in JWK form.
//!
//! Keys are `{kty: "OKP", crv: "X25519", x: <b64url 32 bytes>}`; private
//! keys additionally carry `d`. The private scalar never leaves the holder:
//! `PrivateJwk` zeroizes on drop and redacts its `Debug` output.

use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use x402_hpke_types::{X402Error, X402Result};

use crate::encoding::{b64u_decode32, b64u_encode};

const JWK_KTY_OKP: &str = "OKP";
const JWK_CRV_X25519: &str = "X25519";

/// An X25519 public key in JWK form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicJwk {
    /// Key type, always `OKP`
    pub kty: String,

    /// Curve, always `X25519`
    pub crv: String,

    /// Public point (32 bytes, base64url)
    pub x: String,

    /// Optional key identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

impl PublicJwk {
    /// Build a JWK from a raw 32-byte point.
    pub fn from_point_bytes(point: [u8; 32]) -> Self {
        Self {
            kty: JWK_KTY_OKP.into(),
            crv: JWK_CRV_X25519.into(),
            x: b64u_encode(&point),
            kid: None,
        }
    }

    /// Decode the public point, validating the JWK shape.
    ///
    /// # Errors
    /// `INVALID_ENVELOPE` if the key type, curve, or encoding is wrong.
    pub fn to_point_bytes(&self) -> X402Result<[u8; 32]> {
        if self.kty != JWK_KTY_OKP || self.crv != JWK_CRV_X25519 {
            return Err(X402Error::invalid("jwk must be OKP/X25519"));
        }
        b64u_decode32(&self.x)
    }
}

/// An X25519 private key in JWK form.
///
/// Cleared from memory on drop.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct PrivateJwk {
    /// Key type, always `OKP`
    pub kty: String,

    /// Curve, always `X25519`
    pub crv: String,

    /// Public point (32 bytes, base64url)
    pub x: String,

    /// Private scalar (32 bytes, base64url)
    pub d: String,

    /// Optional key identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

impl PrivateJwk {
    /// Decode the private scalar, validating the JWK shape.
    pub fn to_scalar_bytes(&self) -> X402Result<Zeroizing<[u8; 32]>> {
        if self.kty != JWK_KTY_OKP || self.crv != JWK_CRV_X25519 {
            return Err(X402Error::invalid("jwk must be OKP/X25519"));
        }
        Ok(Zeroizing::new(b64u_decode32(&self.d)?))
    }

    /// Project the public half of this key.
    pub fn public_jwk(&self) -> PublicJwk {
        PublicJwk {
            kty: self.kty.clone(),
            crv: self.crv.clone(),
            x: self.x.clone(),
            kid: self.kid.clone(),
        }
    }
}

impl std::fmt::Debug for PrivateJwk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateJwk")
            .field("kty", &self.kty)
            .field("crv", &self.crv)
            .field("x", &self.x)
            .field("d", &"[REDACTED]")
            .field("kid", &self.kid)
            .finish()
    }
}

/// Generate a fresh X25519 keypair from the OS random source.
pub fn generate_keypair() -> (PublicJwk, PrivateJwk) {
    let secret = StaticSecret::random_from_rng(OsRng);
    let public = PublicKey::from(&secret);
    let public_jwk = PublicJwk::from_point_bytes(*public.as_bytes());
    let private_jwk = PrivateJwk {
        kty: public_jwk.kty.clone(),
        crv: public_jwk.crv.clone(),
        x: public_jwk.x.clone(),
        d: b64u_encode(secret.as_bytes()),
        kid: None,
    };
    (public_jwk, private_jwk)
}

/// Generate an ephemeral X25519 keypair as raw bytes.
///
/// The secret half zeroizes when dropped; it lives only for the duration
/// of one seal.
pub fn generate_ephemeral() -> (Zeroizing<[u8; 32]>, [u8; 32]) {
    let secret = StaticSecret::random_from_rng(OsRng);
    let public = PublicKey::from(&secret);
    (Zeroizing::new(secret.to_bytes()), *public.as_bytes())
}

/// Derive an ephemeral keypair from a fixed 32-byte seed.
///
/// Deterministic; intended for known-answer flows only.
pub fn ephemeral_from_seed(seed: &[u8; 32]) -> (Zeroizing<[u8; 32]>, [u8; 32]) {
    let secret = StaticSecret::from(*seed);
    let public = PublicKey::from(&secret);
    (Zeroizing::new(secret.to_bytes()), *public.as_bytes())
}

/// Derive the X25519 public point for a private scalar.
pub fn x25519_public(scalar: &[u8; 32]) -> [u8; 32] {
    let secret = StaticSecret::from(*scalar);
    *PublicKey::from(&secret).as_bytes()
}

/// X25519 scalar multiplication: the shared secret between `scalar` and
/// `point`. The caller must reject an all-zero result.
pub fn x25519_shared(scalar: &[u8; 32], point: &[u8; 32]) -> Zeroizing<[u8; 32]> {
    let secret = StaticSecret::from(*scalar);
    let public = PublicKey::from(*point);
    Zeroizing::new(*secret.diffie_hellman(&public).as_bytes())
}
