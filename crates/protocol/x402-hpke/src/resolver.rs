//! Key resolution seam.
//!
//! The engine never fetches keys itself; callers resolve a `kid` to a JWK
//! before sealing or opening. This trait is the boundary: JWKS-over-HTTP,
//! keychains, and HSMs live behind it, outside this crate.

use std::collections::HashMap;

use x402_hpke_crypto::{PrivateJwk, PublicJwk};
use x402_hpke_types::{X402Error, X402Result};

/// Resolves key identifiers to key material.
pub trait KeyResolver {
    /// Look up a recipient public key.
    fn resolve_public(&self, kid: &str) -> Option<PublicJwk>;

    /// Look up a private key held locally.
    fn resolve_private(&self, kid: &str) -> Option<PrivateJwk>;

    /// Like [`KeyResolver::resolve_public`], failing with `KID_NOT_FOUND`.
    fn require_public(&self, kid: &str) -> X402Result<PublicJwk> {
        self.resolve_public(kid)
            .ok_or_else(|| X402Error::KidNotFound {
                kid: kid.to_string(),
            })
    }

    /// Like [`KeyResolver::resolve_private`], failing with `KID_NOT_FOUND`.
    fn require_private(&self, kid: &str) -> X402Result<PrivateJwk> {
        self.resolve_private(kid)
            .ok_or_else(|| X402Error::KidNotFound {
                kid: kid.to_string(),
            })
    }
}

/// An in-memory resolver over fixed key sets.
#[derive(Debug, Default)]
pub struct StaticKeyResolver {
    public: HashMap<String, PublicJwk>,
    private: HashMap<String, PrivateJwk>,
}

impl StaticKeyResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a public key under `kid`.
    pub fn insert_public(&mut self, kid: impl Into<String>, jwk: PublicJwk) {
        self.public.insert(kid.into(), jwk);
    }

    /// Register a private key under `kid`.
    pub fn insert_private(&mut self, kid: impl Into<String>, jwk: PrivateJwk) {
        self.private.insert(kid.into(), jwk);
    }
}

impl KeyResolver for StaticKeyResolver {
    fn resolve_public(&self, kid: &str) -> Option<PublicJwk> {
        self.public.get(kid).cloned()
    }

    fn resolve_private(&self, kid: &str) -> Option<PrivateJwk> {
        self.private.get(kid).cloned()
    }
}
