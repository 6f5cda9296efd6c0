//! Credential register for token verification.
//!
//! A [`KeyRegister`] holds three independent, append-only lists: HMAC
//! secrets, RSA public keys and ECDSA public keys. Insertion order is kept
//! and duplicates are allowed. Private keys given to the loader are reduced
//! to their public half before anything is stored.

mod decrypt;
mod pem;

use crate::algorithm::Family;
use crate::keys::{EcdsaPublicKey, PublicKey};
use crate::verify::Candidates;
use rsa::RsaPublicKey;
use std::fmt;
use zeroize::Zeroizing;

/// Credentials to verify tokens against.
///
/// Verification only reads the register, so a populated register can be
/// shared across threads behind an `Arc`. See
/// [`SharedRegister`](crate::SharedRegister) for loading while serving.
#[derive(Clone, Default)]
pub struct KeyRegister {
    secrets: Vec<Zeroizing<Vec<u8>>>,
    rsas: Vec<RsaPublicKey>,
    ecdsas: Vec<EcdsaPublicKey>,
}

impl KeyRegister {
    /// Empty register
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an HMAC secret.
    pub fn add_secret(&mut self, secret: impl Into<Vec<u8>>) {
        self.secrets.push(Zeroizing::new(secret.into()));
    }

    /// Append an RSA public key.
    pub fn add_rsa(&mut self, key: RsaPublicKey) {
        self.rsas.push(key);
    }

    /// Append an ECDSA public key.
    pub fn add_ecdsa(&mut self, key: EcdsaPublicKey) {
        self.ecdsas.push(key);
    }

    /// Append a public key to the list of its family.
    pub fn add(&mut self, key: impl Into<PublicKey>) {
        match key.into() {
            PublicKey::Rsa(key) => self.add_rsa(key),
            PublicKey::Ecdsa(key) => self.add_ecdsa(key),
        }
    }

    /// Number of HMAC secrets
    #[must_use]
    pub fn secret_count(&self) -> usize {
        self.secrets.len()
    }

    /// Number of RSA public keys
    #[must_use]
    pub fn rsa_count(&self) -> usize {
        self.rsas.len()
    }

    /// Number of ECDSA public keys
    #[must_use]
    pub fn ecdsa_count(&self) -> usize {
        self.ecdsas.len()
    }

    /// RSA public keys in insertion order
    #[must_use]
    pub fn rsa_keys(&self) -> &[RsaPublicKey] {
        &self.rsas
    }

    /// ECDSA public keys in insertion order
    #[must_use]
    pub fn ecdsa_keys(&self) -> &[EcdsaPublicKey] {
        &self.ecdsas
    }

    /// Credentials a token of `family` is checked against
    pub(crate) fn candidates(&self, family: Family) -> Candidates<'_> {
        match family {
            Family::Hmac => Candidates::Hmac(&self.secrets),
            Family::Rsa => Candidates::Rsa(&self.rsas),
            Family::Ecdsa => Candidates::Ecdsa(&self.ecdsas),
        }
    }
}

impl fmt::Debug for KeyRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRegister")
            .field("secrets", &self.secrets.len())
            .field("rsas", &self.rsas.len())
            .field("ecdsas", &self.ecdsas.len())
            .finish()
    }
}
