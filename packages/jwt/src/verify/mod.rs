//! Signature verifiers, one per family.
//!
//! Each verifier gets the signing input, the raw signature, the hash the
//! header resolved to and the register's candidates for its family. It
//! succeeds on the first candidate that validates the signature and
//! otherwise fails with [`JwtError::SignatureMismatch`](crate::JwtError::SignatureMismatch),
//! whatever the reason.

pub(crate) mod ecdsa;
pub(crate) mod hmac;
pub(crate) mod rsa;

use crate::algorithm::HashAlg;
use crate::error::JwtResult;
use crate::keys::EcdsaPublicKey;
use ::rsa::RsaPublicKey;
use zeroize::Zeroizing;

/// A family's candidate credentials, borrowed from the register
#[derive(Clone, Copy)]
pub(crate) enum Candidates<'a> {
    Hmac(&'a [Zeroizing<Vec<u8>>]),
    Rsa(&'a [RsaPublicKey]),
    Ecdsa(&'a [EcdsaPublicKey]),
}

impl Candidates<'_> {
    /// Check `signature` over `content` against every candidate in order.
    pub(crate) fn verify(self, hash: HashAlg, content: &[u8], signature: &[u8]) -> JwtResult<()> {
        match self {
            Candidates::Hmac(secrets) => hmac::verify(hash, content, signature, secrets),
            Candidates::Rsa(keys) => rsa::verify(hash, content, signature, keys),
            Candidates::Ecdsa(keys) => ecdsa::verify(hash, content, signature, keys),
        }
    }
}
