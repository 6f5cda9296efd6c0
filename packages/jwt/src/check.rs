//! Token verification against a register

use crate::algorithm::Family;
use crate::claims::Claims;
use crate::error::{JwtError, JwtResult};
use crate::register::KeyRegister;
use crate::token::Compact;

impl KeyRegister {
    /// Verify a compact token and return its claims.
    ///
    /// The header's algorithm is looked up in the HMAC, RSA and ECDSA tables
    /// in that order. Only the family whose table holds the identifier gets
    /// to verify, using this register's credentials of that family. The
    /// payload is decoded only after a credential has validated the
    /// signature, and the header's `kid` is copied to [`Claims::key_id`].
    ///
    /// Time-based claims are not checked here; see [`Claims::validate`].
    ///
    /// # Errors
    ///
    /// - [`JwtError::Malformed`] for a broken token, including a payload that
    ///   is not a claims object
    /// - [`JwtError::Unsecured`] for `"alg": "none"`
    /// - [`JwtError::CriticalExtension`] when the header lists `crit`
    /// - [`JwtError::AlgorithmUnknown`] when no family knows the identifier
    /// - [`JwtError::SignatureMismatch`] when no credential validates the
    ///   signature
    pub fn check(&self, token: impl AsRef<[u8]>) -> JwtResult<Claims> {
        let compact = Compact::parse(token.as_ref())?;
        compact.header.reject_critical()?;

        for family in Family::ALL {
            let hash = match compact.header.match_alg(family) {
                Ok(hash) => hash,
                Err(JwtError::AlgorithmUnknown(_)) => continue,
                Err(e) => return Err(e),
            };
            self.candidates(family)
                .verify(hash, compact.signed, &compact.signature)?;

            let mut claims = compact.claims()?;
            claims.key_id = compact.header.kid;
            return Ok(claims);
        }
        Err(JwtError::AlgorithmUnknown(compact.header.alg))
    }
}
