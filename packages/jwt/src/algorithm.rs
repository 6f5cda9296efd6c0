//! Algorithm families and their closed identifier tables.
//!
//! Each JWS algorithm identifier belongs to exactly one [`Family`] and maps to
//! exactly one [`HashAlg`]. The tables are constants: nothing can be added at
//! runtime, and an identifier missing from a table never falls back to a
//! default hash or family.

use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fmt;

/// Hash function selected by an algorithm identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlg {
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashAlg {
    /// Digest `data` in one pass.
    #[must_use]
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlg::Sha256 => Sha256::digest(data).to_vec(),
            HashAlg::Sha384 => Sha384::digest(data).to_vec(),
            HashAlg::Sha512 => Sha512::digest(data).to_vec(),
        }
    }

    /// Digest length in bytes
    #[must_use]
    pub fn output_size(self) -> usize {
        match self {
            HashAlg::Sha256 => 32,
            HashAlg::Sha384 => 48,
            HashAlg::Sha512 => 64,
        }
    }
}

/// The three disjoint signature families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// HMAC with a shared secret
    Hmac,
    /// RSASSA-PKCS1-v1_5
    Rsa,
    /// ECDSA on the NIST prime curves
    Ecdsa,
}

const HMAC_ALGS: &[(&str, HashAlg)] = &[
    ("HS256", HashAlg::Sha256),
    ("HS384", HashAlg::Sha384),
    ("HS512", HashAlg::Sha512),
];

const RSA_ALGS: &[(&str, HashAlg)] = &[
    ("RS256", HashAlg::Sha256),
    ("RS384", HashAlg::Sha384),
    ("RS512", HashAlg::Sha512),
];

const ECDSA_ALGS: &[(&str, HashAlg)] = &[
    ("ES256", HashAlg::Sha256),
    ("ES384", HashAlg::Sha384),
    ("ES512", HashAlg::Sha512),
];

impl Family {
    /// Families in the order verification tries them
    pub const ALL: [Family; 3] = [Family::Hmac, Family::Rsa, Family::Ecdsa];

    /// The family's identifier table
    #[must_use]
    pub fn algorithms(self) -> &'static [(&'static str, HashAlg)] {
        match self {
            Family::Hmac => HMAC_ALGS,
            Family::Rsa => RSA_ALGS,
            Family::Ecdsa => ECDSA_ALGS,
        }
    }

    /// Hash for `alg` when the identifier belongs to this family.
    ///
    /// Matching is exact and case-sensitive.
    #[must_use]
    pub fn lookup(self, alg: &str) -> Option<HashAlg> {
        self.algorithms()
            .iter()
            .find(|(name, _)| *name == alg)
            .map(|(_, hash)| *hash)
    }

    /// Family owning `alg`, if any
    #[must_use]
    pub fn of(alg: &str) -> Option<(Family, HashAlg)> {
        Self::ALL
            .into_iter()
            .find_map(|family| family.lookup(alg).map(|hash| (family, hash)))
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Family::Hmac => "HMAC",
            Family::Rsa => "RSA",
            Family::Ecdsa => "ECDSA",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_disjoint() {
        for family in Family::ALL {
            for (alg, _) in family.algorithms() {
                let owners: Vec<_> = Family::ALL
                    .into_iter()
                    .filter(|f| f.lookup(alg).is_some())
                    .collect();
                assert_eq!(owners, vec![family], "{alg} must belong to one family");
            }
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(Family::Rsa.lookup("RS384"), Some(HashAlg::Sha384));
        assert_eq!(Family::Rsa.lookup("rs384"), None);
        assert_eq!(Family::Hmac.lookup("RS256"), None);
        assert_eq!(Family::of("PS256"), None);
        assert_eq!(Family::of("none"), None);
        assert_eq!(Family::of("ES512"), Some((Family::Ecdsa, HashAlg::Sha512)));
    }

    #[test]
    fn digest_sizes() {
        for hash in [HashAlg::Sha256, HashAlg::Sha384, HashAlg::Sha512] {
            assert_eq!(hash.digest(b"abc").len(), hash.output_size());
        }
    }
}
