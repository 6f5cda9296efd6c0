//! JOSE header and algorithm matching

use crate::algorithm::{Family, HashAlg};
use crate::error::{JwtError, JwtResult};
use serde::{Deserialize, Serialize};

/// Identifier of the unsecured algorithm
pub const ALG_NONE: &str = "none";

/// Decoded JOSE header of a compact token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Algorithm identifier
    pub alg: String,
    /// Key identifier hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// Media type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    /// Extensions the recipient must understand
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub crit: Vec<String>,
}

impl Header {
    /// Header for issuing a token with `alg`
    #[must_use]
    pub fn new(alg: &str) -> Self {
        Self {
            alg: alg.to_string(),
            kid: None,
            typ: Some("JWT".to_string()),
            crit: Vec::new(),
        }
    }

    /// Set the key identifier hint.
    #[must_use]
    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }

    /// Resolve the hash for `family`.
    ///
    /// # Errors
    ///
    /// [`JwtError::Unsecured`] for "none", regardless of family.
    /// [`JwtError::AlgorithmUnknown`] when the identifier is not in the family's
    /// table; the caller may go on to try another family.
    pub fn match_alg(&self, family: Family) -> JwtResult<HashAlg> {
        if self.alg == ALG_NONE {
            return Err(JwtError::Unsecured);
        }
        family
            .lookup(&self.alg)
            .ok_or_else(|| JwtError::AlgorithmUnknown(self.alg.clone()))
    }

    /// Reject critical extensions; none are supported.
    ///
    /// # Errors
    ///
    /// [`JwtError::CriticalExtension`] naming the first listed extension.
    pub fn reject_critical(&self) -> JwtResult<()> {
        match self.crit.first() {
            Some(ext) => Err(JwtError::CriticalExtension(ext.clone())),
            None => Ok(()),
        }
    }
}
