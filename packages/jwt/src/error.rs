//! Error types for token verification, issuing and credential loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type for token operations
pub type JwtResult<T> = Result<T, JwtError>;

/// Token verification and issuing errors.
///
/// Every variant means "reject the token". [`JwtError::SignatureMismatch`]
/// deliberately carries no detail about which family, hash or key was tried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Wrong segment count, invalid base64url or undecodable JSON
    #[error("jwt: malformed token: {0}")]
    Malformed(String),

    /// The header declares the unsecured "none" algorithm
    #[error("jwt: unsecured token rejected")]
    Unsecured,

    /// The algorithm identifier is not in any supported family
    #[error("jwt: algorithm {0:?} not recognized")]
    AlgorithmUnknown(String),

    /// The header lists a critical extension this implementation does not understand
    #[error("jwt: unsupported critical extension {0:?} in header")]
    CriticalExtension(String),

    /// No registered credential validates the signature
    #[error("jwt: signature mismatch")]
    SignatureMismatch,

    /// The expiration time has passed
    #[error("jwt: token expired")]
    Expired,

    /// The not-before time has not been reached
    #[error("jwt: token not valid yet")]
    NotYetValid,

    /// The issued-at time lies in the future
    #[error("jwt: token issued in the future")]
    IssuedInFuture,

    /// A claim required by the validation options is absent
    #[error("jwt: missing required claim {0:?}")]
    MissingClaim(String),

    /// The signing key cannot produce a token for the requested algorithm
    #[error("jwt: signing failed: {0}")]
    Signing(String),

    /// Claims could not be encoded
    #[error("jwt: claims serialization failed: {0}")]
    Serialization(String),
}

impl JwtError {
    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Create a signing error
    #[inline]
    #[must_use]
    pub fn signing(msg: impl Into<String>) -> Self {
        Self::Signing(msg.into())
    }
}

/// Failure of a single PEM block during credential loading
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The PEM armor itself is broken
    #[error("jwt: malformed PEM: {0}")]
    Pem(String),

    /// The DER content of a block does not parse
    #[error("jwt: malformed key material: {0}")]
    Parse(String),

    /// The block is encrypted and no password was supplied
    #[error("jwt: encrypted PEM block requires a password")]
    PasswordRequired,

    /// Decryption did not produce valid plaintext
    #[error("jwt: PEM decryption password incorrect")]
    IncorrectPassword,

    /// The DEK-Info header names a cipher that is not supported
    #[error("jwt: unsupported PEM cipher {0:?}")]
    UnsupportedCipher(String),

    /// A password was supplied but the block is not encrypted
    #[error("jwt: unencrypted PEM rejected due password expectation")]
    UnencryptedPem,

    /// The block label is not one of the recognized types
    #[error("jwt: unknown PEM type {0:?}")]
    UnsupportedBlock(String),

    /// The key algorithm or curve is not one of the supported families
    #[error("jwt: unsupported key type {0}")]
    UnsupportedKey(String),
}

impl KeyError {
    pub(crate) fn parse(err: impl std::fmt::Display) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Aborted credential load with the number of credentials registered before the failure.
///
/// Credentials added before the failing block stay in the register.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} (after {loaded} credentials)")]
pub struct LoadError {
    /// Credentials registered before the failing block
    pub loaded: usize,
    /// What went wrong with the failing block
    #[source]
    pub kind: KeyError,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document does not parse
    #[error("jwt: invalid register configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A configured secret is not valid base64url
    #[error("jwt: secret #{index} is not base64url: {source}")]
    Secret {
        /// Position in the secrets list
        index: usize,
        /// Decoding failure
        #[source]
        source: base64::DecodeError,
    },

    /// A key file could not be read
    #[error("jwt: failed to read {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A key file was read but its contents were rejected
    #[error("jwt: failed to load {}: {source}", path.display())]
    Load {
        /// File that failed
        path: PathBuf,
        /// Load failure with partial count
        #[source]
        source: LoadError,
    },
}
