//! Key shapes produced by certificate and PEM parsing.
//!
//! Every public key that can enter a [`KeyRegister`](crate::KeyRegister) is
//! one variant of [`PublicKey`]. Parsing produces that variant or fails with
//! [`KeyError::UnsupportedKey`]; there is no open-ended key trait.

use crate::algorithm::HashAlg;
use crate::error::KeyError;
use const_oid::ObjectIdentifier;
use const_oid::db::rfc5912::{ID_EC_PUBLIC_KEY, SECP_256_R_1, SECP_384_R_1, SECP_521_R_1};
use der::{Decode, Encode};
use p256::ecdsa::signature::Signer;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::{RsaPrivateKey, RsaPublicKey};
use spki::SubjectPublicKeyInfoRef;
use std::fmt;

/// rsaEncryption (PKCS #1)
const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// NIST prime curves with an ECDSA algorithm identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    /// secp256r1, used by ES256
    P256,
    /// secp384r1, used by ES384
    P384,
    /// secp521r1, used by ES512
    P521,
}

impl Curve {
    /// Byte length of one coordinate, and of each of `r` and `s` in a JWS signature
    #[must_use]
    pub fn coordinate_size(self) -> usize {
        match self {
            Curve::P256 => 32,
            Curve::P384 => 48,
            Curve::P521 => 66,
        }
    }

    /// Curve that an ECDSA identifier with this hash is defined on (RFC 7518 3.4)
    #[must_use]
    pub fn for_hash(hash: HashAlg) -> Self {
        match hash {
            HashAlg::Sha256 => Curve::P256,
            HashAlg::Sha384 => Curve::P384,
            HashAlg::Sha512 => Curve::P521,
        }
    }

    fn from_oid(oid: ObjectIdentifier) -> Result<Self, KeyError> {
        match oid {
            SECP_256_R_1 => Ok(Curve::P256),
            SECP_384_R_1 => Ok(Curve::P384),
            SECP_521_R_1 => Ok(Curve::P521),
            other => Err(KeyError::UnsupportedKey(format!("EC curve {other}"))),
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::P521 => "P-521",
        })
    }
}

/// ECDSA verification key on one of the supported curves
#[derive(Clone)]
pub enum EcdsaPublicKey {
    /// P-256 key
    P256(p256::ecdsa::VerifyingKey),
    /// P-384 key
    P384(p384::ecdsa::VerifyingKey),
    /// P-521 key
    P521(p521::ecdsa::VerifyingKey),
}

impl EcdsaPublicKey {
    /// Curve of the key
    #[must_use]
    pub fn curve(&self) -> Curve {
        match self {
            EcdsaPublicKey::P256(_) => Curve::P256,
            EcdsaPublicKey::P384(_) => Curve::P384,
            EcdsaPublicKey::P521(_) => Curve::P521,
        }
    }

    /// Decode a SEC1 encoded point on `curve`.
    ///
    /// # Errors
    ///
    /// [`KeyError::Parse`] when the bytes are not a point on the curve.
    pub fn from_sec1_point(curve: Curve, point: &[u8]) -> Result<Self, KeyError> {
        Ok(match curve {
            Curve::P256 => EcdsaPublicKey::P256(
                p256::ecdsa::VerifyingKey::from_sec1_bytes(point).map_err(KeyError::parse)?,
            ),
            Curve::P384 => EcdsaPublicKey::P384(
                p384::ecdsa::VerifyingKey::from_sec1_bytes(point).map_err(KeyError::parse)?,
            ),
            Curve::P521 => EcdsaPublicKey::P521(
                p521::ecdsa::VerifyingKey::from_sec1_bytes(point).map_err(KeyError::parse)?,
            ),
        })
    }
}

impl fmt::Debug for EcdsaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EcdsaPublicKey({})", self.curve())
    }
}

/// ECDSA signing key, used only to issue tokens.
///
/// Never stored in a register; [`EcdsaPrivateKey::verifying_key`] gives the
/// public half that is.
pub enum EcdsaPrivateKey {
    /// P-256 key
    P256(p256::ecdsa::SigningKey),
    /// P-384 key
    P384(p384::ecdsa::SigningKey),
    /// P-521 key
    P521(p521::ecdsa::SigningKey),
}

impl EcdsaPrivateKey {
    /// Parse a SEC1 `ECPrivateKey` structure (RFC 5915).
    ///
    /// # Errors
    ///
    /// [`KeyError::Parse`] for broken DER, [`KeyError::UnsupportedKey`] when the
    /// curve is not named or not supported.
    pub fn from_sec1_der(der: &[u8]) -> Result<Self, KeyError> {
        let parsed = sec1::EcPrivateKey::try_from(der).map_err(KeyError::parse)?;
        let oid = parsed
            .parameters
            .and_then(|params| params.named_curve())
            .ok_or_else(|| {
                KeyError::UnsupportedKey("EC private key without named curve".to_string())
            })?;

        Ok(match Curve::from_oid(oid)? {
            Curve::P256 => {
                let secret = p256::SecretKey::from_sec1_der(der).map_err(KeyError::parse)?;
                EcdsaPrivateKey::P256(p256::ecdsa::SigningKey::from(&secret))
            }
            Curve::P384 => {
                let secret = p384::SecretKey::from_sec1_der(der).map_err(KeyError::parse)?;
                EcdsaPrivateKey::P384(p384::ecdsa::SigningKey::from(&secret))
            }
            Curve::P521 => {
                let secret = p521::SecretKey::from_sec1_der(der).map_err(KeyError::parse)?;
                let key = p521::ecdsa::SigningKey::from_bytes(&secret.to_bytes())
                    .map_err(KeyError::parse)?;
                EcdsaPrivateKey::P521(key)
            }
        })
    }

    /// Parse a PEM document holding one `EC PRIVATE KEY` block.
    ///
    /// # Errors
    ///
    /// [`KeyError::Pem`] for broken armor, [`KeyError::UnsupportedBlock`] for
    /// another label, otherwise as [`EcdsaPrivateKey::from_sec1_der`].
    pub fn from_sec1_pem(pem: &str) -> Result<Self, KeyError> {
        let block = pem::parse(pem).map_err(|e| KeyError::Pem(e.to_string()))?;
        if block.tag() != "EC PRIVATE KEY" {
            return Err(KeyError::UnsupportedBlock(block.tag().to_string()));
        }
        Self::from_sec1_der(block.contents())
    }

    /// Curve of the key
    #[must_use]
    pub fn curve(&self) -> Curve {
        match self {
            EcdsaPrivateKey::P256(_) => Curve::P256,
            EcdsaPrivateKey::P384(_) => Curve::P384,
            EcdsaPrivateKey::P521(_) => Curve::P521,
        }
    }

    /// Public half of the key
    #[must_use]
    pub fn verifying_key(&self) -> EcdsaPublicKey {
        match self {
            EcdsaPrivateKey::P256(key) => EcdsaPublicKey::P256(p256::ecdsa::VerifyingKey::from(key)),
            EcdsaPrivateKey::P384(key) => EcdsaPublicKey::P384(p384::ecdsa::VerifyingKey::from(key)),
            EcdsaPrivateKey::P521(key) => EcdsaPublicKey::P521(p521::ecdsa::VerifyingKey::from(key)),
        }
    }

    /// Fixed-width `r || s` signature over `content` with the curve's own hash.
    pub(crate) fn sign(&self, content: &[u8]) -> Vec<u8> {
        match self {
            EcdsaPrivateKey::P256(key) => {
                let sig: p256::ecdsa::Signature = key.sign(content);
                sig.to_bytes().to_vec()
            }
            EcdsaPrivateKey::P384(key) => {
                let sig: p384::ecdsa::Signature = key.sign(content);
                sig.to_bytes().to_vec()
            }
            EcdsaPrivateKey::P521(key) => {
                let sig: p521::ecdsa::Signature = key.sign(content);
                sig.to_bytes().to_vec()
            }
        }
    }
}

impl fmt::Debug for EcdsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EcdsaPrivateKey({}, ..)", self.curve())
    }
}

/// Public key of one of the asymmetric families
#[derive(Debug, Clone)]
pub enum PublicKey {
    /// RSA key, verified with PKCS #1 v1.5
    Rsa(RsaPublicKey),
    /// ECDSA key
    Ecdsa(EcdsaPublicKey),
}

impl PublicKey {
    /// Parse a DER `SubjectPublicKeyInfo` (RFC 5280).
    ///
    /// # Errors
    ///
    /// [`KeyError::Parse`] for broken DER, [`KeyError::UnsupportedKey`] for any
    /// algorithm other than rsaEncryption and id-ecPublicKey on a supported
    /// curve.
    pub fn from_spki_der(der: &[u8]) -> Result<Self, KeyError> {
        let spki = SubjectPublicKeyInfoRef::from_der(der).map_err(KeyError::parse)?;
        match spki.algorithm.oid {
            RSA_ENCRYPTION => Ok(PublicKey::Rsa(
                RsaPublicKey::from_public_key_der(der).map_err(KeyError::parse)?,
            )),
            ID_EC_PUBLIC_KEY => {
                let oid = spki.algorithm.parameters_oid().map_err(KeyError::parse)?;
                let curve = Curve::from_oid(oid)?;
                let point = spki
                    .subject_public_key
                    .as_bytes()
                    .ok_or_else(|| KeyError::Parse("EC point has unused bits".to_string()))?;
                Ok(PublicKey::Ecdsa(EcdsaPublicKey::from_sec1_point(curve, point)?))
            }
            other => Err(KeyError::UnsupportedKey(format!("algorithm {other}"))),
        }
    }

    /// Public key of a DER X.509 certificate.
    ///
    /// # Errors
    ///
    /// As [`PublicKey::from_spki_der`], plus [`KeyError::Parse`] when the
    /// certificate does not parse.
    pub fn from_certificate_der(der: &[u8]) -> Result<Self, KeyError> {
        let cert = x509_cert::Certificate::from_der(der).map_err(KeyError::parse)?;
        let spki = cert
            .tbs_certificate
            .subject_public_key_info
            .to_der()
            .map_err(KeyError::parse)?;
        Self::from_spki_der(&spki)
    }

    /// Public half of a PKCS #1 `RSAPrivateKey`; the private part is dropped.
    ///
    /// # Errors
    ///
    /// [`KeyError::Parse`] when the DER does not parse.
    pub fn from_rsa_private_der(der: &[u8]) -> Result<Self, KeyError> {
        let private = RsaPrivateKey::from_pkcs1_der(der).map_err(KeyError::parse)?;
        Ok(PublicKey::Rsa(RsaPublicKey::from(&private)))
    }

    /// Public half of a SEC1 `ECPrivateKey`; the private part is dropped.
    ///
    /// # Errors
    ///
    /// As [`EcdsaPrivateKey::from_sec1_der`].
    pub fn from_ec_private_der(der: &[u8]) -> Result<Self, KeyError> {
        Ok(PublicKey::Ecdsa(EcdsaPrivateKey::from_sec1_der(der)?.verifying_key()))
    }
}

impl From<RsaPublicKey> for PublicKey {
    fn from(key: RsaPublicKey) -> Self {
        PublicKey::Rsa(key)
    }
}

impl From<EcdsaPublicKey> for PublicKey {
    fn from(key: EcdsaPublicKey) -> Self {
        PublicKey::Ecdsa(key)
    }
}
