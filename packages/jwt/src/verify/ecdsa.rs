//! ECDSA on P-256, P-384 and P-521 with JWS `r || s` signatures

use crate::algorithm::HashAlg;
use crate::error::{JwtError, JwtResult};
use crate::keys::{Curve, EcdsaPrivateKey, EcdsaPublicKey};
use p256::ecdsa::signature::hazmat::PrehashVerifier;

pub(crate) fn sign(hash: HashAlg, key: &EcdsaPrivateKey, content: &[u8]) -> JwtResult<Vec<u8>> {
    let curve = Curve::for_hash(hash);
    if key.curve() != curve {
        return Err(JwtError::signing(format!(
            "{} key cannot sign for {curve}",
            key.curve()
        )));
    }
    Ok(key.sign(content))
}

fn matches(key: &EcdsaPublicKey, digest: &[u8], signature: &[u8]) -> bool {
    match key {
        EcdsaPublicKey::P256(key) => p256::ecdsa::Signature::from_slice(signature)
            .is_ok_and(|sig| key.verify_prehash(digest, &sig).is_ok()),
        EcdsaPublicKey::P384(key) => p384::ecdsa::Signature::from_slice(signature)
            .is_ok_and(|sig| key.verify_prehash(digest, &sig).is_ok()),
        EcdsaPublicKey::P521(key) => p521::ecdsa::Signature::from_slice(signature)
            .is_ok_and(|sig| key.verify_prehash(digest, &sig).is_ok()),
    }
}

/// The signature length must be twice the coordinate size of the curve the
/// hash selects; anything else is malformed before a key is tried. Keys on
/// other curves never match.
pub(crate) fn verify(
    hash: HashAlg,
    content: &[u8],
    signature: &[u8],
    keys: &[EcdsaPublicKey],
) -> JwtResult<()> {
    let curve = Curve::for_hash(hash);
    let expected = 2 * curve.coordinate_size();
    if signature.len() != expected {
        return Err(JwtError::malformed(format!(
            "{curve} signature is {} bytes, expected {expected}",
            signature.len()
        )));
    }

    let digest = hash.digest(content);
    if keys
        .iter()
        .filter(|key| key.curve() == curve)
        .any(|key| matches(key, &digest, signature))
    {
        Ok(())
    } else {
        Err(JwtError::SignatureMismatch)
    }
}
