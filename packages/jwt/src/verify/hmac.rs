//! HMAC-SHA2 with shared secrets

use crate::algorithm::HashAlg;
use crate::error::{JwtError, JwtResult};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

fn mac<M: Mac + KeyInit>(secret: &[u8], content: &[u8]) -> JwtResult<Vec<u8>> {
    let mut mac = <M as KeyInit>::new_from_slice(secret)
        .map_err(|_| JwtError::signing("invalid HMAC key length"))?;
    mac.update(content);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Keyed digest of `content`
pub(crate) fn sign(hash: HashAlg, secret: &[u8], content: &[u8]) -> JwtResult<Vec<u8>> {
    match hash {
        HashAlg::Sha256 => mac::<Hmac<Sha256>>(secret, content),
        HashAlg::Sha384 => mac::<Hmac<Sha384>>(secret, content),
        HashAlg::Sha512 => mac::<Hmac<Sha512>>(secret, content),
    }
}

pub(crate) fn verify(
    hash: HashAlg,
    content: &[u8],
    signature: &[u8],
    secrets: &[Zeroizing<Vec<u8>>],
) -> JwtResult<()> {
    for secret in secrets {
        let Ok(expected) = sign(hash, secret, content) else {
            continue;
        };
        // constant time, also across differing lengths
        if bool::from(expected.as_slice().ct_eq(signature)) {
            return Ok(());
        }
    }
    Err(JwtError::SignatureMismatch)
}
